//! Project value types: lifecycle stage, category, and field limits.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

/// Maximum length of a project name in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a project location in characters.
pub const MAX_LOCATION_LENGTH: usize = 500;

/// Maximum length of the project details text in characters.
pub const MAX_DETAILS_LENGTH: usize = 2000;

/// Maximum length of the free-text category used with [`Category::Others`].
pub const MAX_CATEGORY_TEXT_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Project lifecycle phase.
///
/// Every stage before [`Stage::Construction`] requires the start date to be
/// in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Concept")]
    Concept,
    #[serde(rename = "Design & Documentation")]
    DesignAndDocumentation,
    #[serde(rename = "Pre-Construction")]
    PreConstruction,
    #[serde(rename = "Construction")]
    Construction,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Concept,
        Stage::DesignAndDocumentation,
        Stage::PreConstruction,
        Stage::Construction,
    ];

    /// Wire and storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Concept => "Concept",
            Stage::DesignAndDocumentation => "Design & Documentation",
            Stage::PreConstruction => "Pre-Construction",
            Stage::Construction => "Construction",
        }
    }

    /// Parse a wire label. Matching is exact and case-sensitive.
    pub fn parse(label: &str) -> Option<Stage> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }

    /// Whether a project in this stage must start strictly after today.
    pub fn requires_future_start(self) -> bool {
        !matches!(self, Stage::Construction)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Project category. [`Category::Others`] carries a free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Education,
    Health,
    Office,
    Others,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Education,
        Category::Health,
        Category::Office,
        Category::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Office => "Office",
            Category::Others => "Others",
        }
    }

    pub fn parse(label: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    pub fn is_others(self) -> bool {
        self == Category::Others
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
