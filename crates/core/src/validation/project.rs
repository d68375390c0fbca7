//! Field and cross-field rules for project input.
//!
//! Per-field rules run first in [`MUTABLE_FIELDS`](crate::input::MUTABLE_FIELDS)
//! order, then the two cross-field rules (category text presence, start date
//! versus stage). Every violation is collected; nothing short-circuits.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::rules::{Violation, ViolationKind, ViolationSet};
use crate::input::{
    ProjectInput, FIELD_CATEGORY, FIELD_CATEGORY_TEXT, FIELD_DETAILS, FIELD_FEE, FIELD_LOCATION,
    FIELD_NAME, FIELD_STAGE, FIELD_START_DATE,
};
use crate::project::{
    Category, Stage, MAX_CATEGORY_TEXT_LENGTH, MAX_DETAILS_LENGTH, MAX_LOCATION_LENGTH,
    MAX_NAME_LENGTH,
};
use crate::types::Date;

const START_DATE_MUST_BE_FUTURE: &str =
    "The Start Date must be in the future for Concept, Design, or PreConstruction stages.";
const CATEGORY_TEXT_REQUIRED: &str = "Please specify the category if \"Others\" is selected.";

/// Fully typed project fields that passed every rule.
///
/// `category_text` is whatever the caller supplied; the mutator decides
/// whether it is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProject {
    pub name: String,
    pub location: String,
    pub stage: Stage,
    pub category: Category,
    pub category_text: Option<String>,
    pub fee: Option<f64>,
    pub start_date: Date,
    pub details: String,
}

/// Validate `input` as of `today`.
///
/// Returns the typed fields, or every violation found in evaluation order.
pub fn validate_project(
    input: &ProjectInput,
    today: Date,
) -> Result<ValidatedProject, ViolationSet> {
    let mut violations = Vec::new();

    // --- Per-field rules ---
    let name = required_text(input, &NAME, &mut violations);
    let location = required_text(input, &LOCATION, &mut violations);
    let stage = required_choice(input, &STAGE, Stage::parse, &mut violations);
    let category = required_choice(input, &CATEGORY, Category::parse, &mut violations);
    let category_text = optional_category_text(input, &mut violations);
    let fee = optional_fee(input, &mut violations);
    let start_date = required_date(input, &mut violations);
    let details = required_text(input, &DETAILS, &mut violations);

    // --- Cross-field rules ---
    if let Parsed::Valid(Category::Others) = category {
        let supplied = match &category_text {
            Parsed::Valid(text) => !text.is_empty(),
            Parsed::Missing => false,
            // Already reported as a type or length violation.
            Parsed::Invalid => true,
        };
        if !supplied {
            violations.push(Violation::new(
                FIELD_CATEGORY_TEXT,
                ViolationKind::ConditionalRequired,
                CATEGORY_TEXT_REQUIRED,
            ));
        }
    }

    if let (Parsed::Valid(stage), Parsed::Valid(date)) = (&stage, &start_date) {
        if stage.requires_future_start() && *date <= today {
            violations.push(Violation::new(
                FIELD_START_DATE,
                ViolationKind::DateConstraintViolated,
                START_DATE_MUST_BE_FUTURE,
            ));
        }
    }

    match (name, location, stage, category, start_date, details) {
        (
            Parsed::Valid(name),
            Parsed::Valid(location),
            Parsed::Valid(stage),
            Parsed::Valid(category),
            Parsed::Valid(start_date),
            Parsed::Valid(details),
        ) if violations.is_empty() => Ok(ValidatedProject {
            name,
            location,
            stage,
            category,
            category_text: category_text.into_option(),
            fee: fee.into_option(),
            start_date,
            details,
        }),
        _ => Err(ViolationSet::from(violations)),
    }
}

// ---------------------------------------------------------------------------
// Per-field helpers
// ---------------------------------------------------------------------------

/// Outcome of reading one field.
enum Parsed<T> {
    /// Not supplied, or supplied as `null`.
    Missing,
    Valid(T),
    /// A violation was recorded for this field.
    Invalid,
}

impl<T> Parsed<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Parsed::Valid(value) => Some(value),
            Parsed::Missing | Parsed::Invalid => None,
        }
    }
}

struct TextRule {
    field: &'static str,
    label: &'static str,
    required_message: &'static str,
    max_length: usize,
}

const NAME: TextRule = TextRule {
    field: FIELD_NAME,
    label: "Name",
    required_message: "Name is required.",
    max_length: MAX_NAME_LENGTH,
};

const LOCATION: TextRule = TextRule {
    field: FIELD_LOCATION,
    label: "Location",
    required_message: "Location is required.",
    max_length: MAX_LOCATION_LENGTH,
};

const DETAILS: TextRule = TextRule {
    field: FIELD_DETAILS,
    label: "Details",
    required_message: "Details are required.",
    max_length: MAX_DETAILS_LENGTH,
};

struct ChoiceRule {
    field: &'static str,
    required_message: &'static str,
    invalid_message: &'static str,
}

const STAGE: ChoiceRule = ChoiceRule {
    field: FIELD_STAGE,
    required_message: "Stage is required.",
    invalid_message: "Choose a valid stage.",
};

const CATEGORY: ChoiceRule = ChoiceRule {
    field: FIELD_CATEGORY,
    required_message: "Category is required.",
    invalid_message: "Choose a valid category.",
};

fn required_text(
    input: &ProjectInput,
    rule: &TextRule,
    out: &mut Vec<Violation>,
) -> Parsed<String> {
    match input.get(rule.field) {
        None | Some(Value::Null) => {
            out.push(Violation::new(
                rule.field,
                ViolationKind::RequiredField,
                rule.required_message,
            ));
            Parsed::Invalid
        }
        Some(Value::String(s)) if s.is_empty() => {
            out.push(Violation::new(
                rule.field,
                ViolationKind::RequiredField,
                rule.required_message,
            ));
            Parsed::Invalid
        }
        Some(Value::String(s)) => {
            if s.chars().count() > rule.max_length {
                out.push(Violation::new(
                    rule.field,
                    ViolationKind::TooLong,
                    format!(
                        "{} cannot be longer than {} characters.",
                        rule.label, rule.max_length
                    ),
                ));
                Parsed::Invalid
            } else {
                Parsed::Valid(s.clone())
            }
        }
        Some(_) => {
            out.push(Violation::new(
                rule.field,
                ViolationKind::InvalidType,
                format!("{} must be a string.", rule.label),
            ));
            Parsed::Invalid
        }
    }
}

fn required_choice<T>(
    input: &ProjectInput,
    rule: &ChoiceRule,
    parse: fn(&str) -> Option<T>,
    out: &mut Vec<Violation>,
) -> Parsed<T> {
    let label = match input.get(rule.field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            out.push(Violation::new(
                rule.field,
                ViolationKind::InvalidChoice,
                rule.invalid_message,
            ));
            return Parsed::Invalid;
        }
    };

    let Some(label) = label else {
        out.push(Violation::new(
            rule.field,
            ViolationKind::RequiredField,
            rule.required_message,
        ));
        return Parsed::Invalid;
    };

    match parse(label) {
        Some(value) => Parsed::Valid(value),
        None => {
            out.push(Violation::new(
                rule.field,
                ViolationKind::InvalidChoice,
                rule.invalid_message,
            ));
            Parsed::Invalid
        }
    }
}

fn optional_category_text(input: &ProjectInput, out: &mut Vec<Violation>) -> Parsed<String> {
    match input.get(FIELD_CATEGORY_TEXT) {
        None | Some(Value::Null) => Parsed::Missing,
        Some(Value::String(s)) if s.chars().count() > MAX_CATEGORY_TEXT_LENGTH => {
            out.push(Violation::new(
                FIELD_CATEGORY_TEXT,
                ViolationKind::TooLong,
                format!(
                    "Category text cannot be longer than {MAX_CATEGORY_TEXT_LENGTH} characters."
                ),
            ));
            Parsed::Invalid
        }
        Some(Value::String(s)) => Parsed::Valid(s.clone()),
        Some(_) => {
            out.push(Violation::new(
                FIELD_CATEGORY_TEXT,
                ViolationKind::InvalidType,
                "Category text must be a string.",
            ));
            Parsed::Invalid
        }
    }
}

fn optional_fee(input: &ProjectInput, out: &mut Vec<Violation>) -> Parsed<f64> {
    let number = match input.get(FIELD_FEE) {
        None | Some(Value::Null) => return Parsed::Missing,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match number {
        Some(fee) if fee.is_finite() && fee >= 0.0 => Parsed::Valid(fee),
        Some(fee) if fee.is_finite() => {
            out.push(Violation::new(
                FIELD_FEE,
                ViolationKind::OutOfRange,
                "Fee must be greater than or equal to 0.",
            ));
            Parsed::Invalid
        }
        _ => {
            out.push(Violation::new(
                FIELD_FEE,
                ViolationKind::InvalidType,
                "Fee must be a number.",
            ));
            Parsed::Invalid
        }
    }
}

fn required_date(input: &ProjectInput, out: &mut Vec<Violation>) -> Parsed<Date> {
    let raw = match input.get(FIELD_START_DATE) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(parse_date(s)),
        Some(_) => Some(None),
    };

    match raw {
        None => {
            out.push(Violation::new(
                FIELD_START_DATE,
                ViolationKind::RequiredField,
                "Start Date is required.",
            ));
            Parsed::Invalid
        }
        Some(Some(date)) => Parsed::Valid(date),
        Some(None) => {
            out.push(Violation::new(
                FIELD_START_DATE,
                ViolationKind::InvalidDate,
                "Start Date must be a valid date.",
            ));
            Parsed::Invalid
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its date part is used).
fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> Date {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn input(value: serde_json::Value) -> ProjectInput {
        ProjectInput::from_json(value).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "New Community Center",
            "location": "456 Elm St, Springfield",
            "stage": "Design & Documentation",
            "category": "Education",
            "fee": "500000",
            "startDate": "2025-12-01",
            "details": "A new community center in Springfield."
        })
    }

    fn kinds(set: &ViolationSet) -> Vec<(String, ViolationKind)> {
        set.iter().map(|v| (v.field.clone(), v.kind)).collect()
    }

    #[test]
    fn valid_input_produces_typed_fields() {
        let project = validate_project(&input(valid_body()), today()).unwrap();
        assert_eq!(project.name, "New Community Center");
        assert_eq!(project.stage, Stage::DesignAndDocumentation);
        assert_eq!(project.category, Category::Education);
        assert_eq!(project.fee, Some(500000.0));
        assert_eq!(
            project.start_date,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
    }

    #[test]
    fn empty_body_reports_every_required_field_in_order() {
        let err = validate_project(&input(json!({})), today()).unwrap_err();
        let fields: Vec<&str> = err.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            ["name", "location", "stage", "category", "startDate", "details"]
        );
        assert!(err.iter().all(|v| v.kind == ViolationKind::RequiredField));
    }

    #[test]
    fn null_and_empty_string_count_as_missing() {
        let mut body = valid_body();
        body["name"] = json!(null);
        body["details"] = json!("");
        let err = validate_project(&input(body), today()).unwrap_err();
        assert_eq!(
            kinds(&err),
            [
                ("name".to_string(), ViolationKind::RequiredField),
                ("details".to_string(), ViolationKind::RequiredField),
            ]
        );
    }

    #[test]
    fn length_limits_count_characters() {
        let mut body = valid_body();
        body["name"] = json!("é".repeat(200));
        assert!(validate_project(&input(body.clone()), today()).is_ok());

        body["name"] = json!("a".repeat(201));
        body["location"] = json!("b".repeat(501));
        body["details"] = json!("c".repeat(2001));
        let err = validate_project(&input(body), today()).unwrap_err();
        assert!(err.has("name", ViolationKind::TooLong));
        assert!(err.has("location", ViolationKind::TooLong));
        assert!(err.has("details", ViolationKind::TooLong));
        assert_eq!(
            err.for_field("name").next().unwrap().message,
            "Name cannot be longer than 200 characters."
        );
    }

    #[test]
    fn unknown_stage_and_category_are_invalid_choices() {
        let mut body = valid_body();
        body["stage"] = json!("Design");
        body["category"] = json!("retail");
        let err = validate_project(&input(body), today()).unwrap_err();
        assert_eq!(
            kinds(&err),
            [
                ("stage".to_string(), ViolationKind::InvalidChoice),
                ("category".to_string(), ViolationKind::InvalidChoice),
            ]
        );
    }

    #[test]
    fn others_without_text_is_conditional_required() {
        let mut body = valid_body();
        body["category"] = json!("Others");
        body["categoryText"] = json!("");
        let err = validate_project(&input(body.clone()), today()).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has("categoryText", ViolationKind::ConditionalRequired));

        body.as_object_mut().unwrap().remove("categoryText");
        let err = validate_project(&input(body), today()).unwrap_err();
        assert!(err.has("categoryText", ViolationKind::ConditionalRequired));
    }

    #[test]
    fn others_with_text_passes() {
        let mut body = valid_body();
        body["category"] = json!("Others");
        body["categoryText"] = json!("Civic");
        let project = validate_project(&input(body), today()).unwrap();
        assert_eq!(project.category_text.as_deref(), Some("Civic"));
    }

    #[test]
    fn category_text_without_others_is_accepted() {
        let mut body = valid_body();
        body["categoryText"] = json!("Community");
        assert!(validate_project(&input(body), today()).is_ok());
    }

    #[test]
    fn fee_rules() {
        let mut body = valid_body();
        body["fee"] = json!(-1);
        let err = validate_project(&input(body.clone()), today()).unwrap_err();
        assert_eq!(kinds(&err), [("fee".to_string(), ViolationKind::OutOfRange)]);

        body["fee"] = json!("lots");
        let err = validate_project(&input(body.clone()), today()).unwrap_err();
        assert_eq!(kinds(&err), [("fee".to_string(), ViolationKind::InvalidType)]);

        body["fee"] = json!(true);
        let err = validate_project(&input(body.clone()), today()).unwrap_err();
        assert!(err.has("fee", ViolationKind::InvalidType));

        body["fee"] = json!(0);
        assert_eq!(
            validate_project(&input(body.clone()), today()).unwrap().fee,
            Some(0.0)
        );

        body.as_object_mut().unwrap().remove("fee");
        assert_eq!(validate_project(&input(body), today()).unwrap().fee, None);
    }

    #[test]
    fn unparseable_start_date_is_invalid_date() {
        let mut body = valid_body();
        body["startDate"] = json!("2025-13-45");
        let err = validate_project(&input(body.clone()), today()).unwrap_err();
        assert_eq!(
            kinds(&err),
            [("startDate".to_string(), ViolationKind::InvalidDate)]
        );

        body["startDate"] = json!(20251201);
        let err = validate_project(&input(body), today()).unwrap_err();
        assert!(err.has("startDate", ViolationKind::InvalidDate));
    }

    #[test]
    fn rfc3339_start_date_uses_date_part() {
        let mut body = valid_body();
        body["startDate"] = json!("2025-12-01T08:30:00Z");
        let project = validate_project(&input(body), today()).unwrap();
        assert_eq!(
            project.start_date,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
    }

    #[test]
    fn early_stages_require_strictly_future_start() {
        for stage in ["Concept", "Design & Documentation", "Pre-Construction"] {
            for date in ["2025-06-15", "2025-06-14", "2020-01-01"] {
                let mut body = valid_body();
                body["stage"] = json!(stage);
                body["startDate"] = json!(date);
                let err = validate_project(&input(body), today()).unwrap_err();
                assert_eq!(
                    kinds(&err),
                    [("startDate".to_string(), ViolationKind::DateConstraintViolated)],
                    "stage {stage} with start {date}"
                );
            }
        }
    }

    #[test]
    fn tomorrow_is_in_the_future() {
        let mut body = valid_body();
        body["stage"] = json!("Concept");
        body["startDate"] = json!("2025-06-16");
        assert!(validate_project(&input(body), today()).is_ok());
    }

    #[test]
    fn construction_allows_past_start() {
        let mut body = valid_body();
        body["name"] = json!("Community Center");
        body["stage"] = json!("Construction");
        body["category"] = json!("Health");
        body["startDate"] = json!("2020-01-01");
        assert!(validate_project(&input(body), today()).is_ok());
    }

    #[test]
    fn cross_field_rules_run_after_field_rules() {
        let body = json!({
            "name": "",
            "location": "Dock 4",
            "stage": "Concept",
            "category": "Others",
            "fee": -5,
            "startDate": "2020-01-01",
            "details": "Warehouse refit"
        });
        let err = validate_project(&input(body), today()).unwrap_err();
        assert_eq!(
            kinds(&err),
            [
                ("name".to_string(), ViolationKind::RequiredField),
                ("fee".to_string(), ViolationKind::OutOfRange),
                ("categoryText".to_string(), ViolationKind::ConditionalRequired),
                ("startDate".to_string(), ViolationKind::DateConstraintViolated),
            ]
        );
    }

    #[test]
    fn date_rule_skipped_when_stage_is_invalid() {
        let mut body = valid_body();
        body["stage"] = json!("Demolition");
        body["startDate"] = json!("2020-01-01");
        let err = validate_project(&input(body), today()).unwrap_err();
        assert_eq!(
            kinds(&err),
            [("stage".to_string(), ViolationKind::InvalidChoice)]
        );
    }
}
