//! Unique project code generation.
//!
//! A code is the first two characters of the project name, upper-cased,
//! followed by a random four-digit suffix (`"CO0427"`). Uniqueness is owned
//! by the store: [`CodeStore::code_exists`] is only a pre-filter, and the
//! store's insert reports [`Claim::Taken`] when its unique constraint rejects
//! the candidate. Both cases draw a fresh candidate, up to a bounded number
//! of attempts.

use std::future::Future;

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of leading name characters used as the code prefix.
pub const CODE_PREFIX_CHARS: usize = 2;

/// Largest numeric suffix (inclusive). Suffixes are zero-padded to 4 digits.
pub const MAX_CODE_SUFFIX: u16 = 9999;

/// Default bound on candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

// ---------------------------------------------------------------------------
// Code formatting
// ---------------------------------------------------------------------------

/// Upper-cased prefix taken from the first [`CODE_PREFIX_CHARS`] characters of
/// `name`. Names shorter than that use what they have; nothing is padded.
pub fn code_prefix(name: &str) -> String {
    name.chars()
        .take(CODE_PREFIX_CHARS)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Join a prefix and a numeric suffix into a code.
pub fn format_code(prefix: &str, suffix: u16) -> String {
    format!("{prefix}{suffix:04}")
}

/// Whether `code` has the shape produced for `name`.
pub fn matches_name(code: &str, name: &str) -> bool {
    let prefix = code_prefix(name);
    code.strip_prefix(prefix.as_str())
        .is_some_and(|digits| digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// Store collaborator
// ---------------------------------------------------------------------------

/// Result of trying to persist a record under a candidate code.
#[derive(Debug, Clone, PartialEq)]
pub enum Claim<T> {
    /// The record was stored with the candidate code.
    Stored(T),
    /// The unique constraint rejected the candidate.
    Taken,
}

/// Storage side of the code-uniqueness protocol.
pub trait CodeStore: Sync {
    /// The stored record returned on success.
    type Output: Send;
    type Error: Send;

    /// Cheap pre-check. A `false` answer is not a reservation.
    fn code_exists(&self, code: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Persist the pending record under `code`, atomically against the
    /// store's uniqueness constraint.
    fn insert_with_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Claim<Self::Output>, Self::Error>> + Send;
}

/// Failure of [`CodeGenerator::insert_unique`].
#[derive(Debug, thiserror::Error)]
pub enum CodeError<E> {
    #[error("no unique code found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("store error: {0}")]
    Store(E),
}

impl<E> CodeError<E> {
    /// Convert to a [`CoreError`], handing store errors to `store`.
    pub fn into_core(self, store: impl FnOnce(E) -> CoreError) -> CoreError {
        match self {
            CodeError::Exhausted { attempts } => CoreError::CodeGenerationExhausted { attempts },
            CodeError::Store(err) => store(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Draws candidate codes from an owned randomness source.
///
/// Pass a seeded RNG to get a reproducible candidate sequence.
#[derive(Debug)]
pub struct CodeGenerator<R> {
    rng: R,
    max_attempts: u32,
}

impl<R: Rng> CodeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_max_attempts(rng, DEFAULT_MAX_ATTEMPTS)
    }

    /// A `max_attempts` of zero is raised to one.
    pub fn with_max_attempts(rng: R, max_attempts: u32) -> Self {
        Self {
            rng,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw one candidate code for `name`.
    pub fn candidate(&mut self, name: &str) -> String {
        let suffix = self.rng.random_range(0..=MAX_CODE_SUFFIX);
        format_code(&code_prefix(name), suffix)
    }

    /// Insert the store's pending record under a fresh unique code.
    pub async fn insert_unique<S>(
        &mut self,
        name: &str,
        store: &S,
    ) -> Result<S::Output, CodeError<S::Error>>
    where
        S: CodeStore,
    {
        for attempt in 1..=self.max_attempts {
            let code = self.candidate(name);

            if store.code_exists(&code).await.map_err(CodeError::Store)? {
                tracing::debug!(%code, attempt, "Project code already in use, drawing again");
                continue;
            }

            match store
                .insert_with_code(&code)
                .await
                .map_err(CodeError::Store)?
            {
                Claim::Stored(record) => return Ok(record),
                Claim::Taken => {
                    tracing::debug!(%code, attempt, "Project code taken on insert, drawing again");
                }
            }
        }

        tracing::warn!(
            name,
            attempts = self.max_attempts,
            "Gave up generating a unique project code"
        );
        Err(CodeError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
