//! Schema validation of decoded responses
//!
//! A response is validated in two steps: a typed decode (shape and field
//! types), then [`Validate::validate`] for value constraints the type system
//! does not express (positive page counts and the like). Both steps report
//! failures as a [`ValidationError`] listing every issue found.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Location of the offending value (`page`, `data[2].id`, ...)
    pub path: String,
    /// What was wrong with it
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All issues found in one response
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    /// The issues, in the order they were found
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// An error with a single issue
    #[must_use]
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.into(),
                message: message.into(),
            }],
        }
    }
}

/// Value constraints checked after a successful typed decode
pub trait Validate {
    /// Check every constraint, collecting all issues
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing each violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects issues while walking a value
#[derive(Debug, Default)]
pub struct Issues(Vec<ValidationIssue>);

impl Issues {
    /// Record an issue
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Require `value` to be a positive integer
    pub fn positive(&mut self, path: &str, value: i64) {
        if value <= 0 {
            self.push(path, format!("expected a positive integer, got {value}"));
        }
    }

    /// `Ok` when nothing was recorded
    ///
    /// # Errors
    ///
    /// Returns the recorded issues as a [`ValidationError`].
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

/// Decode `value` as `T` and validate it
///
/// Decode failures are reported as a validation issue at the root path (`$`)
/// so a malformed response and an out-of-range value are rejected the same way.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the decode or any constraint fails.
pub fn parse_validated<T>(value: Value) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(value).map_err(|e| ValidationError::single("$", e.to_string()))?;
    parsed.validate()?;
    Ok(parsed)
}
