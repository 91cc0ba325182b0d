//! Harness errors
//!
//! Command-line and registry errors, each mapped to a process exit code.

use thiserror::Error;

/// Exit code for a run where every selected test passed (also help/version)
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a run with at least one failed test
pub const EXIT_TESTS_FAILED: i32 = 1;

/// Errors raised before any test runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Invalid key: '{0}'")]
    StrayValue(String),

    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    #[error("Key '{key}' {expected}")]
    WrongArity { key: String, expected: &'static str },

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("Can not use '{0}' in this context")]
    ForbiddenCombination(String),

    #[error("Test '{0}' is already registered")]
    DuplicateTest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error")]
    UnclassifiedInternal,
}

impl HarnessError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::StrayValue(_) => 100,
            HarnessError::UnknownKey(_)
            | HarnessError::WrongArity { .. }
            | HarnessError::InvalidValue { .. } => 101,
            HarnessError::ForbiddenCombination(_) => 102,
            HarnessError::DuplicateTest(_)
            | HarnessError::Config(_)
            | HarnessError::UnclassifiedInternal => 200,
        }
    }
}
