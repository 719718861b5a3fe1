//! Error types for scheduling runs.

use crate::validation::ValidationError;

/// Errors that can occur before or while setting up a scheduling run.
///
/// A low-fitness result is never an error: it is returned as data.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A precondition of the search does not hold (nothing to schedule,
    /// zero offset window, empty population, probability out of range).
    #[error("InvalidState: {0}")]
    InvalidState(String),
    /// The input plan failed integrity checks.
    #[error("ValidationError: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),
    /// A configuration document could not be parsed.
    #[error("ConfigError: {0}")]
    Config(#[from] serde_json::Error),
    /// The evaluation thread pool could not be built.
    #[error("ThreadPoolError: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScheduleError {
    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

/// Result alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, ActionKind, ActionPlan, ServerSettings};
    use crate::validation::validate_input;

    #[test]
    fn test_invalid_state_message() {
        let err = ScheduleError::invalid_state("offset window is zero");
        assert_eq!(err.to_string(), "InvalidState: offset window is zero");
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let plan = ActionPlan::new().with_action(Action::new("A1", "T1", ActionKind::Ram, 0));
        let errors = validate_input(&plan, &ServerSettings::default()).unwrap_err();
        let err = ScheduleError::from(errors);
        let message = err.to_string();
        assert!(message.starts_with("ValidationError: "));
        assert!(message.contains("unknown actor 'A1'"));
        assert!(message.contains("unknown target 'T1'"));
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ScheduleError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, ScheduleError::Config(_)));
    }
}
