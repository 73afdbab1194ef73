use crate::domain::model::QueueKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("The {queue} queue is empty")]
    EmptyQueue { queue: QueueKind },

    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Report rendering error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Checked status from the queues, e.g. popping an empty queue.
    Queue,
    /// Caller-supplied value rejected by the core.
    Input,
    Configuration,
    System,
}

impl SchedulerError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyQueue { .. } => ErrorCategory::Queue,
            Self::InvalidArgument { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_)
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. } => ErrorCategory::System,
        }
    }

    /// Short message suitable for printing straight to the operator.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::EmptyQueue { queue } => format!("No patients in the {} queue.", queue),
            Self::InvalidArgument { field, reason, .. } => {
                format!("Invalid {}: {}", field.replace('_', " "), reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Queue => "Add a patient before removing one",
            ErrorCategory::Input => "Check the entered value and try again",
            ErrorCategory::Configuration => {
                "Check the configuration file and command line overrides"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
