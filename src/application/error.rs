//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::StepTreeError;

/// Application errors add script/session context; domain errors arrive via `Replay`.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("script line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: StepTreeError,
    },

    #[error("unknown action: {0:?} (expected next, prev, view, hide, destroy or quit)")]
    InvalidAction(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub(crate) fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
