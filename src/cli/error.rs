//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(e) => match e {
                    ApplicationError::Script { .. } | ApplicationError::Replay { .. } => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::InvalidAction(_) => crate::exitcode::USAGE,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { source, .. } => {
                        match source.downcast_ref::<std::io::Error>() {
                            Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                                crate::exitcode::NOINPUT
                            }
                            _ => crate::exitcode::IOERR,
                        }
                    }
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StepTreeError;

    #[test]
    fn given_replay_failure_when_mapping_exit_code_then_dataerr() {
        let err: CliError = ApplicationError::Replay {
            line: 3,
            source: StepTreeError::NoOpenNode,
        }
        .into();

        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(
            err.to_string(),
            "script line 3: no open node: end() called with an empty parent stack"
        );
    }

    fn read_failure(kind: std::io::ErrorKind) -> CliError {
        ApplicationError::OperationFailed {
            context: "read script: deck.txt".into(),
            source: Box::new(std::io::Error::from(kind)),
        }
        .into()
    }

    #[test]
    fn given_missing_script_when_mapping_exit_code_then_noinput() {
        let err = read_failure(std::io::ErrorKind::NotFound);

        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_unreadable_script_when_mapping_exit_code_then_ioerr() {
        let err = read_failure(std::io::ErrorKind::PermissionDenied);

        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }

    #[test]
    fn given_usage_error_when_mapping_exit_code_then_usage() {
        let err = CliError::Usage("no command".into());

        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
