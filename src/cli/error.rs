//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Serialize(_) => crate::exitcode::SOFTWARE,
            CliError::Application(e) => match e {
                ApplicationError::MissingColumn { .. } => crate::exitcode::DATAERR,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Domain(_) => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let missing = CliError::from(ApplicationError::MissingColumn {
            path: PathBuf::from("staff.csv"),
            column: "Employee ID CardX".into(),
        });
        assert_eq!(missing.exit_code(), crate::exitcode::DATAERR);

        let view = CliError::from(ApplicationError::from(DomainError::UnknownViewMode("x".into())));
        assert_eq!(view.exit_code(), crate::exitcode::CONFIG);

        assert_eq!(
            CliError::InvalidArgs("no node".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
