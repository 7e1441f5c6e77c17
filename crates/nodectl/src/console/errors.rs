//! Per-line failures reported back to the operator.
//!
//! None of these stop the console. Each one becomes the `message` of a failed
//! [`CommandEvent`](super::CommandEvent).

use thiserror::Error;

use super::flags::FlagError;

/// Reasons a console line was not dispatched to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The session identity was absent when the line was read.
    #[error("{source_name} is not set!")]
    PreconditionMissing {
        /// Description of where the identity is expected to come from.
        source_name: String,
    },
    /// Flags were syntactically malformed.
    #[error("error parsing parameters: {source}")]
    Parse {
        /// Underlying flag error.
        #[source]
        source: FlagError,
    },
    /// Flags parsed but failed the command's constraints.
    #[error("error: {message}")]
    Validation {
        /// Constraint that was violated.
        message: &'static str,
    },
    /// The command name is not in the catalogue.
    #[error("unknown command {name}")]
    UnknownCommand {
        /// Name as typed.
        name: String,
    },
}

impl CommandError {
    /// Returns a short stable label (`snake_case`) for logs and metrics.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::PreconditionMissing { .. } => "precondition_missing",
            Self::Parse { .. } => "parse_error",
            Self::Validation { .. } => "validation_error",
            Self::UnknownCommand { .. } => "unknown_command",
        }
    }
}

impl From<FlagError> for CommandError {
    fn from(source: FlagError) -> Self {
        Self::Parse { source }
    }
}
