//! Outcome record published for each processed console line.

use std::fmt;

use super::catalogue::is_quit_command;
use super::errors::CommandError;

/// Outcome of processing one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    /// Recognised command name, or the raw first token when unrecognised.
    pub command: String,
    /// `true` when the command was recognised, validated, and dispatched.
    pub success: bool,
    /// Operator-facing description of the outcome.
    pub message: String,
}

impl CommandEvent {
    /// Builds a successful event.
    #[must_use]
    pub fn succeeded(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            message: message.into(),
        }
    }

    /// Builds a failed event from the error that stopped the line.
    #[must_use]
    pub fn failed(command: impl Into<String>, error: &CommandError) -> Self {
        Self {
            command: command.into(),
            success: false,
            message: error.to_string(),
        }
    }

    /// Returns `true` when this event asks the process to stop.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.success && is_quit_command(&self.command)
    }

    /// Outcome label used for metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        if self.success { "success" } else { "failure" }
    }
}

impl fmt::Display for CommandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command [{}], success: {}, message: {}",
            self.command, self.success, self.message
        )
    }
}
