//! Log line formats for the console's stderr diagnostics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Shape of the diagnostics written to stderr beside the operator prompt.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers reading a redirected stderr.
    Json,
    /// Short text lines for an operator watching the console.
    #[default]
    Compact,
}

impl LogFormat {
    /// Whether colour codes may be emitted in this format.
    #[must_use]
    pub const fn allows_ansi(self) -> bool {
        matches!(self, Self::Compact)
    }

    /// Whether timestamps are kept when stderr is an interactive terminal.
    ///
    /// Compact lines drop them there so they stay short next to the prompt.
    /// Machine-read JSON always carries them.
    #[must_use]
    pub const fn timestamps_when_interactive(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;
