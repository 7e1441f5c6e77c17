//! Operator console: command catalogue, line parsing, dispatch, and the
//! background input listener.
//!
//! Parsing and validation ([`parse_command`]) are pure. The [`Dispatcher`]
//! adds the per-line session check and the backend call, and the
//! [`InputListener`] drives it from a blocking reader on its own thread.

mod catalogue;
mod command;
mod dispatcher;
mod errors;
mod event;
mod flags;
mod listener;
mod session;

pub use catalogue::{COMMANDS, CommandSpec, QUIT_COMMANDS, is_quit_command, write_usage};
pub use command::{Command, Transfer, parse_command};
pub use dispatcher::{Dispatcher, QUIT_MESSAGE};
pub use errors::CommandError;
pub use event::CommandEvent;
pub use flags::{FlagError, FlagKind, FlagSpec, FlagValue, ParsedFlags, parse_flags};
pub use listener::{InputListener, ListenerExit, PROMPT, QUIT_ACKNOWLEDGEMENT};
pub use session::{EnvSession, FixedSession, SessionId, SessionSource};

pub(crate) const CONSOLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::console");
