//! Turns console lines into [`CommandEvent`]s, invoking the backend for
//! commands that validate.

use std::io::Write;

use tracing::{debug, warn};

use crate::backend::Backend;

use super::CONSOLE_TARGET;
use super::catalogue::{is_quit_command, write_usage};
use super::command::{Command, parse_command};
use super::errors::CommandError;
use super::event::CommandEvent;
use super::session::{SessionId, SessionSource};

/// Confirmation attached to quit and exit events.
pub const QUIT_MESSAGE: &str = "quit signal";

/// Evaluates console lines against the catalogue and the backend.
///
/// Usage text is written to `usage` whenever an unknown command is entered.
pub struct Dispatcher<B, S, U> {
    backend: B,
    session: S,
    usage: U,
}

impl<B, S, U> Dispatcher<B, S, U>
where
    B: Backend,
    S: SessionSource,
    U: Write,
{
    /// Builds a dispatcher from its collaborators.
    pub const fn new(backend: B, session: S, usage: U) -> Self {
        Self {
            backend,
            session,
            usage,
        }
    }

    /// Processes one raw line.
    ///
    /// Returns `None` for blank lines and exactly one event otherwise. Any
    /// backend call has completed by the time the event is returned.
    pub fn process(&mut self, line: &str) -> Option<CommandEvent> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let args: Vec<&str> = tokens.collect();

        let event = self.evaluate(name, &args);
        metrics::counter!(
            "console_commands_total",
            "command" => metric_label(name),
            "outcome" => event.outcome()
        )
        .increment(1);
        debug!(
            target: CONSOLE_TARGET,
            command = %event.command,
            success = event.success,
            "console line processed"
        );
        Some(event)
    }

    /// Writes the usage banner.
    pub fn print_usage(&mut self) {
        if let Err(error) = write_usage(&mut self.usage) {
            warn!(
                target: CONSOLE_TARGET,
                error = %error,
                "failed to write usage text"
            );
        }
    }

    /// Returns the usage sink, primarily for tests.
    pub const fn usage_output(&self) -> &U {
        &self.usage
    }

    fn evaluate(&mut self, name: &str, args: &[&str]) -> CommandEvent {
        if is_quit_command(name) {
            return CommandEvent::succeeded(name, QUIT_MESSAGE);
        }

        let Some(session) = self.session.current() else {
            let error = CommandError::PreconditionMissing {
                source_name: self.session.describe(),
            };
            return self.reject(name, &error);
        };

        match parse_command(name, args) {
            Ok(command) => {
                self.invoke(&command, &session);
                CommandEvent::succeeded(name, command.confirmation())
            }
            Err(error) => {
                if matches!(error, CommandError::UnknownCommand { .. }) {
                    self.print_usage();
                }
                self.reject(name, &error)
            }
        }
    }

    fn reject(&self, name: &str, error: &CommandError) -> CommandEvent {
        debug!(
            target: CONSOLE_TARGET,
            command = name,
            reason = error.as_label(),
            "console line rejected"
        );
        CommandEvent::failed(name, error)
    }

    fn invoke(&self, command: &Command, session: &SessionId) {
        match command {
            Command::CreateBlockchain { address } => {
                self.backend.create_blockchain(address, session);
            }
            Command::GetBalance { address } => self.backend.get_balance(address, session),
            Command::Send(transfer) => self.backend.send(transfer, session),
            Command::CreateWallet => self.backend.create_wallet(session),
            Command::ListAddresses => self.backend.list_addresses(session),
            Command::PrintChain => self.backend.print_chain(session),
            Command::ReindexUtxo => self.backend.reindex_utxo(session),
        }
    }
}

fn metric_label(name: &str) -> &'static str {
    if is_quit_command(name) {
        return "quit";
    }
    super::catalogue::lookup(name).map_or("unknown", |spec| spec.name)
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
