//! Background reader that feeds console lines to the dispatcher.

use std::io::{self, BufRead, Write};
use std::thread;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::backend::Backend;

use super::CONSOLE_TARGET;
use super::dispatcher::Dispatcher;
use super::event::CommandEvent;
use super::session::SessionSource;

/// Prompt written before each read.
pub const PROMPT: &str = "> ";

/// Acknowledgement written after a quit command has been published.
pub const QUIT_ACKNOWLEDGEMENT: &str = "listener is ready to quit...";

/// Why the listener stopped.
#[derive(Debug)]
pub enum ListenerExit {
    /// A quit or exit command was published.
    Quit,
    /// The input stream reached end of file.
    EndOfInput,
    /// Reading from the input stream failed.
    ReadFailed(io::Error),
    /// The consumer dropped its receiver.
    ConsumerGone,
}

/// Reads lines from `input`, dispatches them, and publishes the outcomes.
///
/// Events are published in the order their lines were read. The sender is
/// dropped when the listener stops, so the consumer observes end of stream.
pub struct InputListener<R, W, B, S, U> {
    input: R,
    prompt: W,
    dispatcher: Dispatcher<B, S, U>,
}

impl<R, W, B, S, U> InputListener<R, W, B, S, U>
where
    R: BufRead,
    W: Write,
    B: Backend,
    S: SessionSource,
    U: Write,
{
    /// Builds a listener over `input`, writing prompts to `prompt`.
    pub const fn new(input: R, prompt: W, dispatcher: Dispatcher<B, S, U>) -> Self {
        Self {
            input,
            prompt,
            dispatcher,
        }
    }

    /// Runs the read loop on the current thread until it terminates.
    ///
    /// Uses blocking sends, so it must not be called from inside an async
    /// task.
    pub fn run(mut self, events: &mpsc::Sender<CommandEvent>) -> ListenerExit {
        self.dispatcher.print_usage();
        let mut raw = Vec::new();
        loop {
            self.write_prompt();
            raw.clear();
            match self.input.read_until(b'\n', &mut raw) {
                Ok(0) => {
                    info!(target: CONSOLE_TARGET, "console input closed");
                    return ListenerExit::EndOfInput;
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(
                        target: CONSOLE_TARGET,
                        error = %error,
                        "failed to read console input"
                    );
                    return ListenerExit::ReadFailed(error);
                }
            }

            // Invalid UTF-8 still reaches the dispatcher as replacement characters.
            let line = String::from_utf8_lossy(&raw);
            let Some(event) = self.dispatcher.process(&line) else {
                continue;
            };
            let quit = event.is_quit();
            if events.blocking_send(event).is_err() {
                info!(target: CONSOLE_TARGET, "event consumer gone; stopping listener");
                return ListenerExit::ConsumerGone;
            }
            if quit {
                self.write_line(QUIT_ACKNOWLEDGEMENT);
                return ListenerExit::Quit;
            }
        }
    }

    fn write_prompt(&mut self) {
        let result = self
            .prompt
            .write_all(PROMPT.as_bytes())
            .and_then(|()| self.prompt.flush());
        if let Err(error) = result {
            warn!(target: CONSOLE_TARGET, error = %error, "failed to write prompt");
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(error) = writeln!(self.prompt, "{text}") {
            warn!(target: CONSOLE_TARGET, error = %error, "failed to write console output");
        }
    }
}

impl<R, W, B, S, U> InputListener<R, W, B, S, U>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
    B: Backend + 'static,
    S: SessionSource + 'static,
    U: Write + Send + 'static,
{
    /// Moves the listener onto a dedicated thread.
    ///
    /// The thread is detached by callers that exit without joining it, which
    /// is how a read blocked on stdin is abandoned at process exit.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the thread cannot be spawned.
    pub fn spawn(
        self,
        events: mpsc::Sender<CommandEvent>,
    ) -> io::Result<thread::JoinHandle<ListenerExit>> {
        thread::Builder::new()
            .name("console-listener".to_owned())
            .spawn(move || self.run(&events))
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
