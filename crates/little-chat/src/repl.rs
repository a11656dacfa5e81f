use std::io::{self, Write};
use std::pin::pin;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use little_chat_core::{Session, Turn};
use little_chat_model::ModelProviderError;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

/// Typing this line ends the session.
pub const EXIT_COMMAND: &str = "exit_chat";

const BAR_CHAR: &str = "▎";

/// The console loop: reads one line per turn, sends it through the
/// session and prints the outcome.
///
/// Per-turn failures are printed and the loop moves on to the next line.
/// Only the exit command, the end of input or an I/O error on the console
/// itself stop it.
pub struct Repl {
    session: Session,
    show_progress: bool,
    colored: bool,
}

impl Repl {
    /// Creates a REPL around the session. The progress spinner and
    /// colors are off.
    #[inline]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            show_progress: false,
            colored: false,
        }
    }

    /// Shows a spinner on stderr while waiting for the model.
    #[inline]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Marks replies and errors with a colored bar. Only enable it when the
    /// output is a terminal.
    #[inline]
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Returns the underlying session.
    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the loop until the exit command or the end of `input`.
    pub async fn run<R, W>(
        &mut self,
        mut input: R,
        output: &mut W,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        loop {
            write!(output, "You: ")?;
            output.flush()?;

            let Some(line) = read_line(&mut input).await? else {
                writeln!(output)?;
                break;
            };
            if line.trim() == EXIT_COMMAND {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match self.exchange(&line).await {
                Ok(Turn::Reply(msg)) => {
                    if self.colored {
                        write!(output, "{}", BAR_CHAR.bright_cyan())?;
                    }
                    writeln!(output, "Assistant: {}", msg.content())?;
                }
                Ok(Turn::NoReply) => {
                    writeln!(output, "No response from the assistant.")?;
                }
                Err(err) => {
                    if self.colored {
                        write!(output, "{}", BAR_CHAR.bright_red())?;
                    }
                    writeln!(output, "Error: {err}")?;
                }
            }
            output.flush()?;
        }

        debug!(
            "session ended with {} messages",
            self.session.conversation().len()
        );
        writeln!(output, "Goodbye!")?;
        output.flush()
    }

    async fn exchange(
        &mut self,
        line: &str,
    ) -> Result<Turn, Box<dyn ModelProviderError>> {
        let progress_bar = self.show_progress.then(|| {
            let progress_bar = ProgressBar::new_spinner();
            progress_bar.set_style(progress_style());
            progress_bar.set_message("🤔 Thinking...");
            progress_bar
        });

        let mut turn = pin!(self.session.send_message(line));
        let outcome = loop {
            if let Some(progress_bar) = &progress_bar {
                progress_bar.inc(1);
            }
            select! {
                outcome = &mut turn => break outcome,
                _ = sleep(Duration::from_millis(100)) => {}
            }
        };

        // Finish the progress bar before printing anything else.
        if let Some(progress_bar) = progress_bar {
            progress_bar.finish_and_clear();
        }
        outcome
    }
}

/// Reads one line without its line ending. Invalid UTF-8 is replaced
/// rather than reported, so a stray byte can't end the session.
async fn read_line<R: AsyncBufRead + Unpin>(
    input: &mut R,
) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}
