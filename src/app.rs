//! Line-oriented terminal host for the scan flow.
//!
//! Each input line is one event: a button keyword, `back`, `help` or `quit`.
//! While the camera screen is showing, the camera is polled before every
//! prompt so detections land without user input.

use std::io::{self, Write};

use tracing::info;

use crate::controller::{BackOutcome, ScanEvent, ScanFlowController};
use crate::platform::LineSource;
use crate::view::Action;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the controller
    Event(ScanEvent),
    /// Print the command list
    Help,
    /// Leave the loop
    Quit,
    /// Blank line
    Empty,
    /// Anything else
    Unknown(String),
}

/// Parse one line of user input
pub fn parse_command(line: &str) -> Command {
    let word = line.trim().to_lowercase();
    match word.as_str() {
        "" => Command::Empty,
        "back" => Command::Event(ScanEvent::BackPressed),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match Action::from_keyword(other) {
            Some(action) => Command::Event(ScanEvent::Action(action)),
            None => Command::Unknown(other.to_string()),
        },
    }
}

/// Terminal event loop around a controller
pub struct ScanApp<L, W> {
    controller: ScanFlowController,
    input: L,
    out: W,
}

impl<L: LineSource, W: Write> ScanApp<L, W> {
    /// Loop reading commands from `input` and rendering to `out`
    pub fn new(controller: ScanFlowController, input: L, out: W) -> Self {
        Self {
            controller,
            input,
            out,
        }
    }

    /// Controller being driven
    pub fn controller(&self) -> &ScanFlowController {
        &self.controller
    }

    /// Consume the app, returning the output writer
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit`, end of input, or an unhandled back press
    pub fn run(&mut self) -> io::Result<()> {
        self.render()?;
        loop {
            if self.controller.poll_camera() {
                self.render()?;
                continue;
            }

            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = self.input.next_line()? else {
                info!("input closed");
                break;
            };

            match parse_command(&line) {
                Command::Empty => {}
                Command::Help => self.help()?,
                Command::Quit => break,
                Command::Unknown(word) => {
                    writeln!(self.out, "Unknown command '{word}'. Type 'help'.")?;
                }
                Command::Event(event) => {
                    if self.controller.handle(event) == BackOutcome::NotHandled {
                        info!("back pressed outside the camera, exiting");
                        break;
                    }
                    self.render()?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.controller.screen())
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        for action in Action::ALL {
            writeln!(self.out, "  {:<8} {}", action.keyword(), action.label())?;
        }
        writeln!(self.out, "  {:<8} Hardware back", "back")?;
        writeln!(self.out, "  {:<8} Exit", "quit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_command("  Scan "),
            Command::Event(ScanEvent::Action(Action::ScanQrCode))
        );
        assert_eq!(
            parse_command("back"),
            Command::Event(ScanEvent::BackPressed)
        );
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(
            parse_command("launch"),
            Command::Unknown("launch".to_string())
        );
    }
}
