//! Terminal-backed clipboard, share target, haptics and dialogs.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::capability::{Clipboard, Haptics, Notification, Notifier, ShareSheet};
use crate::error::{Result, ScanError};

/// Sets the terminal's clipboard with an OSC 52 escape sequence
#[derive(Debug)]
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard writing escapes to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<io::Stdout> {
    /// Clipboard on the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        let encoded = STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{encoded}\x07")
            .and_then(|_| self.out.flush())
            .map_err(|e| ScanError::Clipboard(e.to_string()))?;
        debug!(len = text.len(), "clipboard set");
        Ok(())
    }
}

/// Share target that writes the payload to a stream
#[derive(Debug)]
pub struct ConsoleShare<W> {
    out: W,
}

impl<W: Write> ConsoleShare<W> {
    /// Share into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleShare<io::Stdout> {
    /// Share to the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ShareSheet for ConsoleShare<W> {
    fn share(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "Shared: {text}")
            .and_then(|_| self.out.flush())
            .map_err(|e| ScanError::Share(e.to_string()))
    }
}

/// Rings the terminal bell in place of a vibration
#[derive(Debug)]
pub struct TerminalHaptics<W> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalHaptics<W> {
    /// Bell on `out`, silent when `enabled` is false
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    /// Consume and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalHaptics<io::Stdout> {
    /// Bell on the process stdout
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> Haptics for TerminalHaptics<W> {
    fn pulse(&mut self) {
        if !self.enabled {
            return;
        }
        // bell is best effort
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

/// Prints dialogs as boxed text
#[derive(Debug)]
pub struct ConsoleNotifier<W> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    /// Dialogs on `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleNotifier<io::Stdout> {
    /// Dialogs on the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, notification: Notification) {
        let width = notification
            .title
            .chars()
            .count()
            .max(notification.message.chars().count())
            + 2;
        let edge = format!("+{}+", "-".repeat(width));
        let result = writeln!(self.out, "{edge}")
            .and_then(|_| writeln!(self.out, "| {:<w$} |", notification.title, w = width - 2))
            .and_then(|_| writeln!(self.out, "| {:<w$} |", notification.message, w = width - 2))
            .and_then(|_| writeln!(self.out, "{edge}"))
            .and_then(|_| self.out.flush());
        if let Err(err) = result {
            warn!(error = %err, title = %notification.title, "dialog not shown");
        }
    }
}
