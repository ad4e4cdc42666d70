//! In-memory scan session: which screen is showing and what was last decoded.

use std::fmt;

/// Screen the session is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Landing screen with the scan and upload buttons
    #[default]
    Home,
    /// Camera preview is live and waiting for a code
    Scanning,
    /// A decoded payload is shown with its actions
    Result,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanMode::Home => "home",
            ScanMode::Scanning => "scanning",
            ScanMode::Result => "result",
        };
        f.write_str(name)
    }
}

/// Mode plus last decoded text.
///
/// Fields are private so the pairing rules hold for every value:
/// `Result` always carries non-empty text and `Home` always carries none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanSession {
    mode: ScanMode,
    decoded_text: String,
}

impl ScanSession {
    /// Fresh session on the home screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Last decoded text, empty if nothing has been decoded
    pub fn decoded_text(&self) -> &str {
        &self.decoded_text
    }

    /// True when there is a payload the result actions can act on
    pub fn has_decoded(&self) -> bool {
        !self.decoded_text.is_empty()
    }

    /// Enter the camera screen with no payload
    pub(crate) fn enter_scanning(&mut self) {
        self.decoded_text.clear();
        self.mode = ScanMode::Scanning;
    }

    /// Return to the landing screen, dropping any payload
    pub(crate) fn enter_home(&mut self) {
        self.decoded_text.clear();
        self.mode = ScanMode::Home;
    }

    /// Record a decoded payload and leave the camera screen.
    ///
    /// An empty payload lands on `Home`, since `Result` needs text to show.
    pub(crate) fn record_decoded(&mut self, text: String) {
        if text.is_empty() {
            self.enter_home();
        } else {
            self.decoded_text = text;
            self.mode = ScanMode::Result;
        }
    }

    /// Check the mode/text pairing
    pub fn is_consistent(&self) -> bool {
        match self.mode {
            ScanMode::Home => self.decoded_text.is_empty(),
            ScanMode::Scanning => true,
            ScanMode::Result => !self.decoded_text.is_empty(),
        }
    }
}
