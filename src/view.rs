//! View models for the three screens and their text rendering.

use std::fmt;

use crate::session::{ScanMode, ScanSession};

/// Title shown on the home screen
pub const HOME_TITLE: &str = "QR Code Scanner";

/// Side of the framing rectangle drawn over the camera preview
const FRAME_SIDE: usize = 20;

/// A button the user can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the camera
    ScanQrCode,
    /// Pick a photo and look for a QR code in it
    UploadQrCode,
    /// Leave the camera screen
    Cancel,
    /// Launch the decoded text as a URL
    Open,
    /// Copy the decoded text
    Copy,
    /// Share the decoded text
    Share,
    /// Drop the result and scan again
    ScanAgain,
    /// Drop the result and go back to the landing screen
    Home,
}

impl Action {
    /// Every action, in display order
    pub const ALL: [Action; 8] = [
        Action::ScanQrCode,
        Action::UploadQrCode,
        Action::Cancel,
        Action::Open,
        Action::Copy,
        Action::Share,
        Action::ScanAgain,
        Action::Home,
    ];

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Action::ScanQrCode => "Scan QR Code",
            Action::UploadQrCode => "Upload QR Code",
            Action::Cancel => "Cancel",
            Action::Open => "Open",
            Action::Copy => "Copy",
            Action::Share => "Share",
            Action::ScanAgain => "Scan Again",
            Action::Home => "Home",
        }
    }

    /// Word typed in the terminal to press the button
    pub fn keyword(self) -> &'static str {
        match self {
            Action::ScanQrCode => "scan",
            Action::UploadQrCode => "upload",
            Action::Cancel => "cancel",
            Action::Open => "open",
            Action::Copy => "copy",
            Action::Share => "share",
            Action::ScanAgain => "again",
            Action::Home => "home",
        }
    }

    /// Look up an action by its keyword
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.keyword() == word)
    }
}

/// What is on screen for a given session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Landing screen
    Home,
    /// Camera preview
    Scanning,
    /// Decoded payload
    Result {
        /// Text to show
        decoded_text: String,
    },
}

impl Screen {
    /// Build the screen for the session's current mode
    pub fn for_session(session: &ScanSession) -> Self {
        match session.mode() {
            ScanMode::Home => Screen::Home,
            ScanMode::Scanning => Screen::Scanning,
            ScanMode::Result => Screen::Result {
                decoded_text: session.decoded_text().to_string(),
            },
        }
    }

    /// Buttons available on this screen
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Screen::Home => &[Action::ScanQrCode, Action::UploadQrCode],
            Screen::Scanning => &[Action::Cancel],
            Screen::Result { .. } => &[
                Action::Open,
                Action::Copy,
                Action::Share,
                Action::ScanAgain,
                Action::Home,
            ],
        }
    }

    /// Whether `action` has a button on this screen
    pub fn offers(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => writeln!(f, "{HOME_TITLE}")?,
            Screen::Scanning => {
                let edge = format!("+{}+", "-".repeat(FRAME_SIDE));
                writeln!(f, "{edge}")?;
                for row in 0..FRAME_SIDE / 4 {
                    if row == FRAME_SIDE / 8 {
                        writeln!(f, "|{:^width$}|", "point at a QR code", width = FRAME_SIDE)?;
                    } else {
                        writeln!(f, "|{}|", " ".repeat(FRAME_SIDE))?;
                    }
                }
                writeln!(f, "{edge}")?;
            }
            Screen::Result { decoded_text } => writeln!(f, "Scanned Data: {decoded_text}")?,
        }
        let buttons: Vec<String> = self
            .actions()
            .iter()
            .map(|a| format!("[{}] ({})", a.label(), a.keyword()))
            .collect();
        write!(f, "{}", buttons.join("  "))
    }
}
