//! Capability seams the scan flow calls out to.
//!
//! Each trait wraps one external collaborator (camera, gallery, detector,
//! clipboard, share target, URL launcher, haptics, notification surface).
//! The controller treats them as opaque; hosts and tests plug in providers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reference to an image chosen from the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    /// Wrap a path to an image file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Filesystem location of the image
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// What the gallery picker returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// User backed out of the picker
    Cancelled,
    /// Picker reported an error
    Failed(String),
    /// An image was selected
    Picked(ImageRef),
}

/// Message shown in a blocking dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
}

impl Notification {
    /// Dialog with a title and body
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Dialog titled "Error"
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

/// Which lens the camera should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    /// Rear camera
    #[default]
    Back,
    /// Selfie camera
    Front,
}

/// Camera activation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Lens to open
    #[serde(default)]
    pub facing: CameraFacing,
    /// Whether audio is recorded alongside frames
    #[serde(default)]
    pub capture_audio: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            capture_audio: false,
        }
    }
}

/// One recognised barcode reported by the camera.
///
/// Native decoders may report a code with no payload; `data` is `None` then.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeEvent {
    /// Decoded payload, if the decoder produced one
    pub data: Option<String>,
}

impl CodeEvent {
    /// Event carrying decoded text
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    /// Payload with an absent value read as the empty string
    pub fn into_text(self) -> String {
        self.data.unwrap_or_default()
    }
}

/// Live camera with an attached barcode decoder
pub trait Camera {
    /// Open the camera with the given settings
    fn start(&mut self, config: &CameraConfig) -> Result<()>;

    /// Release the camera; stopping an idle camera is a no-op
    fn stop(&mut self);

    /// Next recognised code, if one is ready
    fn poll(&mut self) -> Option<CodeEvent>;

    /// Whether the camera is currently open
    fn is_active(&self) -> bool;
}

/// Photo library picker
pub trait GalleryPicker {
    /// Let the user choose one image
    fn pick(&mut self) -> PickOutcome;
}

/// Finds QR codes in a still image
pub trait ImageDetector {
    /// All decoded payloads in the image, possibly none
    fn detect(&self, image: &ImageRef) -> Result<Vec<String>>;
}

/// System clipboard
pub trait Clipboard {
    /// Replace the clipboard contents
    fn write(&mut self, text: &str) -> Result<()>;
}

/// System share target
pub trait ShareSheet {
    /// Hand text to the share target
    fn share(&mut self, text: &str) -> Result<()>;
}

/// Opens URLs in their registered handler
pub trait UrlLauncher {
    /// Launch `url`; fails when it is not a launchable URL
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Vibration motor
pub trait Haptics {
    /// Short feedback pulse
    fn pulse(&mut self);
}

/// Blocking dialog surface
pub trait Notifier {
    /// Show a dialog
    fn notify(&mut self, notification: Notification);
}

/// Every provider the scan flow needs, owned by the controller
pub struct Capabilities {
    /// Camera and live decoder
    pub camera: Box<dyn Camera>,
    /// Gallery picker
    pub gallery: Box<dyn GalleryPicker>,
    /// Still-image QR detector
    pub detector: Box<dyn ImageDetector>,
    /// Clipboard
    pub clipboard: Box<dyn Clipboard>,
    /// Share target
    pub share: Box<dyn ShareSheet>,
    /// URL launcher
    pub launcher: Box<dyn UrlLauncher>,
    /// Haptic feedback
    pub haptics: Box<dyn Haptics>,
    /// Dialog surface
    pub notifier: Box<dyn Notifier>,
}
