//! Desktop capability providers used by the terminal host.
//!
//! - `launcher`: URL launching through the OS handler
//! - `terminal`: clipboard (OSC 52), share target, bell haptics, dialogs
//! - `gallery`: photo picker over an image directory
//! - `camera`: camera stand-in that decodes frames from a directory
//! - `input`: line sources shared by the picker and the event loop

pub mod camera;
pub mod gallery;
pub mod input;
pub mod launcher;
pub mod terminal;

pub use camera::FrameDirCamera;
pub use gallery::DirectoryGallery;
pub use input::{LineSource, ReaderLines, StdinLines};
pub use launcher::{SystemUrlLauncher, is_launchable_url};
pub use terminal::{ConsoleNotifier, ConsoleShare, Osc52Clipboard, TerminalHaptics};

use std::io;

use crate::capability::Capabilities;
use crate::config::ScanConfig;
use crate::detect::ImageQrDetector;

/// Providers for an interactive terminal session on stdin/stdout
pub fn desktop_capabilities(config: &ScanConfig) -> Capabilities {
    let detector = ImageQrDetector::with_max_dim(config.detector.max_dim);
    Capabilities {
        camera: Box::new(FrameDirCamera::new(
            config.camera.frames_dir.clone(),
            detector,
        )),
        gallery: Box::new(DirectoryGallery::new(
            config.gallery.dir.clone(),
            StdinLines,
            io::stdout(),
        )),
        detector: Box::new(detector),
        clipboard: Box::new(Osc52Clipboard::stdout()),
        share: Box::new(ConsoleShare::stdout()),
        launcher: Box::new(SystemUrlLauncher),
        haptics: Box::new(TerminalHaptics::stdout(config.haptics.enabled)),
        notifier: Box::new(ConsoleNotifier::stdout()),
    }
}
