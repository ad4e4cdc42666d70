//! RustQR Scan - scan a QR code with the camera or from a photo, then open,
//! copy, or share what it says.
//!
//! The [`ScanFlowController`] owns a [`ScanSession`] (which screen is showing
//! and the last decoded text) and reaches the outside world only through the
//! traits in [`capability`]. Hosts supply the providers; [`platform`] has the
//! desktop ones used by the `qrscan` binary.
//!
//! # Example
//! ```no_run
//! use rust_qr_scan::{ScanConfig, ScanFlowController, ScanMode, platform};
//!
//! let config = ScanConfig::default();
//! let mut controller = ScanFlowController::with_camera_config(
//!     platform::desktop_capabilities(&config),
//!     config.camera.device,
//! );
//! controller.start_scan();
//! while controller.session().mode() == ScanMode::Scanning && controller.poll_camera() {}
//! println!("{}", controller.screen());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Terminal event loop driving the controller
pub mod app;
/// Capability traits and the payloads they exchange
pub mod capability;
/// Configuration loading and validation
pub mod config;
/// Scan flow controller (events, transitions, error surfacing)
pub mod controller;
/// Still-image QR detection
pub mod detect;
/// Error types
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// Image loading and discovery helpers
pub mod media;
/// Desktop capability providers
pub mod platform;
/// Session state (mode + decoded text)
pub mod session;
/// Screen view models
pub mod view;

pub use capability::{
    CameraConfig, CameraFacing, Capabilities, CodeEvent, ImageRef, Notification, PickOutcome,
};
pub use config::ScanConfig;
pub use controller::{BackOutcome, ScanEvent, ScanFlowController};
pub use detect::ImageQrDetector;
pub use error::{Result, ScanError, Surface};
pub use session::{ScanMode, ScanSession};
pub use view::{Action, Screen};
