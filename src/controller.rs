//! Scan flow controller
//!
//! Owns the [`ScanSession`] and the [`Capabilities`] bundle, and maps user
//! actions, camera events and back presses onto session transitions and
//! capability calls. Handlers run to completion; capability failures are
//! caught here and either shown in a dialog or logged.

use tracing::{debug, error, info, warn};

use crate::capability::{Capabilities, CameraConfig, CodeEvent, Notification, PickOutcome};
use crate::error::{ScanError, Surface};
use crate::session::{ScanMode, ScanSession};
use crate::view::{Action, Screen};

/// Shown when the decoded text cannot be launched
pub const OPEN_FAILED_MESSAGE: &str = "An error happened when trying to open the decoded data";
/// Shown when an uploaded photo holds no QR code
pub const NO_QR_FOUND_MESSAGE: &str = "QR code not found in the image";
/// Shown when the detector itself fails
pub const DETECTION_FAILED_MESSAGE: &str = "Error detecting QR code";
/// Title of the dialog that shows an uploaded photo's payload
pub const UPLOAD_RESULT_TITLE: &str = "QR Code Scanned";

/// Input delivered to the controller by its host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A button was pressed
    Action(Action),
    /// The camera recognised a code
    CodeDetected(CodeEvent),
    /// Hardware back button
    BackPressed,
}

/// Whether the controller consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Consumed; the host does nothing else
    Handled,
    /// Not consumed; the host applies its default (exit)
    NotHandled,
}

/// Holds the session and drives the capabilities
pub struct ScanFlowController {
    session: ScanSession,
    caps: Capabilities,
    camera_config: CameraConfig,
}

impl ScanFlowController {
    /// Controller on the home screen with a rear camera and no audio
    pub fn new(caps: Capabilities) -> Self {
        Self::with_camera_config(caps, CameraConfig::default())
    }

    /// Controller that opens the camera with `camera_config`
    pub fn with_camera_config(caps: Capabilities, camera_config: CameraConfig) -> Self {
        Self {
            session: ScanSession::new(),
            caps,
            camera_config,
        }
    }

    /// Current session
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        Screen::for_session(&self.session)
    }

    /// Dispatch one host event.
    ///
    /// Buttons that are not on the current screen are ignored.
    pub fn handle(&mut self, event: ScanEvent) -> BackOutcome {
        match event {
            ScanEvent::BackPressed => return self.on_back_pressed(),
            ScanEvent::CodeDetected(code) => self.on_code_detected(code.data),
            ScanEvent::Action(action) => {
                if !self.screen().offers(action) {
                    debug!(?action, mode = %self.session.mode(), "action not on screen, ignoring");
                    return BackOutcome::Handled;
                }
                match action {
                    Action::ScanQrCode => self.start_scan(),
                    Action::UploadQrCode => self.upload_image(),
                    Action::Cancel => self.cancel_scan(),
                    Action::Open => self.open_decoded(),
                    Action::Copy => self.copy_decoded(),
                    Action::Share => self.share_decoded(),
                    Action::ScanAgain => self.reset_scan(),
                    Action::Home => self.go_home(),
                }
            }
        }
        BackOutcome::Handled
    }

    /// Pull the next camera event, if scanning. Returns true if one was handled.
    pub fn poll_camera(&mut self) -> bool {
        if self.session.mode() != ScanMode::Scanning {
            return false;
        }
        match self.caps.camera.poll() {
            Some(code) => {
                self.on_code_detected(code.data);
                true
            }
            None => false,
        }
    }

    /// Open the camera screen
    pub fn start_scan(&mut self) {
        self.session.enter_scanning();
        self.activate_camera();
    }

    /// Camera recognised a code; an absent payload reads as empty.
    ///
    /// Only the first event while scanning counts; later or stray events are dropped.
    pub fn on_code_detected(&mut self, text: Option<String>) {
        if self.session.mode() != ScanMode::Scanning {
            debug!(mode = %self.session.mode(), "code event outside scanning, ignoring");
            return;
        }
        let text = text.unwrap_or_default();
        self.caps.camera.stop();
        self.session.record_decoded(text);
        self.caps.haptics.pulse();
        info!(mode = %self.session.mode(), len = self.session.decoded_text().len(), "code detected");
    }

    /// Leave the camera screen; no-op unless scanning
    pub fn cancel_scan(&mut self) {
        if self.session.mode() != ScanMode::Scanning {
            debug!(mode = %self.session.mode(), "cancel outside scanning, ignoring");
            return;
        }
        self.caps.camera.stop();
        self.session.enter_home();
        info!("scan cancelled");
    }

    /// Pick a photo and show the first QR payload found in it.
    ///
    /// The session is left untouched.
    pub fn upload_image(&mut self) {
        let image = match self.caps.gallery.pick() {
            PickOutcome::Cancelled => {
                debug!("gallery pick cancelled");
                return;
            }
            PickOutcome::Failed(reason) => {
                self.surface(ScanError::Picker(reason));
                return;
            }
            PickOutcome::Picked(image) => image,
        };

        match self.caps.detector.detect(&image) {
            Ok(candidates) => {
                info!(
                    path = %image.path().display(),
                    found = candidates.len(),
                    "uploaded image scanned"
                );
                match candidates.into_iter().next() {
                    Some(first) => self
                        .caps
                        .notifier
                        .notify(Notification::new(UPLOAD_RESULT_TITLE, first)),
                    None => self.surface(ScanError::NoQrFound),
                }
            }
            Err(err) => self.surface(err),
        }
    }

    /// Launch the decoded text as a URL
    pub fn open_decoded(&mut self) {
        if !self.session.has_decoded() {
            return;
        }
        if let Err(err) = self.caps.launcher.open(self.session.decoded_text()) {
            self.surface(err);
        }
    }

    /// Copy the decoded text to the clipboard
    pub fn copy_decoded(&mut self) {
        if !self.session.has_decoded() {
            return;
        }
        if let Err(err) = self.caps.clipboard.write(self.session.decoded_text()) {
            self.surface(err);
        }
    }

    /// Share the decoded text; failures are only logged
    pub fn share_decoded(&mut self) {
        if !self.session.has_decoded() {
            return;
        }
        if let Err(err) = self.caps.share.share(self.session.decoded_text()) {
            self.surface(err);
        }
    }

    /// Drop the result and go straight back to the camera
    pub fn reset_scan(&mut self) {
        self.session.enter_scanning();
        self.activate_camera();
    }

    /// Drop the result and return to the landing screen
    pub fn go_home(&mut self) {
        if self.caps.camera.is_active() {
            self.caps.camera.stop();
        }
        self.session.enter_home();
    }

    /// Hardware back: cancels scanning, otherwise left to the host
    pub fn on_back_pressed(&mut self) -> BackOutcome {
        if self.session.mode() == ScanMode::Scanning {
            self.cancel_scan();
            BackOutcome::Handled
        } else {
            BackOutcome::NotHandled
        }
    }

    fn activate_camera(&mut self) {
        match self.caps.camera.start(&self.camera_config) {
            Ok(()) => info!(facing = ?self.camera_config.facing, "camera started"),
            Err(err) => {
                self.session.enter_home();
                self.surface(err);
            }
        }
    }

    fn surface(&mut self, err: ScanError) {
        match err.surface() {
            Surface::UserFacing => {
                warn!(error = %err, "showing error to user");
                self.caps
                    .notifier
                    .notify(Notification::error(user_message(&err)));
            }
            Surface::Silent => error!(error = %err, "capability failed"),
        }
    }
}

fn user_message(err: &ScanError) -> String {
    match err {
        ScanError::Launch { .. } => OPEN_FAILED_MESSAGE.to_string(),
        ScanError::NoQrFound => NO_QR_FOUND_MESSAGE.to_string(),
        ScanError::Detection(_) | ScanError::Image(_) | ScanError::Io(_) => {
            DETECTION_FAILED_MESSAGE.to_string()
        }
        ScanError::Camera(reason) => format!("Cannot start the camera: {reason}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{
        Camera, Clipboard, GalleryPicker, Haptics, ImageDetector, ImageRef, Notifier, ShareSheet,
        UrlLauncher,
    };
    use crate::error::Result;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        camera_active: bool,
        opened: Vec<String>,
        notes: Vec<Notification>,
        pulses: usize,
    }

    struct Stub(Rc<RefCell<Log>>);

    impl Camera for Stub {
        fn start(&mut self, _config: &CameraConfig) -> Result<()> {
            self.0.borrow_mut().camera_active = true;
            Ok(())
        }
        fn stop(&mut self) {
            self.0.borrow_mut().camera_active = false;
        }
        fn poll(&mut self) -> Option<CodeEvent> {
            None
        }
        fn is_active(&self) -> bool {
            self.0.borrow().camera_active
        }
    }

    impl GalleryPicker for Stub {
        fn pick(&mut self) -> PickOutcome {
            PickOutcome::Cancelled
        }
    }

    impl ImageDetector for Stub {
        fn detect(&self, _image: &ImageRef) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    impl Clipboard for Stub {
        fn write(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    impl ShareSheet for Stub {
        fn share(&mut self, _text: &str) -> Result<()> {
            Err(ScanError::Share("no target".to_string()))
        }
    }

    impl UrlLauncher for Stub {
        fn open(&mut self, url: &str) -> Result<()> {
            self.0.borrow_mut().opened.push(url.to_string());
            Err(ScanError::Launch {
                url: url.to_string(),
                reason: "unsupported".to_string(),
            })
        }
    }

    impl Haptics for Stub {
        fn pulse(&mut self) {
            self.0.borrow_mut().pulses += 1;
        }
    }

    impl Notifier for Stub {
        fn notify(&mut self, notification: Notification) {
            self.0.borrow_mut().notes.push(notification);
        }
    }

    fn controller() -> (ScanFlowController, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let caps = Capabilities {
            camera: Box::new(Stub(log.clone())),
            gallery: Box::new(Stub(log.clone())),
            detector: Box::new(Stub(log.clone())),
            clipboard: Box::new(Stub(log.clone())),
            share: Box::new(Stub(log.clone())),
            launcher: Box::new(Stub(log.clone())),
            haptics: Box::new(Stub(log.clone())),
            notifier: Box::new(Stub(log.clone())),
        };
        (ScanFlowController::new(caps), log)
    }

    #[test]
    fn test_detection_stops_camera_and_pulses() {
        let (mut ctl, log) = controller();
        ctl.start_scan();
        assert!(log.borrow().camera_active);
        ctl.on_code_detected(Some("hello".to_string()));
        assert_eq!(ctl.session().mode(), ScanMode::Result);
        assert!(!log.borrow().camera_active);
        assert_eq!(log.borrow().pulses, 1);
    }

    #[test]
    fn test_open_failure_shows_error_dialog() {
        let (mut ctl, log) = controller();
        ctl.start_scan();
        ctl.on_code_detected(Some("ABC123".to_string()));
        ctl.open_decoded();
        let log = log.borrow();
        assert_eq!(log.opened, vec!["ABC123".to_string()]);
        assert_eq!(log.notes, vec![Notification::error(OPEN_FAILED_MESSAGE)]);
        assert_eq!(ctl.session().mode(), ScanMode::Result);
    }

    #[test]
    fn test_share_failure_is_not_shown() {
        let (mut ctl, log) = controller();
        ctl.start_scan();
        ctl.on_code_detected(Some("ABC123".to_string()));
        ctl.share_decoded();
        assert!(log.borrow().notes.is_empty());
    }

    #[test]
    fn test_back_outside_scanning_is_left_to_host() {
        let (mut ctl, _log) = controller();
        assert_eq!(ctl.on_back_pressed(), BackOutcome::NotHandled);
        ctl.start_scan();
        assert_eq!(ctl.on_back_pressed(), BackOutcome::Handled);
        assert_eq!(ctl.session().mode(), ScanMode::Home);
    }

    #[test]
    fn test_code_event_from_home_is_dropped() {
        let (mut ctl, log) = controller();
        ctl.handle(ScanEvent::CodeDetected(CodeEvent::new("stale")));
        assert_eq!(ctl.session().mode(), ScanMode::Home);
        assert_eq!(ctl.session().decoded_text(), "");
        assert_eq!(log.borrow().pulses, 0);
    }

    #[test]
    fn test_offscreen_action_is_ignored() {
        let (mut ctl, log) = controller();
        ctl.handle(ScanEvent::Action(Action::ScanAgain));
        assert_eq!(ctl.session().mode(), ScanMode::Home);
        assert!(!log.borrow().camera_active);
    }
}
