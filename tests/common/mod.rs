#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use image::{GrayImage, ImageBuffer, Luma};
use qrcode::{Color, QrCode};
use rust_qr_scan::capability::{
    Camera, Clipboard, GalleryPicker, Haptics, ImageDetector, Notifier, ShareSheet, UrlLauncher,
};
use rust_qr_scan::{
    CameraConfig, Capabilities, CodeEvent, ImageRef, Notification, PickOutcome, Result, ScanError,
    ScanFlowController,
};

/// Everything the fake providers saw, plus how they should answer
#[derive(Default)]
pub struct Record {
    pub camera_active: bool,
    pub camera_starts: usize,
    pub camera_fails: bool,
    pub frames: VecDeque<CodeEvent>,

    pub pick: Option<PickOutcome>,
    pub candidates: Vec<String>,
    pub detect_error: Option<String>,
    pub detected: Vec<ImageRef>,

    pub clipboard: Vec<String>,
    pub clipboard_fails: bool,
    pub shared: Vec<String>,
    pub share_fails: bool,
    pub opened: Vec<String>,
    pub launch_fails: bool,
    pub pulses: usize,
    pub notes: Vec<Notification>,
}

pub type Shared = Rc<RefCell<Record>>;

pub struct Fake(pub Shared);

impl Camera for Fake {
    fn start(&mut self, _config: &CameraConfig) -> Result<()> {
        let mut rec = self.0.borrow_mut();
        if rec.camera_fails {
            return Err(ScanError::Camera("device busy".to_string()));
        }
        rec.camera_starts += 1;
        rec.camera_active = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.0.borrow_mut().camera_active = false;
    }

    fn poll(&mut self) -> Option<CodeEvent> {
        let mut rec = self.0.borrow_mut();
        if !rec.camera_active {
            return None;
        }
        rec.frames.pop_front()
    }

    fn is_active(&self) -> bool {
        self.0.borrow().camera_active
    }
}

impl GalleryPicker for Fake {
    fn pick(&mut self) -> PickOutcome {
        self.0
            .borrow()
            .pick
            .clone()
            .unwrap_or(PickOutcome::Cancelled)
    }
}

impl ImageDetector for Fake {
    fn detect(&self, image: &ImageRef) -> Result<Vec<String>> {
        let mut rec = self.0.borrow_mut();
        rec.detected.push(image.clone());
        match &rec.detect_error {
            Some(reason) => Err(ScanError::Detection(reason.clone())),
            None => Ok(rec.candidates.clone()),
        }
    }
}

impl Clipboard for Fake {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut rec = self.0.borrow_mut();
        rec.clipboard.push(text.to_string());
        if rec.clipboard_fails {
            Err(ScanError::Clipboard("clipboard unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ShareSheet for Fake {
    fn share(&mut self, text: &str) -> Result<()> {
        let mut rec = self.0.borrow_mut();
        rec.shared.push(text.to_string());
        if rec.share_fails {
            Err(ScanError::Share("share sheet dismissed".to_string()))
        } else {
            Ok(())
        }
    }
}

impl UrlLauncher for Fake {
    fn open(&mut self, url: &str) -> Result<()> {
        let mut rec = self.0.borrow_mut();
        rec.opened.push(url.to_string());
        if rec.launch_fails {
            Err(ScanError::Launch {
                url: url.to_string(),
                reason: "no handler".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Haptics for Fake {
    fn pulse(&mut self) {
        self.0.borrow_mut().pulses += 1;
    }
}

impl Notifier for Fake {
    fn notify(&mut self, notification: Notification) {
        self.0.borrow_mut().notes.push(notification);
    }
}

/// Capabilities backed entirely by one shared record
pub fn fake_capabilities() -> (Capabilities, Shared) {
    let rec: Shared = Rc::new(RefCell::new(Record::default()));
    let caps = Capabilities {
        camera: Box::new(Fake(rec.clone())),
        gallery: Box::new(Fake(rec.clone())),
        detector: Box::new(Fake(rec.clone())),
        clipboard: Box::new(Fake(rec.clone())),
        share: Box::new(Fake(rec.clone())),
        launcher: Box::new(Fake(rec.clone())),
        haptics: Box::new(Fake(rec.clone())),
        notifier: Box::new(Fake(rec.clone())),
    };
    (caps, rec)
}

/// Fresh controller on fakes
pub fn controller() -> (ScanFlowController, Shared) {
    let (caps, rec) = fake_capabilities();
    (ScanFlowController::new(caps), rec)
}

/// Render `text` as a QR code with a four-module quiet zone
pub fn qr_image(text: &str, scale: u32) -> GrayImage {
    let code = QrCode::new(text.as_bytes()).expect("payload fits in a QR code");
    let width = code.width();
    let colors = code.to_colors();
    let quiet = 4i64;
    let side = (width as u32 + 2 * quiet as u32) * scale;

    ImageBuffer::from_fn(side, side, |x, y| {
        let mx = (x / scale) as i64 - quiet;
        let my = (y / scale) as i64 - quiet;
        if mx < 0 || my < 0 || mx >= width as i64 || my >= width as i64 {
            return Luma([255]);
        }
        match colors[my as usize * width + mx as usize] {
            Color::Dark => Luma([0]),
            Color::Light => Luma([255]),
        }
    })
}
