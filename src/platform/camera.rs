use std::collections::VecDeque;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::capability::{Camera, CameraConfig, CodeEvent};
use crate::detect::ImageQrDetector;
use crate::error::{Result, ScanError};
use crate::media::collect_images;

/// Camera stand-in that reads frames from a directory of images.
///
/// Frames are visited in path order, one per poll, and every code found in
/// a frame is emitted as its own event.
pub struct FrameDirCamera {
    frames_dir: Option<PathBuf>,
    detector: ImageQrDetector,
    frames: VecDeque<PathBuf>,
    codes: VecDeque<String>,
    active: bool,
}

impl FrameDirCamera {
    /// Camera over `frames_dir`, decoding frames with `detector`
    pub fn new(frames_dir: Option<PathBuf>, detector: ImageQrDetector) -> Self {
        Self {
            frames_dir,
            detector,
            frames: VecDeque::new(),
            codes: VecDeque::new(),
            active: false,
        }
    }

    /// Frames not yet decoded in the current session
    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl Camera for FrameDirCamera {
    fn start(&mut self, config: &CameraConfig) -> Result<()> {
        if config.capture_audio {
            return Err(ScanError::Camera(
                "audio capture is not supported".to_string(),
            ));
        }
        let dir = self
            .frames_dir
            .as_ref()
            .ok_or_else(|| ScanError::Camera("no frames directory configured".to_string()))?;
        if !dir.is_dir() {
            return Err(ScanError::Camera(format!(
                "frames directory {} not found",
                dir.display()
            )));
        }

        self.frames = collect_images(dir).into();
        self.codes.clear();
        self.active = true;
        info!(
            dir = %dir.display(),
            frames = self.frames.len(),
            facing = ?config.facing,
            "frame camera opened"
        );
        Ok(())
    }

    fn stop(&mut self) {
        if self.active {
            debug!(skipped = self.frames.len(), "frame camera closed");
        }
        self.frames.clear();
        self.codes.clear();
        self.active = false;
    }

    fn poll(&mut self) -> Option<CodeEvent> {
        if !self.active {
            return None;
        }
        while self.codes.is_empty() {
            let frame = self.frames.pop_front()?;
            match self.detector.detect_path(&frame) {
                Ok(found) => self.codes.extend(found),
                Err(err) => warn!(frame = %frame.display(), error = %err, "frame skipped"),
            }
        }
        self.codes.pop_front().map(CodeEvent::new)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
