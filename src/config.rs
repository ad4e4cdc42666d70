//! Configuration: `config.toml` parsing plus environment overrides.
//!
//! # Loading order
//! 1. CLI arguments (highest)
//! 2. Environment variables (`QRSCAN_FRAMES_DIR=/tmp/frames`)
//! 3. Config file
//! 4. Defaults (`Default` impls)
//!
//! A missing config file is not an error; defaults are used.
//!
//! ```
//! use rust_qr_scan::config::ScanConfig;
//!
//! let config = ScanConfig::parse("[detector]\nmax_dim = 800").unwrap();
//! assert_eq!(config.detector.max_dim, 800);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::capability::CameraConfig;
use crate::detect::DEFAULT_MAX_DIM;
use crate::error::{Result, ScanError};

const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Logging settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraSection,
    /// Gallery picker settings
    #[serde(default)]
    pub gallery: GalleryConfig,
    /// Image detector settings
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Haptic feedback settings
    #[serde(default)]
    pub haptics: HapticsConfig,
}

/// `[general]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// `tracing` filter directive, e.g. `info` or `rust_qr_scan=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `compact`, `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// `[camera]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraSection {
    /// Lens and audio settings
    #[serde(flatten)]
    pub device: CameraConfig,
    /// Directory of frames the terminal camera reads
    #[serde(default)]
    pub frames_dir: Option<PathBuf>,
}

/// `[gallery]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory listed by the photo picker
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// `[detector]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Longest side images are shrunk to before detection; 0 disables
    #[serde(default = "default_max_dim")]
    pub max_dim: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_dim: default_max_dim(),
        }
    }
}

/// `[haptics]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HapticsConfig {
    /// Pulse when a code is detected
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_max_dim() -> u32 {
    DEFAULT_MAX_DIM
}

fn default_true() -> bool {
    true
}

impl ScanConfig {
    /// Load from `path` (defaults if absent), apply env overrides, validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file_or_default(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse `path`, or return defaults when the file does not exist
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ScanError::Io(e)),
        }
    }

    /// Parse a TOML string
    pub fn parse(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Default config location: `<config_dir>/qrscan/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qrscan")
            .join("config.toml")
    }

    /// Apply `QRSCAN_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; used by tests to avoid process env
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QRSCAN_LOG_LEVEL") {
            self.general.log_level = v;
        }
        if let Some(v) = lookup("QRSCAN_LOG_FORMAT") {
            self.general.log_format = v;
        }
        if let Some(v) = lookup("QRSCAN_FRAMES_DIR") {
            self.camera.frames_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("QRSCAN_GALLERY_DIR") {
            self.gallery.dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("QRSCAN_MAX_DIM") {
            match v.trim().parse::<u32>() {
                Ok(parsed) => self.detector.max_dim = parsed,
                Err(_) => warn!(value = %v, "ignoring invalid QRSCAN_MAX_DIM"),
            }
        }
        if let Some(v) = lookup("QRSCAN_HAPTICS") {
            match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.haptics.enabled = true,
                "0" | "false" | "no" | "off" => self.haptics.enabled = false,
                _ => warn!(value = %v, "ignoring invalid QRSCAN_HAPTICS"),
            }
        }
    }

    /// Replace the log filter with a command-line value and re-check the config
    pub fn override_log_level(&mut self, level: impl Into<String>) -> Result<()> {
        self.general.log_level = level.into();
        self.validate()
    }

    /// Reject values the host cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.general.log_level.trim().is_empty() {
            return Err(ScanError::Config(
                "general.log_level must not be empty".to_string(),
            ));
        }
        if !LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ScanError::Config(format!(
                "general.log_format '{}' is not one of {}",
                self.general.log_format,
                LOG_FORMATS.join(", ")
            )));
        }
        if self.camera.device.capture_audio {
            return Err(ScanError::Config(
                "camera.capture_audio is not supported".to_string(),
            ));
        }
        if self.detector.max_dim != 0 && self.detector.max_dim < 64 {
            return Err(ScanError::Config(format!(
                "detector.max_dim {} is too small (minimum 64, or 0 to disable)",
                self.detector.max_dim
            )));
        }
        Ok(())
    }
}
