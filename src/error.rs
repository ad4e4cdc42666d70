use thiserror::Error;

/// How a failure reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Shown in a blocking notification dialog
    UserFacing,
    /// Logged only
    Silent,
}

/// Errors produced by the scan flow and its capability providers
#[derive(Error, Debug)]
pub enum ScanError {
    /// Decoded text could not be launched as a URL
    #[error("cannot open '{url}': {reason}")]
    Launch {
        /// Text that was handed to the launcher
        url: String,
        /// Why the launch failed
        reason: String,
    },

    /// The picked image contained no readable QR code
    #[error("no QR code found in image")]
    NoQrFound,

    /// Image QR detection failed outright
    #[error("detection error: {0}")]
    Detection(String),

    /// The camera could not be activated
    #[error("camera error: {0}")]
    Camera(String),

    /// Gallery picker reported an error
    #[error("picker error: {0}")]
    Picker(String),

    /// Share target rejected the payload
    #[error("share error: {0}")]
    Share(String),

    /// Clipboard write failed
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Image could not be loaded or decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file or value problem
    #[error("config error: {0}")]
    Config(String),
}

impl ScanError {
    /// Whether this failure is shown to the user or only logged
    pub fn surface(&self) -> Surface {
        match self {
            ScanError::Launch { .. }
            | ScanError::NoQrFound
            | ScanError::Detection(_)
            | ScanError::Camera(_)
            | ScanError::Image(_)
            | ScanError::Io(_)
            | ScanError::Config(_) => Surface::UserFacing,
            ScanError::Picker(_) | ScanError::Share(_) | ScanError::Clipboard(_) => {
                Surface::Silent
            }
        }
    }
}

/// Convenience type alias for Results with ScanError
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "frame missing");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("frame missing"));
    }

    #[test]
    fn test_error_display() {
        let err = ScanError::Launch {
            url: "ABC123".to_string(),
            reason: "no URL scheme".to_string(),
        };
        assert_eq!(err.to_string(), "cannot open 'ABC123': no URL scheme");
        assert_eq!(ScanError::NoQrFound.to_string(), "no QR code found in image");
        assert_eq!(
            ScanError::Share("pipe closed".to_string()).to_string(),
            "share error: pipe closed"
        );
    }

    #[test]
    fn test_surface_split() {
        assert_eq!(ScanError::NoQrFound.surface(), Surface::UserFacing);
        assert_eq!(
            ScanError::Camera("busy".to_string()).surface(),
            Surface::UserFacing
        );
        assert_eq!(ScanError::Share("x".to_string()).surface(), Surface::Silent);
        assert_eq!(ScanError::Picker("x".to_string()).surface(), Surface::Silent);
    }
}
