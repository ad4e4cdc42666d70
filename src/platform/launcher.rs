use tracing::info;

use crate::capability::UrlLauncher;
use crate::error::{Result, ScanError};

/// Launches URLs with the OS default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUrlLauncher;

impl UrlLauncher for SystemUrlLauncher {
    fn open(&mut self, url: &str) -> Result<()> {
        if !is_launchable_url(url) {
            return Err(ScanError::Launch {
                url: url.to_string(),
                reason: "not a URL".to_string(),
            });
        }
        open::that(url).map_err(|e| ScanError::Launch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        info!(url, "launched");
        Ok(())
    }
}

/// Whether `text` looks like `scheme:rest`.
///
/// The scheme needs at least two characters so Windows drive paths such as
/// `C:\photo.png` are not mistaken for URLs.
pub fn is_launchable_url(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && scheme.len() >= 2
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}
