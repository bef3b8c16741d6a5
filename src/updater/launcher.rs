//! Opening release pages in the user's browser.

use crate::error::{Error, Result};
use crate::helpers::validate_http_url;

/// Best-effort "open this URL in the default browser".
pub trait BrowserLauncher: Send + Sync + 'static {
    fn open(&self, url: &str) -> Result<()>;
}

/// Launches the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        validate_http_url(url)
            .map_err(|reason| Error::Launch { url: url.to_string(), reason })?;
        open::that(url).map_err(|e| Error::Launch { url: url.to_string(), reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_urls_without_launching() {
        let err = SystemBrowser.open("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }
}
