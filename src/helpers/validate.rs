// Validation helpers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters that would turn a single entry name into a path.
pub const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Why a file or directory name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NameError {
    #[error("File name cannot be empty")]
    Empty,
    #[error("File name cannot contain path separators")]
    PathSeparator,
}

/// Validate a name for a new file or directory inside the current folder.
///
/// Blank names are rejected, as is anything containing `/` or `\`.
pub fn validate_entry_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(PATH_SEPARATORS) {
        return Err(NameError::PathSeparator);
    }
    Ok(())
}

/// Validate a URL before handing it to the system browser.
/// e.g. "https://github.com/org/repo/releases/tag/v1.2.0"
pub fn validate_http_url(url: &str) -> Result<(), String> {
    let url = url.trim();

    if url.is_empty() {
        return Err("URL is required".into());
    }

    let Some(after_scheme) =
        url.strip_prefix("https://").or_else(|| url.strip_prefix("http://"))
    else {
        return Err("URL must start with http:// or https://".into());
    };

    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err("URL must include a host".into());
    }

    Ok(())
}
