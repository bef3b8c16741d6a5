pub mod validate;
pub mod version;

pub use validate::{NameError, PATH_SEPARATORS, validate_entry_name, validate_http_url};
pub use version::{normalize_tag, parse_version};
