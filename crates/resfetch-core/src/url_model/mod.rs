//! Local filenames for fetched resources.
//!
//! Derives a safe filename from the last path segment of a resource URI,
//! sanitized for Linux filesystems.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

use crate::resource::ExternalResourceName;

/// Default filename when the URI path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe filename for saving `name` locally.
///
/// # Examples
///
/// - `https://repo.example.com/org/lib-1.0.jar` → `"lib-1.0.jar"`
/// - `https://repo.example.com/` → `"download.bin"`
pub fn derive_filename(name: &ExternalResourceName) -> String {
    let Some(raw) = filename_from_url_path(name.uri()) else {
        return DEFAULT_FILENAME.to_string();
    };
    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
