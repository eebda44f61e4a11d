//! Filename extraction from a URI path.

use percent_encoding::percent_decode_str;
use url::Url;

/// Extracts the last path segment of `url`, percent-decoded, for use as a filename hint.
///
/// Returns `None` if the path is empty/root or the segment is a dot segment.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(input: &str) -> Option<String> {
        filename_from_url_path(&Url::parse(input).unwrap())
    }

    #[test]
    fn normal() {
        assert_eq!(name("https://example.com/a/b/file.deb").as_deref(), Some("file.deb"));
        assert_eq!(name("https://example.com/single").as_deref(), Some("single"));
    }

    #[test]
    fn trailing_slash_uses_directory_name() {
        assert_eq!(name("https://example.com/org/acme/").as_deref(), Some("acme"));
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(name("https://example.com/"), None);
        assert_eq!(name("https://example.com"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            name("https://example.com/file.zip?token=abc").as_deref(),
            Some("file.zip")
        );
    }

    #[test]
    fn percent_decoded() {
        assert_eq!(name("https://example.com/caf%C3%A9.txt").as_deref(), Some("café.txt"));
        assert_eq!(name("https://example.com/%2E%2E"), None);
    }
}
