//! Resource metadata: size, validators and checksums reported by a transport.

use url::Url;

/// What a transport knows about a resource without reading its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetaData {
    pub location: Url,
    /// `Last-Modified` as sent by the server. Not populated for local files.
    pub last_modified: Option<String>,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// `ETag` with surrounding quotes removed.
    pub etag: Option<String>,
    /// SHA-1 published by the repository (`X-Checksum-Sha1`), lowercase hex.
    pub sha1: Option<String>,
}

impl ResourceMetaData {
    pub fn new(location: Url) -> Self {
        Self {
            location,
            last_modified: None,
            content_length: None,
            content_type: None,
            etag: None,
            sha1: None,
        }
    }

    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Build metadata from the header lines of one HTTP response.
    /// Status lines and malformed lines are skipped.
    pub fn from_headers(location: Url, lines: &[String]) -> Self {
        let mut meta = Self::new(location);
        for line in lines {
            let Some((name, value)) = line.trim().split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                meta.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("last-modified") {
                meta.last_modified = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("etag") {
                let value = value.strip_prefix("W/").unwrap_or(value);
                meta.etag = Some(value.trim_matches('"').to_string());
            } else if name.eq_ignore_ascii_case("x-checksum-sha1") && !value.is_empty() {
                meta.sha1 = Some(value.to_ascii_lowercase());
            }
        }
        meta
    }
}
