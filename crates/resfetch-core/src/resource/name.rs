//! Addressable resource names.

use std::fmt;
use url::Url;

/// Absolute name of an external resource.
///
/// Holds the canonical URI plus the two human-readable forms used when
/// reporting progress: the full display name and a short one (the last
/// path segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalResourceName {
    uri: Url,
}

impl ExternalResourceName {
    pub fn new(uri: Url) -> Self {
        Self { uri }
    }

    /// Parse an absolute URI (`https://...`, `file:///...`).
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self::new)
    }

    /// Name of `path` relative to this one, treating this name as a directory.
    ///
    /// `https://repo/base` resolved with `a/b.pom` gives `https://repo/base/a/b.pom`.
    pub fn resolve(&self, path: &str) -> Result<Self, url::ParseError> {
        let mut base = self.uri.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/')).map(Self::new)
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Canonical location as ASCII text (host punycoded, path percent-encoded).
    pub fn location(&self) -> &str {
        self.uri.as_str()
    }

    /// Full display form. Credentials embedded in the URI are never shown.
    pub fn display_name(&self) -> String {
        if self.uri.password().is_none() && self.uri.username().is_empty() {
            return self.uri.to_string();
        }
        let mut shown = self.uri.clone();
        let _ = shown.set_password(None);
        let _ = shown.set_username("");
        shown.to_string()
    }

    /// Last non-empty path segment, or the display name when there is none.
    pub fn short_display_name(&self) -> String {
        self.uri
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .unwrap_or_else(|| self.display_name())
    }
}

impl fmt::Display for ExternalResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl From<Url> for ExternalResourceName {
    fn from(uri: Url) -> Self {
        Self::new(uri)
    }
}
