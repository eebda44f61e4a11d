//! Failures raised by resource transports.

use thiserror::Error;

/// Error returned by an [`ExternalResource`](super::ExternalResource) operation.
///
/// Every variant carries the resource location so a failure can be reported
/// without the caller having to thread the name through.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A "must exist" read found nothing at the location.
    #[error("resource not found: {location}")]
    NotFound { location: String },

    /// Local or remote I/O failed while reading or writing content.
    #[error("could not access {location}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The caller-supplied transform or content action failed.
    #[error("could not process content of {location}")]
    Transform {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    /// Server answered with a status that is neither success nor "absent".
    #[error("{location} returned HTTP {status}")]
    Http { location: String, status: u32 },

    /// libcurl reported a transfer failure (timeout, connection, TLS).
    #[error("transfer of {location} failed")]
    Transport {
        location: String,
        #[source]
        source: curl::Error,
    },

    /// The transport has no way to perform the operation.
    #[error("{operation} is not supported for {location}")]
    Unsupported {
        location: String,
        operation: &'static str,
    },

    /// No transport is registered for the URI scheme.
    #[error("no transport for scheme `{scheme}` ({location})")]
    UnsupportedScheme { location: String, scheme: String },
}

impl ResourceError {
    pub fn not_found(location: impl Into<String>) -> Self {
        ResourceError::NotFound {
            location: location.into(),
        }
    }

    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        ResourceError::Io {
            location: location.into(),
            source,
        }
    }

    pub fn transform(location: impl Into<String>, source: anyhow::Error) -> Self {
        ResourceError::Transform {
            location: location.into(),
            source,
        }
    }

    pub fn transport(location: impl Into<String>, source: curl::Error) -> Self {
        ResourceError::Transport {
            location: location.into(),
            source,
        }
    }

    /// Location the failing operation targeted.
    pub fn location(&self) -> &str {
        match self {
            ResourceError::NotFound { location }
            | ResourceError::Io { location, .. }
            | ResourceError::Transform { location, .. }
            | ResourceError::Http { location, .. }
            | ResourceError::Transport { location, .. }
            | ResourceError::Unsupported { location, .. }
            | ResourceError::UnsupportedScheme { location, .. } => location,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}
