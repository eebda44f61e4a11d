//! External resources: the capability every transport exposes, and the
//! decorator that records an operation scope around each read.

mod connector;
mod error;
mod file;
mod http;
mod instrumented;
mod local;
mod metadata;
mod name;
mod read;
mod source;

pub use connector::{AnyResource, ResourceConnector};
pub use error::ResourceError;
pub use file::FileResource;
pub use http::{HttpOptions, HttpResource};
pub use instrumented::{InstrumentedResource, ReadOperationDetails, ReadOperationResult};
pub use local::{InMemoryResource, LocalFile, LocalResource};
pub use metadata::ResourceMetaData;
pub use name::ExternalResourceName;
pub use read::ReadResult;
pub use source::{ContentSource, ResourceContent};

use std::io::{Read, Write};
use std::path::Path;
use url::Url;

/// Processes resource content together with its metadata.
///
/// Unlike the plain transform passed to [`ExternalResource::with_content`],
/// an action also sees what the transport reported about the resource.
pub trait ContentAction {
    type Output;

    fn execute(
        self,
        content: &mut dyn Read,
        metadata: &ResourceMetaData,
    ) -> anyhow::Result<Self::Output>;
}

/// A named remote (or local) resource.
///
/// "Must exist" reads fail with [`ResourceError::NotFound`] when nothing is
/// at the location; `*_if_present` reads return `Ok(None)` instead. An empty
/// resource is a present one: `Some(ReadResult)` with `bytes_read() == 0`.
pub trait ExternalResource {
    fn uri(&self) -> &Url;

    fn display_name(&self) -> String;

    /// `Ok(None)` when the resource does not exist.
    fn metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError>;

    /// Child entry names of a container resource; `Ok(None)` if it is not one.
    fn list(&self) -> Result<Option<Vec<String>>, ResourceError>;

    /// Replace the remote content with `source`.
    fn put(&self, source: &dyn LocalResource) -> Result<(), ResourceError>;

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceError>;

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceError>;

    fn write_to_stream(&self, destination: &mut dyn Write)
        -> Result<ReadResult<()>, ResourceError>;

    fn with_content<T, F>(&self, read: F) -> Result<ReadResult<T>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>;

    fn with_content_if_present<T, F>(&self, read: F) -> Result<Option<ReadResult<T>>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>;

    fn with_content_action<A>(&self, action: A) -> Result<ReadResult<A::Output>, ResourceError>
    where
        A: ContentAction;

    fn with_content_action_if_present<A>(
        &self,
        action: A,
    ) -> Result<Option<ReadResult<A::Output>>, ResourceError>
    where
        A: ContentAction;
}
