//! Decorator that runs every read of a resource inside an operation scope.
//!
//! Each read opens one scope described as `Download <display name>`, with the
//! short name as progress text and `{ "location": <uri> }` as details, and
//! closes it with `{ "bytesRead": n }`. Errors from the wrapped resource are
//! returned untouched; the runner records them when it closes the scope.
//! Metadata, listing and `put` are forwarded without a scope.

use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use url::Url;

use super::{
    ContentAction, ExternalResource, ExternalResourceName, LocalResource, ReadResult,
    ResourceError, ResourceMetaData,
};
use crate::operation::{OperationDescriptor, OperationRunner};

/// Details recorded when a read scope opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadOperationDetails {
    pub location: String,
}

/// Result recorded when a read scope closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationResult {
    pub bytes_read: u64,
}

/// Wraps `R` so its reads are observable through `X`.
#[derive(Debug, Clone)]
pub struct InstrumentedResource<R, X> {
    name: ExternalResourceName,
    runner: X,
    delegate: R,
}

impl<R, X> InstrumentedResource<R, X>
where
    R: ExternalResource,
    X: OperationRunner,
{
    pub fn new(name: ExternalResourceName, runner: X, delegate: R) -> Self {
        Self {
            name,
            runner,
            delegate,
        }
    }

    pub fn name(&self) -> &ExternalResourceName {
        &self.name
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }

    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor::display_name(format!("Download {}", self.name.display_name()))
            .progress_display_name(self.name.short_display_name())
            .details(ReadOperationDetails {
                location: self.name.location().to_string(),
            })
    }

    /// Run `call` against the delegate in a scope, recording `bytes_read(&value)`.
    fn instrumented<T>(
        &self,
        call: impl FnOnce(&R) -> Result<T, ResourceError>,
        bytes_read: impl FnOnce(&T) -> u64,
    ) -> Result<T, ResourceError> {
        self.runner.call(self.descriptor(), |context| {
            let value = call(&self.delegate)?;
            context.set_result(ReadOperationResult {
                bytes_read: bytes_read(&value),
            });
            Ok(value)
        })
    }
}

fn read_bytes<T>(result: &ReadResult<T>) -> u64 {
    result.bytes_read()
}

fn present_bytes<T>(result: &Option<ReadResult<T>>) -> u64 {
    result.as_ref().map_or(0, ReadResult::bytes_read)
}

impl<R, X> ExternalResource for InstrumentedResource<R, X>
where
    R: ExternalResource,
    X: OperationRunner,
{
    fn uri(&self) -> &Url {
        self.delegate.uri()
    }

    fn display_name(&self) -> String {
        self.delegate.display_name()
    }

    fn metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError> {
        self.delegate.metadata()
    }

    fn list(&self) -> Result<Option<Vec<String>>, ResourceError> {
        self.delegate.list()
    }

    // Uploads are not wrapped in a scope.
    fn put(&self, source: &dyn LocalResource) -> Result<(), ResourceError> {
        self.delegate.put(source)
    }

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceError> {
        self.instrumented(|r| r.write_to(destination), read_bytes)
    }

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceError> {
        self.instrumented(|r| r.write_to_if_present(destination), present_bytes)
    }

    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceError> {
        self.instrumented(|r| r.write_to_stream(destination), read_bytes)
    }

    fn with_content<T, F>(&self, read: F) -> Result<ReadResult<T>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>,
    {
        self.instrumented(|r| r.with_content(read), read_bytes)
    }

    fn with_content_if_present<T, F>(&self, read: F) -> Result<Option<ReadResult<T>>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>,
    {
        self.instrumented(|r| r.with_content_if_present(read), present_bytes)
    }

    fn with_content_action<A>(&self, action: A) -> Result<ReadResult<A::Output>, ResourceError>
    where
        A: ContentAction,
    {
        self.instrumented(|r| r.with_content_action(action), read_bytes)
    }

    fn with_content_action_if_present<A>(
        &self,
        action: A,
    ) -> Result<Option<ReadResult<A::Output>>, ResourceError>
    where
        A: ContentAction,
    {
        self.instrumented(|r| r.with_content_action_if_present(action), present_bytes)
    }
}
