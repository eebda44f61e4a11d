//! Transport-side primitive every read is built from.
//!
//! A transport only has to open content (or report it absent); the copy,
//! stream and transform variants of [`ExternalResource`] are derived here
//! and all count bytes the same way.

use std::io::{self, Read, Write};
use std::path::Path;
use url::Url;

use super::read::CountingReader;
use super::{
    ContentAction, ExternalResource, ExternalResourceName, LocalResource, ReadResult,
    ResourceError, ResourceMetaData,
};
use crate::storage;

/// Opened content of a resource.
pub struct ResourceContent {
    pub reader: Box<dyn Read>,
    pub metadata: ResourceMetaData,
}

/// Operations a transport implements. Any `ContentSource` is an
/// [`ExternalResource`].
pub trait ContentSource {
    fn name(&self) -> &ExternalResourceName;

    fn read_metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError>;

    fn list_entries(&self) -> Result<Option<Vec<String>>, ResourceError>;

    fn upload(&self, source: &dyn LocalResource) -> Result<(), ResourceError>;

    /// Open the content for reading, or `Ok(None)` when nothing is there.
    fn open_content(&self) -> Result<Option<ResourceContent>, ResourceError>;
}

impl<S: ContentSource> ExternalResource for S {
    fn uri(&self) -> &Url {
        self.name().uri()
    }

    fn display_name(&self) -> String {
        self.name().display_name()
    }

    fn metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError> {
        self.read_metadata()
    }

    fn list(&self) -> Result<Option<Vec<String>>, ResourceError> {
        self.list_entries()
    }

    fn put(&self, source: &dyn LocalResource) -> Result<(), ResourceError> {
        self.upload(source)
    }

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceError> {
        self.write_to_if_present(destination)?
            .ok_or_else(|| ResourceError::not_found(self.name().location()))
    }

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceError> {
        let Some(content) = self.open_content()? else {
            return Ok(None);
        };
        let mut reader = CountingReader::new(content.reader);
        storage::copy_to_path(&mut reader, destination)
            .map_err(|e| ResourceError::io(self.name().location(), e))?;
        Ok(Some(ReadResult::bytes(reader.count())))
    }

    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceError> {
        let content = self
            .open_content()?
            .ok_or_else(|| ResourceError::not_found(self.name().location()))?;
        let mut reader = CountingReader::new(content.reader);
        io::copy(&mut reader, &mut *destination)
            .and_then(|_| destination.flush())
            .map_err(|e| ResourceError::io(self.name().location(), e))?;
        Ok(ReadResult::bytes(reader.count()))
    }

    fn with_content<T, F>(&self, read: F) -> Result<ReadResult<T>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>,
    {
        self.with_content_if_present(read)?
            .ok_or_else(|| ResourceError::not_found(self.name().location()))
    }

    fn with_content_if_present<T, F>(&self, read: F) -> Result<Option<ReadResult<T>>, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> anyhow::Result<T>,
    {
        let Some(content) = self.open_content()? else {
            return Ok(None);
        };
        let mut reader = CountingReader::new(content.reader);
        let value = read(&mut reader)
            .map_err(|e| ResourceError::transform(self.name().location(), e))?;
        Ok(Some(ReadResult::new(reader.count(), value)))
    }

    fn with_content_action<A>(&self, action: A) -> Result<ReadResult<A::Output>, ResourceError>
    where
        A: ContentAction,
    {
        self.with_content_action_if_present(action)?
            .ok_or_else(|| ResourceError::not_found(self.name().location()))
    }

    fn with_content_action_if_present<A>(
        &self,
        action: A,
    ) -> Result<Option<ReadResult<A::Output>>, ResourceError>
    where
        A: ContentAction,
    {
        let Some(content) = self.open_content()? else {
            return Ok(None);
        };
        let mut reader = CountingReader::new(content.reader);
        let value = action
            .execute(&mut reader, &content.metadata)
            .map_err(|e| ResourceError::transform(self.name().location(), e))?;
        Ok(Some(ReadResult::new(reader.count(), value)))
    }
}
