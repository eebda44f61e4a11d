//! `file://` transport.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::{
    ContentSource, ExternalResourceName, LocalResource, ResourceContent, ResourceError,
    ResourceMetaData,
};
use crate::storage::PartFile;

/// Resource backed by a path on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileResource {
    name: ExternalResourceName,
    path: PathBuf,
}

impl FileResource {
    /// Fails with [`ResourceError::UnsupportedScheme`] unless `name` is a local `file:` URI.
    pub fn new(name: ExternalResourceName) -> Result<Self, ResourceError> {
        let path = name
            .uri()
            .to_file_path()
            .map_err(|()| ResourceError::UnsupportedScheme {
                location: name.location().to_string(),
                scheme: name.uri().scheme().to_string(),
            })?;
        Ok(Self { name, path })
    }

    pub fn from_path(path: &Path) -> Result<Self, ResourceError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| ResourceError::io(path.display().to_string(), e))?
                .join(path)
        };
        let uri = url::Url::from_file_path(&absolute).map_err(|()| {
            ResourceError::io(
                path.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidInput, "not an absolute path"),
            )
        })?;
        Self::new(ExternalResourceName::new(uri))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: io::Error) -> ResourceError {
        ResourceError::io(self.name.location(), e)
    }

    /// Metadata of a regular file; `None` when absent or not a file.
    fn file_metadata(&self) -> Result<Option<fs::Metadata>, ResourceError> {
        match fs::metadata(&self.path) {
            Ok(m) if m.is_file() => Ok(Some(m)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl ContentSource for FileResource {
    fn name(&self) -> &ExternalResourceName {
        &self.name
    }

    fn read_metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError> {
        Ok(self.file_metadata()?.map(|m| {
            ResourceMetaData::new(self.name.uri().clone()).with_content_length(m.len())
        }))
    }

    fn list_entries(&self) -> Result<Option<Vec<String>>, ResourceError> {
        if !self.path.is_dir() {
            return Ok(None);
        }
        let entries = fs::read_dir(&self.path).map_err(|e| self.io_error(e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.io_error(e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(Some(names))
    }

    fn upload(&self, source: &dyn LocalResource) -> Result<(), ResourceError> {
        let mut reader = source
            .open()
            .map_err(|e| ResourceError::io(source.display_name(), e))?;
        let mut part = PartFile::create(&self.path).map_err(|e| self.io_error(e))?;
        if let Err(e) = io::copy(&mut reader, &mut part) {
            part.discard();
            return Err(self.io_error(e));
        }
        part.commit().map_err(|e| self.io_error(e))?;
        tracing::debug!(to = %self.path.display(), from = %source.display_name(), "uploaded");
        Ok(())
    }

    fn open_content(&self) -> Result<Option<ResourceContent>, ResourceError> {
        let Some(meta) = self.file_metadata()? else {
            return Ok(None);
        };
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(ResourceContent {
            reader: Box::new(file),
            metadata: ResourceMetaData::new(self.name.uri().clone())
                .with_content_length(meta.len()),
        }))
    }
}
