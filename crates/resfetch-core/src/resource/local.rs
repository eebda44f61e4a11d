//! Local content that can be pushed to a remote location.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Source of an upload.
pub trait LocalResource {
    fn display_name(&self) -> String;

    fn content_length(&self) -> io::Result<u64>;

    /// Open a fresh reader positioned at the start of the content.
    fn open(&self) -> io::Result<Box<dyn Read>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalResource for LocalFile {
    fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    fn content_length(&self) -> io::Result<u64> {
        Ok(self.path.metadata()?.len())
    }

    fn open(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// Bytes held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryResource {
    name: String,
    bytes: Vec<u8>,
}

impl InMemoryResource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl LocalResource for InMemoryResource {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn content_length(&self) -> io::Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn open(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.bytes.clone())))
    }
}
