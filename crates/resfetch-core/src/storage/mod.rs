//! Destination files written through a `.part` sibling.
//!
//! Content is streamed into `<dest>.part`, synced, then atomically renamed
//! over `<dest>`. A failed transfer never leaves a truncated destination.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `lib.jar` → `lib.jar.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for one destination file.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Create (truncating) `<final_path>.part`, creating parent directories.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Sync and rename over the final path. On failure the temp file is removed.
    pub fn commit(self) -> io::Result<()> {
        let synced = self.file.sync_all();
        drop(self.file);
        let committed = synced.and_then(|()| fs::rename(&self.temp_path, &self.final_path));
        if committed.is_err() {
            remove_temp(&self.temp_path);
        }
        committed
    }

    /// Remove the temp file, leaving any existing destination untouched.
    pub fn discard(self) {
        drop(self.file);
        remove_temp(&self.temp_path);
    }
}

fn remove_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), "could not remove temp file: {}", e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Stream `reader` into `final_path` through a part file. Returns bytes copied.
pub fn copy_to_path(reader: &mut dyn io::Read, final_path: &Path) -> io::Result<u64> {
    let mut part = PartFile::create(final_path)?;
    match io::copy(reader, &mut part) {
        Ok(n) => {
            part.commit()?;
            Ok(n)
        }
        Err(e) => {
            part.discard();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.jar"));
        assert_eq!(p.to_string_lossy(), "file.jar.part");
        let p2 = temp_path(Path::new("/tmp/lib.pom"));
        assert_eq!(p2.to_string_lossy(), "/tmp/lib.pom.part");
    }

    #[test]
    fn copy_commits_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("sub").join("out.bin");
        let n = copy_to_path(&mut &b"hello"[..], &dest).unwrap();
        assert_eq!(n, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn failed_copy_keeps_previous_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        fs::write(&dest, b"old").unwrap();
        let err = copy_to_path(&mut FailingReader, &dest).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(fs::read(&dest).unwrap(), b"old");
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn failed_rename_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("lib.jar");
        fs::create_dir(&dest).unwrap();
        assert!(copy_to_path(&mut &b"hello"[..], &dest).is_err());
        assert!(!temp_path(&dest).exists());
        assert!(dest.is_dir());
    }
}
