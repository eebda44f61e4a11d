//! Read results and byte accounting.

use std::io::{self, Read};

/// Outcome of a successful read: how many content bytes were consumed and
/// what the caller's transform produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult<T> {
    bytes_read: u64,
    result: T,
}

impl<T> ReadResult<T> {
    pub fn new(bytes_read: u64, result: T) -> Self {
        Self { bytes_read, result }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn result(&self) -> &T {
        &self.result
    }

    pub fn into_result(self) -> T {
        self.result
    }
}

impl ReadResult<()> {
    pub fn bytes(bytes_read: u64) -> Self {
        Self::new(bytes_read, ())
    }
}

/// Reader that counts the bytes it hands out.
pub(crate) struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_consumed_bytes() {
        let mut r = CountingReader::new(&b"hello world"[..]);
        let mut buf = [0u8; 5];
        r.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(r.count(), 5);
        let mut rest = Vec::new();
        r.read_to_end(&mut rest).unwrap();
        assert_eq!(r.count(), 11);
    }

    #[test]
    fn zero_length_result_is_still_present() {
        let r = ReadResult::bytes(0);
        assert_eq!(r.bytes_read(), 0);
        let present: Option<ReadResult<()>> = Some(r);
        assert!(present.is_some());
    }
}
