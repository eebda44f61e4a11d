//! SHA-256 of resource content, computed while streaming.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Read;

use crate::resource::{ContentAction, ResourceMetaData};

const BUF_SIZE: usize = 64 * 1024;

/// Hash everything `reader` yields and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large files.
pub fn sha256_reader(reader: &mut dyn Read) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Content action producing the SHA-256 hex digest of a resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Action;

impl ContentAction for Sha256Action {
    type Output = String;

    fn execute(self, content: &mut dyn Read, metadata: &ResourceMetaData) -> Result<String> {
        sha256_reader(content).with_context(|| format!("hash {}", metadata.location))
    }
}
