//! `resfetch put` – upload a local file.

use anyhow::{Context, Result};
use resfetch_core::resource::{ExternalResource, LocalFile};
use std::path::Path;

use crate::cli::session::Session;

pub fn run_put(session: &Session, file: &Path, url: &str) -> Result<()> {
    let resource = session.open(url)?;
    let source = LocalFile::new(file);
    resource
        .put(&source)
        .with_context(|| format!("upload {} to {}", file.display(), resource.display_name()))?;
    println!("{} -> {}", file.display(), resource.display_name());
    Ok(())
}
