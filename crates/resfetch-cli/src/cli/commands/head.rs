//! `resfetch head` – print resource metadata.

use anyhow::{bail, Result};
use resfetch_core::resource::{ExternalResource, ResourceMetaData};

use crate::cli::session::Session;

pub fn run_head(session: &Session, url: &str) -> Result<()> {
    let resource = session.open(url)?;
    let Some(metadata) = resource.metadata()? else {
        bail!("{} not found", resource.display_name());
    };
    print!("{}", format_metadata(&metadata));
    Ok(())
}

/// One `key: value` line per known field.
pub fn format_metadata(metadata: &ResourceMetaData) -> String {
    let mut out = format!("location: {}\n", metadata.location);
    let fields = [
        ("content-length", metadata.content_length.map(|n| n.to_string())),
        ("content-type", metadata.content_type.clone()),
        ("last-modified", metadata.last_modified.clone()),
        ("etag", metadata.etag.clone()),
        ("sha1", metadata.sha1.clone()),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("{key}: {value}\n"));
        }
    }
    out
}
