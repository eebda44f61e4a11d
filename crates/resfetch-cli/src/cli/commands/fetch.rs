//! `resfetch fetch` – download a resource to a local file.

use anyhow::{Context, Result};
use resfetch_core::resource::{ExternalResource, ExternalResourceName};
use resfetch_core::url_model::derive_filename;
use std::path::Path;

use crate::cli::session::Session;

pub fn run_fetch(
    session: &Session,
    url: &str,
    output: Option<&Path>,
    if_present: bool,
) -> Result<()> {
    let resource = session.open(url)?;
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let name = ExternalResourceName::new(resource.uri().clone());
            std::env::current_dir()?.join(derive_filename(&name))
        }
    };
    match fetch_to(&resource, &destination, if_present)? {
        Some(bytes) => println!("{} ({bytes} bytes)", destination.display()),
        None => println!("{}: not present", resource.display_name()),
    }
    Ok(())
}

/// Writes `resource` to `destination`. `None` when `if_present` and nothing exists.
pub fn fetch_to<R: ExternalResource>(
    resource: &R,
    destination: &Path,
    if_present: bool,
) -> Result<Option<u64>> {
    let context = || format!("fetch {}", resource.display_name());
    if if_present {
        let read = resource
            .write_to_if_present(destination)
            .with_context(context)?;
        Ok(read.map(|r| r.bytes_read()))
    } else {
        let read = resource.write_to(destination).with_context(context)?;
        Ok(Some(read.bytes_read()))
    }
}
