//! `resfetch cat` – stream a resource to stdout.

use anyhow::Result;
use resfetch_core::resource::ExternalResource;
use std::io;

use crate::cli::session::Session;

pub fn run_cat(session: &Session, url: &str) -> Result<()> {
    let resource = session.open(url)?;
    let stdout = io::stdout();
    let read = resource.write_to_stream(&mut stdout.lock())?;
    tracing::debug!(bytes = read.bytes_read(), "cat finished");
    Ok(())
}
