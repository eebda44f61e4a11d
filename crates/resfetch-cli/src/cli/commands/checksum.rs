//! `resfetch checksum` – SHA-256 of a resource.

use anyhow::Result;
use resfetch_core::checksum::Sha256Action;
use resfetch_core::resource::ExternalResource;

use crate::cli::session::Session;

/// Compute and print SHA-256 of the resource at `url`.
pub fn run_checksum(session: &Session, url: &str) -> Result<()> {
    let resource = session.open(url)?;
    let digest = resource.with_content_action(Sha256Action)?.into_result();
    println!("{}  {}", digest, resource.display_name());
    Ok(())
}
