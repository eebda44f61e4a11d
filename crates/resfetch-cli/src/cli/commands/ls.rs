//! `resfetch ls` – list entries of a container resource.

use anyhow::{bail, Result};
use resfetch_core::resource::ExternalResource;

use crate::cli::session::Session;

pub fn run_ls(session: &Session, url: &str) -> Result<()> {
    let resource = session.open(url)?;
    let Some(entries) = resource.list()? else {
        bail!("{} cannot be listed", resource.display_name());
    };
    for entry in entries {
        println!("{entry}");
    }
    Ok(())
}
