//! `resfetch manpage` – roff man page on stdout.

use anyhow::Result;
use clap::Command;
use std::io;

pub fn run_manpage(cmd: Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
