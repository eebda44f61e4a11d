//! `resfetch completions` – shell completion scripts.

use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

pub fn run_completions(shell: Shell, cmd: &mut Command) -> Result<()> {
    generate(shell, cmd, "resfetch", &mut io::stdout());
    Ok(())
}
