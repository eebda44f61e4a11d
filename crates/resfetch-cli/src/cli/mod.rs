//! CLI for resfetch.

mod commands;
mod session;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use resfetch_core::config;
use std::path::PathBuf;

use commands::{
    run_cat, run_checksum, run_completions, run_fetch, run_head, run_ls, run_manpage, run_put,
    run_repos,
};
use session::Session;

/// Top-level CLI for resfetch.
#[derive(Debug, Parser)]
#[command(name = "resfetch")]
#[command(about = "Fetch, inspect and upload external resources with operation tracing")]
#[command(long_about = None)]
pub struct Cli {
    /// Append one JSON line per finished operation to this file (overrides config).
    #[arg(long, global = true, value_name = "PATH")]
    pub trace_file: Option<PathBuf>,

    /// Do not print per-operation progress lines on stderr.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a resource to a local file.
    Fetch {
        /// Resource URI (file://, http://, https://) or local path.
        url: String,
        /// Destination file (default: derived from the URI, in the current directory).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Succeed without writing anything when the resource does not exist.
        #[arg(long)]
        if_present: bool,
    },

    /// Write a resource's content to stdout.
    Cat {
        url: String,
    },

    /// List the entries of a container resource (e.g. a directory).
    Ls {
        url: String,
    },

    /// Upload a local file to a resource.
    Put {
        /// Local file to upload.
        file: PathBuf,
        /// Destination resource URI.
        url: String,
    },

    /// Show resource metadata without reading its content.
    Head {
        url: String,
    },

    /// Compute SHA-256 of a resource while streaming it.
    Checksum {
        url: String,
    },

    /// Show configured plugin repositories and version pins.
    Repos,

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate a man page (roff) on stdout.
    Manpage,
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();

    // These need neither config nor transports.
    match &cli.command {
        CliCommand::Completions { shell } => return run_completions(*shell, &mut Cli::command()),
        CliCommand::Manpage => return run_manpage(Cli::command()),
        _ => {}
    }

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let session = Session::new(&cfg, cli.trace_file.as_deref(), cli.quiet)?;

    match cli.command {
        CliCommand::Fetch {
            url,
            output,
            if_present,
        } => run_fetch(&session, &url, output.as_deref(), if_present)?,
        CliCommand::Cat { url } => run_cat(&session, &url)?,
        CliCommand::Ls { url } => run_ls(&session, &url)?,
        CliCommand::Put { file, url } => run_put(&session, &file, &url)?,
        CliCommand::Head { url } => run_head(&session, &url)?,
        CliCommand::Checksum { url } => run_checksum(&session, &url)?,
        CliCommand::Repos => run_repos(&cfg)?,
        CliCommand::Completions { .. } | CliCommand::Manpage => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests;
