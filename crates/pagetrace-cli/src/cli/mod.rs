//! CLI for pagetrace.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use pagetrace_core::config;
use std::path::PathBuf;

use commands::{
    run_completions, run_manpage, run_manifest, run_scan, run_timings, PageInput, SheetArg,
};

/// Top-level CLI for pagetrace.
#[derive(Debug, Parser)]
#[command(name = "pagetrace")]
#[command(about = "pagetrace: page resource inventory and resource timing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where a page comes from: its markup on disk, the address it was served
/// from, and the style sheet bodies to attach.
#[derive(Debug, clap::Args)]
pub struct PageArgs {
    /// Path to the saved HTML document.
    pub html: PathBuf,

    /// Address the document was loaded from; relative references resolve against it.
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Body of a linked style sheet, fetched without CORS.
    #[arg(long = "sheet", value_name = "URL=PATH", value_parser = SheetArg::parse)]
    pub sheets: Vec<SheetArg>,

    /// Body of a linked style sheet fetched in CORS mode (readable if the link has `crossorigin`).
    #[arg(long = "cors-sheet", value_name = "URL=PATH", value_parser = SheetArg::parse)]
    pub cors_sheets: Vec<SheetArg>,
}

impl From<PageArgs> for PageInput {
    fn from(args: PageArgs) -> Self {
        PageInput {
            html: args.html,
            url: args.url,
            sheets: args.sheets,
            cors_sheets: args.cors_sheets,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Inventory the resources a saved page references.
    Scan {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Replay a HAR capture through a resource timeline and print the collected timing log.
    Timings {
        /// Path to the HAR file.
        har: PathBuf,

        /// Entries reported before the collector attaches (they reach it via the buffer).
        #[arg(long, default_value = "0", value_name = "N")]
        buffered: usize,

        /// Replay at the captured start times and stop once the network is idle.
        #[arg(long)]
        realtime: bool,
    },

    /// Merge a page's scanned references with its HAR timing into one list.
    Manifest {
        #[command(flatten)]
        page: PageArgs,

        /// HAR capture of the same page load.
        #[arg(long, value_name = "PATH")]
        har: Option<PathBuf>,

        /// Print distinct urls only.
        #[arg(long)]
        unique: bool,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        match cli.command {
            CliCommand::Completions { shell } => {
                run_completions(&mut Cli::command(), shell);
                return Ok(());
            }
            CliCommand::Manpage => return run_manpage(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan { page } => run_scan(&cfg, &page.into())?,
            CliCommand::Timings {
                har,
                buffered,
                realtime,
            } => run_timings(&cfg, &har, buffered, realtime).await?,
            CliCommand::Manifest { page, har, unique } => {
                run_manifest(&cfg, &page.into(), har.as_deref(), unique)?
            }
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
