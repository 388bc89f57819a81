//! # Sync Command Implementation
//!
//! The `sync` subcommand is the main entry point: it loads the
//! configuration, expands and filters it into repository specs, then
//! ensures every selected repository is present and up to date (cloning
//! missing working copies, updating existing ones, reconciling extra
//! remotes).
//!
//! One line is printed per repository with the action taken and the
//! resulting revision. A repository failure is reported and counted but
//! never stops the rest of the run; the command exits non-zero if any
//! repository failed.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;

use vcsync::config::{self, Filters};
use vcsync::output::OutputConfig;
use vcsync::runner::Runner;
use vcsync::sync;

/// Clone missing repositories and update existing ones
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the configuration file (defaults to ~/.vcsync.yaml or ~/.vcsync.json)
    #[arg(short, long, value_name = "FILE", env = "VCSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only sync repositories under directories matching this glob pattern
    #[arg(short = 'd', long, value_name = "PATTERN")]
    pub dirmatch: Option<String>,

    /// Only sync repositories whose URL matches this glob pattern
    #[arg(short = 'r', long, value_name = "PATTERN")]
    pub repomatch: Option<String>,

    /// Only sync repositories whose name matches this glob pattern
    #[arg(value_name = "NAMEMATCH")]
    pub namematch: Option<String>,

    /// Kill any single VCS invocation after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of repositories to process in parallel
    #[arg(short = 'j', long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let config_path = super::resolve_config_path(args.config)?;

    let filters = Filters {
        dirmatch: args.dirmatch,
        repomatch: args.repomatch,
        namematch: args.namematch,
    };
    let specs = config::load_and_select(&config_path, &filters)?;

    if specs.is_empty() {
        println!("No repositories selected.");
        return Ok(());
    }

    let runner = Runner::with_timeout(args.timeout.map(Duration::from_secs));
    let outcomes = sync::sync_all(specs, runner, args.jobs);

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "{:>7} {} {} -> {}",
                    output.ok(&report.action.to_string()),
                    outcome.name,
                    outcome.path.display(),
                    report.revision
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{:>7} {}: {}", output.failed("failed"), outcome.name, e);
            }
        }
    }

    println!(
        "{} repositories synchronized, {} failed",
        outcomes.len() - failed,
        failed
    );

    if failed > 0 {
        bail!("{} of {} repositories failed", failed, outcomes.len());
    }
    Ok(())
}
