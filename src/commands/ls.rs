//! # Ls Command Implementation
//!
//! The `ls` subcommand resolves the configuration into its flat repository
//! list, applies the same selection filters as `sync`, and prints the
//! result without spawning a single VCS process. It is the safe way to
//! inspect what a `sync` run would operate on.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use vcsync::config::{self, Filters, RepoSpec};

/// List the repositories a configuration resolves to
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the configuration file (defaults to ~/.vcsync.yaml or ~/.vcsync.json)
    #[arg(short, long, value_name = "FILE", env = "VCSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only list repositories under directories matching this glob pattern
    #[arg(short = 'd', long, value_name = "PATTERN")]
    pub dirmatch: Option<String>,

    /// Only list repositories whose URL matches this glob pattern
    #[arg(short = 'r', long, value_name = "PATTERN")]
    pub repomatch: Option<String>,

    /// Only list repositories whose name matches this glob pattern
    #[arg(value_name = "NAMEMATCH")]
    pub namematch: Option<String>,

    /// Emit the list as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// One row of `ls` output.
#[derive(Serialize)]
struct LsEntry {
    name: String,
    vcs: String,
    path: PathBuf,
    url: String,
    remotes: Vec<vcsync::config::Remote>,
}

impl From<RepoSpec> for LsEntry {
    fn from(spec: RepoSpec) -> Self {
        let vcs = spec
            .vcs_kind()
            .map(|k| k.to_string())
            .unwrap_or_else(|_| "invalid".to_string());
        LsEntry {
            name: spec.name.clone(),
            vcs,
            path: spec.path(),
            url: spec.url,
            remotes: spec.remotes,
        }
    }
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let config_path = super::resolve_config_path(args.config)?;

    let filters = Filters {
        dirmatch: args.dirmatch,
        repomatch: args.repomatch,
        namematch: args.namematch,
    };
    let specs = config::load_and_select(&config_path, &filters)?;
    let entries: Vec<LsEntry> = specs.into_iter().map(LsEntry::from).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No repositories selected.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:<4} {:<24} {} <- {}",
            entry.vcs,
            entry.name,
            entry.path.display(),
            entry.url
        );
    }
    println!();
    println!("{} repository(ies)", entries.len());

    Ok(())
}
