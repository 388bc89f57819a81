//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `vcsync` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `vcsync` library.

pub mod completions;
pub mod ls;
pub mod sync;

use std::path::PathBuf;

use anyhow::{bail, Result};

use vcsync::defaults;

/// Resolve the configuration file for a run.
///
/// An explicit `--config` wins and must exist. Otherwise the per-user
/// candidates (`~/.vcsync.yaml`, `~/.vcsync.json`) are probed; exactly one
/// may be present.
pub(crate) fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("configuration file not found: {}", path.display());
        }
        return Ok(path);
    }

    let present: Vec<PathBuf> = defaults::home_config_candidates()
        .into_iter()
        .filter(|p| p.exists())
        .collect();

    match present.as_slice() {
        [] => bail!(
            "no configuration file found: create ~/{}.yaml or ~/{}.json, or pass --config",
            defaults::CONFIG_BASENAME,
            defaults::CONFIG_BASENAME
        ),
        [single] => Ok(single.clone()),
        _ => bail!(
            "multiple configuration files found in home directory; keep only one of {}.yaml / {}.json",
            defaults::CONFIG_BASENAME,
            defaults::CONFIG_BASENAME
        ),
    }
}
