//! Mercurial backend.
//!
//! Mercurial calls its remotes "paths"; they live in the `[paths]` section
//! of `.hg/hgrc`. This backend exposes them through the uniform remote
//! vocabulary of the [`Vcs`] trait. The primary path created by `hg clone`
//! is named `default`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::config::Remote;
use crate::error::{Error, Result};
use crate::runner::Runner;
use crate::vcs::Vcs;

/// A Mercurial working copy at a fixed path.
pub struct HgRepo {
    path: PathBuf,
    url: String,
    remotes: Vec<Remote>,
    runner: Runner,
}

impl HgRepo {
    pub fn new(path: PathBuf, url: String, remotes: Vec<Remote>, runner: Runner) -> Self {
        Self {
            path,
            url,
            remotes,
            runner,
        }
    }

    fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn hgrc_path(&self) -> PathBuf {
        self.path.join(".hg").join("hgrc")
    }
}

impl Vcs for HgRepo {
    fn obtain(&self) -> Result<()> {
        let dest = self.path.to_string_lossy().into_owned();
        self.runner
            .run(&["hg", "clone", &self.url, &dest], self.parent_dir())?;

        for remote in &self.remotes {
            self.remote_set(&remote.name, &remote.url)?;
        }
        Ok(())
    }

    fn update_repo(&self) -> Result<()> {
        self.runner.run(&["hg", "pull"], &self.path)?;
        // --check refuses to move the working directory across uncommitted
        // or conflicting changes, mirroring git's --ff-only policy.
        match self.runner.run(&["hg", "update", "--check"], &self.path) {
            Ok(_) => Ok(()),
            Err(Error::ExternalCommand { stderr, .. }) if is_blocked_update(&stderr) => {
                Err(Error::UpdateConflict {
                    path: self.path.clone(),
                    message: stderr.trim().to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn get_revision(&self) -> Result<String> {
        let output = self
            .runner
            .run(&["hg", "log", "--rev", ".", "--template", "{node}"], &self.path)?;
        Ok(output.stdout.trim().to_string())
    }

    fn remotes_get(&self) -> Result<BTreeMap<String, String>> {
        let output = self.runner.run(&["hg", "paths"], &self.path)?;
        Ok(parse_paths(&output.stdout))
    }

    fn remote_get(&self, name: &str) -> Result<String> {
        self.remotes_get()?
            .remove(name)
            .ok_or_else(|| Error::RemoteNotFound {
                name: name.to_string(),
            })
    }

    fn remote_set(&self, name: &str, url: &str) -> Result<String> {
        // `hg` has no CLI for writing paths, so edit `.hg/hgrc` directly.
        let hgrc = self.hgrc_path();
        let mut config = if hgrc.exists() {
            Ini::load_from_file(&hgrc).map_err(|e| Error::ConfigParse {
                message: format!("cannot read {}: {}", hgrc.display(), e),
                hint: None,
            })?
        } else {
            Ini::new()
        };

        config.with_section(Some("paths")).set(name, url);
        config.write_to_file(&hgrc)?;
        Ok(url.to_string())
    }
}

/// Parse `hg paths` output (`name = url` per line) into a map.
fn parse_paths(output: &str) -> BTreeMap<String, String> {
    let mut paths = BTreeMap::new();
    for line in output.lines() {
        if let Some((name, url)) = line.split_once('=') {
            let (name, url) = (name.trim(), url.trim());
            if !name.is_empty() && !url.is_empty() {
                paths.insert(name.to_string(), url.to_string());
            }
        }
    }
    paths
}

/// Whether a refused `hg update --check` indicates local changes in the
/// way, as opposed to an infrastructure failure.
fn is_blocked_update(stderr: &str) -> bool {
    stderr.contains("uncommitted changes")
        || stderr.contains("conflicting changes")
        || stderr.contains("crosses branches")
}
