//! Subversion backend.
//!
//! Subversion is centralized: there is no clone-vs-pull distinction and no
//! multi-remote model. `obtain` is a checkout, `update_repo` is `svn
//! update`, and the remote operations run in a documented degraded mode
//! exposing only the checkout's single repository URL.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{Error, Result};
use crate::runner::Runner;
use crate::scheme::VcsKind;
use crate::vcs::Vcs;

/// A Subversion working copy at a fixed path.
pub struct SvnRepo {
    path: PathBuf,
    url: String,
    runner: Runner,
}

impl SvnRepo {
    pub fn new(path: PathBuf, url: String, runner: Runner) -> Self {
        Self { path, url, runner }
    }

    fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The repository URL recorded in the working copy.
    fn checkout_url(&self) -> Result<String> {
        let output = self
            .runner
            .run(&["svn", "info", "--show-item", "url"], &self.path)?;
        Ok(output.stdout.trim().to_string())
    }
}

impl Vcs for SvnRepo {
    fn obtain(&self) -> Result<()> {
        let dest = self.path.to_string_lossy().into_owned();
        self.runner.run(
            &["svn", "checkout", "--non-interactive", &self.url, &dest],
            self.parent_dir(),
        )?;
        Ok(())
    }

    fn update_repo(&self) -> Result<()> {
        self.runner
            .run(&["svn", "update", "--non-interactive"], &self.path)?;
        Ok(())
    }

    fn get_revision(&self) -> Result<String> {
        let output = self
            .runner
            .run(&["svn", "info", "--show-item", "revision"], &self.path)?;
        Ok(output.stdout.trim().to_string())
    }

    fn remotes_get(&self) -> Result<BTreeMap<String, String>> {
        // Degraded mode: a single entry for the checkout URL.
        let mut remotes = BTreeMap::new();
        remotes.insert(
            VcsKind::Subversion.primary_remote_name().to_string(),
            self.checkout_url()?,
        );
        Ok(remotes)
    }

    fn remote_get(&self, name: &str) -> Result<String> {
        if name == VcsKind::Subversion.primary_remote_name() {
            self.checkout_url()
        } else {
            Err(Error::RemoteNotFound {
                name: name.to_string(),
            })
        }
    }

    fn remote_set(&self, name: &str, _url: &str) -> Result<String> {
        // Capability gap, not an error: svn working copies have exactly one
        // repository URL.
        warn!(
            "subversion has no named remotes; ignoring remote '{}' for {}",
            name,
            self.path.display()
        );
        self.checkout_url()
    }
}
