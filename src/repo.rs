//! # Repository Entity
//!
//! [`Repository`] is the addressable unit the sync engine operates on: a
//! [`RepoSpec`] plus behavior. Construction resolves the spec's URL scheme
//! once and binds the matching backend variant; after that every call is a
//! plain forward through the [`Vcs`] trait, so no caller ever branches on
//! the VCS kind.
//!
//! Per run each entity moves through a two-state machine:
//!
//! ```text
//! Absent  --obtain()-->  Present
//! Present --update_repo()/remote ops-->  Present
//! ```
//!
//! `Absent` means the working-copy path does not exist or is an empty
//! directory. Calling `update_repo()` while absent, or `obtain()` while
//! present, is a caller error (`NotObtained` / `AlreadyObtained`) and is
//! never silently corrected. Nothing here ever removes a working copy.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::RepoSpec;
use crate::error::{Error, Result};
use crate::runner::Runner;
use crate::scheme::{self, VcsKind};
use crate::vcs::{git::GitRepo, hg::HgRepo, svn::SvnRepo, Vcs};

/// One synchronization target, dispatching to its VCS backend.
pub struct Repository {
    spec: RepoSpec,
    kind: VcsKind,
    backend: Box<dyn Vcs>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("spec", &self.spec)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Resolve the spec's URL and bind the matching backend.
    ///
    /// Fails with `MalformedUrl`/`UnsupportedVcs` before any process is
    /// spawned if the URL does not parse under the scheme grammar.
    pub fn new(spec: RepoSpec, runner: Runner) -> Result<Self> {
        let (kind, transport) = scheme::resolve(&spec.url)?;
        let transport = transport.to_string();
        let path = spec.path();

        let backend: Box<dyn Vcs> = match kind {
            VcsKind::Git => Box::new(GitRepo::new(path, transport, spec.remotes.clone(), runner)),
            VcsKind::Mercurial => {
                Box::new(HgRepo::new(path, transport, spec.remotes.clone(), runner))
            }
            VcsKind::Subversion => Box::new(SvnRepo::new(path, transport, runner)),
        };

        Ok(Self {
            spec,
            kind,
            backend,
        })
    }

    /// The spec this entity was built from.
    pub fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    /// The resolved VCS kind.
    pub fn kind(&self) -> VcsKind {
        self.kind
    }

    /// The working-copy path.
    pub fn path(&self) -> PathBuf {
        self.spec.path()
    }

    /// Whether a working copy is present.
    ///
    /// An existing but empty directory still counts as absent; the VCS
    /// tools themselves are happy to clone into one.
    pub fn is_obtained(&self) -> bool {
        let path = self.path();
        match fs::read_dir(&path) {
            Ok(mut entries) => entries.next().is_some(),
            Err(_) => false,
        }
    }

    /// Create the working copy. The parent directory is created first if
    /// needed.
    pub fn obtain(&self) -> Result<()> {
        if self.is_obtained() {
            return Err(Error::AlreadyObtained { path: self.path() });
        }
        fs::create_dir_all(&self.spec.parent_path)
            .map_err(|e| Error::from(e).in_operation("obtain", &self.spec.name))?;
        debug!("obtaining {} ({}) into {}", self.spec.name, self.kind, self.path().display());
        self.dispatch("obtain", self.backend.obtain())
    }

    /// Update an existing working copy from its primary remote.
    pub fn update_repo(&self) -> Result<()> {
        if !self.is_obtained() {
            return Err(Error::NotObtained { path: self.path() });
        }
        debug!("updating {} at {}", self.spec.name, self.path().display());
        self.dispatch("update_repo", self.backend.update_repo())
    }

    /// Obtain the working copy if absent, update it otherwise.
    pub fn ensure(&self) -> Result<SyncAction> {
        if self.is_obtained() {
            self.update_repo()?;
            Ok(SyncAction::Updated)
        } else {
            self.obtain()?;
            Ok(SyncAction::Cloned)
        }
    }

    /// The revision identifier of the current checkout.
    pub fn get_revision(&self) -> Result<String> {
        self.dispatch("get_revision", self.backend.get_revision())
    }

    /// All named remotes, `name -> url`.
    pub fn remotes_get(&self) -> Result<BTreeMap<String, String>> {
        self.dispatch("remotes_get", self.backend.remotes_get())
    }

    /// The URL of one named remote.
    pub fn remote_get(&self, name: &str) -> Result<String> {
        self.dispatch("remote_get", self.backend.remote_get(name))
    }

    /// Create or overwrite a named remote, echoing back the stored URL.
    pub fn remote_set(&self, name: &str, url: &str) -> Result<String> {
        self.dispatch("remote_set", self.backend.remote_set(name, url))
    }

    /// Re-apply every configured extra remote to the working copy, so a
    /// changed configuration converges existing checkouts too.
    pub fn reconcile_remotes(&self) -> Result<()> {
        for remote in &self.spec.remotes {
            self.remote_set(&remote.name, &remote.url)?;
        }
        Ok(())
    }

    fn dispatch<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        result.map_err(|e| e.in_operation(operation, &self.spec.name))
    }
}

/// What `ensure` did to a working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    /// The working copy was absent and has been obtained.
    Cloned,
    /// The working copy existed and has been updated.
    Updated,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncAction::Cloned => f.write_str("cloned"),
            SyncAction::Updated => f.write_str("updated"),
        }
    }
}
