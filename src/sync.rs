//! # Run Engine
//!
//! Processes a list of [`RepoSpec`]s: each one is ensured present (cloned
//! if absent, updated otherwise), its extra remotes are reconciled, and its
//! resulting revision is read back for the run report.
//!
//! Failures are scoped to the spec being processed. A repository that fails
//! to clone or update never stops its siblings; the engine returns the
//! ordered list of per-spec outcomes and lets the caller decide exit-code
//! policy.
//!
//! Specs are processed sequentially by default. With `jobs > 1`, a bounded
//! rayon pool runs independent specs in parallel, which is safe because
//! expansion guarantees every spec targets a distinct path; two operations
//! never race on one working copy.

use std::path::PathBuf;

use log::{info, warn};
use rayon::prelude::*;

use crate::config::RepoSpec;
use crate::error::Result;
use crate::repo::{Repository, SyncAction};
use crate::runner::Runner;

/// What happened to one successfully processed repository.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub action: SyncAction,
    /// Revision of the working copy after the run.
    pub revision: String,
}

/// Per-spec result of a run, success or specific error.
#[derive(Debug)]
pub struct SyncOutcome {
    pub name: String,
    pub path: PathBuf,
    pub url: String,
    pub result: Result<SyncReport>,
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Synchronize every spec, returning outcomes in spec order.
///
/// `jobs` bounds the worker pool; `0` and `1` both mean sequential.
pub fn sync_all(specs: Vec<RepoSpec>, runner: Runner, jobs: usize) -> Vec<SyncOutcome> {
    if jobs > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => {
                return pool.install(|| {
                    specs
                        .into_par_iter()
                        .map(|spec| sync_one(spec, runner))
                        .collect()
                });
            }
            Err(e) => {
                warn!("falling back to sequential sync: {}", e);
            }
        }
    }

    specs
        .into_iter()
        .map(|spec| sync_one(spec, runner))
        .collect()
}

/// Process one spec to completion: ensure present or updated, reconcile
/// remotes on existing working copies, read back the revision.
pub fn sync_one(spec: RepoSpec, runner: Runner) -> SyncOutcome {
    let name = spec.name.clone();
    let path = spec.path();
    let url = spec.url.clone();

    let result = (|| {
        let repo = Repository::new(spec, runner)?;
        let action = repo.ensure()?;
        // A fresh obtain already registered the configured remotes; only an
        // existing working copy needs reconciling against the configuration.
        if action == SyncAction::Updated {
            repo.reconcile_remotes()?;
        }
        let revision = repo.get_revision()?;
        info!("{} {} at revision {}", action, repo.spec().name, revision);
        Ok(SyncReport { action, revision })
    })();

    SyncOutcome {
        name,
        path,
        url,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn bad_spec(dir: &TempDir, name: &str, url: &str) -> RepoSpec {
        RepoSpec {
            name: name.to_string(),
            parent_path: dir.path().to_path_buf(),
            url: url.to_string(),
            remotes: Vec::new(),
        }
    }

    #[test]
    fn test_invalid_url_is_rejected_before_dispatch() {
        let temp = TempDir::new().unwrap();
        let outcome = sync_one(bad_spec(&temp, "proj", "no-separator"), Runner::new());
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome.result.unwrap_err(),
            Error::MalformedUrl { .. }
        ));
        // Nothing was created on disk.
        assert!(!temp.path().join("proj").exists());
    }

    #[test]
    fn test_one_failure_does_not_stop_siblings() {
        let temp = TempDir::new().unwrap();
        let specs = vec![
            bad_spec(&temp, "first", "foo+file:///x"),
            bad_spec(&temp, "second", "bar+file:///y"),
        ];
        let outcomes = sync_all(specs, Runner::new(), 1);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "first");
        assert_eq!(outcomes[1].name, "second");
        assert!(outcomes.iter().all(|o| !o.is_success()));
    }

    #[test]
    fn test_parallel_outcomes_preserve_spec_order() {
        let temp = TempDir::new().unwrap();
        let specs: Vec<RepoSpec> = (0..8)
            .map(|i| bad_spec(&temp, &format!("repo{}", i), "foo+file:///x"))
            .collect();
        let outcomes = sync_all(specs, Runner::new(), 4);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["repo0", "repo1", "repo2", "repo3", "repo4", "repo5", "repo6", "repo7"]
        );
    }
}
