//! Git backend.
//!
//! Uses the system `git` command, which automatically handles SSH keys,
//! credential helpers, personal access tokens and anything else configured
//! in the user's `~/.gitconfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Remote;
use crate::error::{Error, Result};
use crate::runner::Runner;
use crate::vcs::Vcs;

/// A git working copy at a fixed path, bound to one transport URL.
pub struct GitRepo {
    path: PathBuf,
    url: String,
    remotes: Vec<Remote>,
    runner: Runner,
}

impl GitRepo {
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
}

impl Vcs for GitRepo {
    fn obtain(&self) -> Result<()> {
        let dest = self.path.to_string_lossy().into_owned();
        self.runner
            .run(&["git", "clone", &self.url, &dest], self.parent_dir())?;

        // Extra named remotes are registered right after the clone so a
        // freshly obtained working copy already matches its definition.
        for remote in &self.remotes {
            self.remote_set(&remote.name, &remote.url)?;
        }
        Ok(())
    }

    fn update_repo(&self) -> Result<()> {
        // --ff-only is the fail-safe policy: never merge or rebase away
        // local commits, surface divergence instead.
        match self.runner.run(&["git", "pull", "--ff-only"], &self.path) {
            Ok(_) => Ok(()),
            Err(Error::ExternalCommand { stderr, .. }) if is_divergence(&stderr) => {
                Err(Error::UpdateConflict {
                    path: self.path.clone(),
                    message: stderr.trim().to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn get_revision(&self) -> Result<String> {
        let output = self.runner.run(&["git", "rev-parse", "HEAD"], &self.path)?;
        Ok(output.stdout.trim().to_string())
    }

    fn remotes_get(&self) -> Result<BTreeMap<String, String>> {
        let output = self.runner.run(&["git", "remote", "-v"], &self.path)?;
        Ok(parse_remotes(&output.stdout))
    }

    fn remote_get(&self, name: &str) -> Result<String> {
        self.remotes_get()?
            .remove(name)
            .ok_or_else(|| Error::RemoteNotFound {
                name: name.to_string(),
            })
    }

    fn remote_set(&self, name: &str, url: &str) -> Result<String> {
        let argv = if self.remotes_get()?.contains_key(name) {
            ["git", "remote", "set-url", name, url]
        } else {
            ["git", "remote", "add", name, url]
        };
        self.runner.run(&argv, &self.path)?;
        Ok(url.to_string())
    }
}

/// Parse `git remote -v` output into `name -> fetch URL`.
///
/// Lines look like `origin\tfile:///tmp/r (fetch)`; push entries are
/// skipped since obtain/update only ever fetch.
fn parse_remotes(output: &str) -> BTreeMap<String, String> {
    let mut remotes = BTreeMap::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(url), kind) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        if kind.is_none() || kind == Some("(fetch)") {
            remotes.insert(name.to_string(), url.to_string());
        }
    }
    remotes
}

/// Whether a failed `git pull --ff-only` stderr indicates diverged history
/// rather than an infrastructure failure.
fn is_divergence(stderr: &str) -> bool {
    stderr.contains("Not possible to fast-forward")
        || stderr.contains("divergent branches")
        || stderr.contains("refusing to merge unrelated histories")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remotes_fetch_and_push() {
        let output = "\
origin\tfile:///tmp/origin (fetch)
origin\tfile:///tmp/origin (push)
upstream\thttps://example.com/up.git (fetch)
upstream\thttps://example.com/up.git (push)
";
        let remotes = parse_remotes(output);
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes["origin"], "file:///tmp/origin");
        assert_eq!(remotes["upstream"], "https://example.com/up.git");
    }

    #[test]
    fn test_parse_remotes_empty() {
        assert!(parse_remotes("").is_empty());
    }

    #[test]
    fn test_is_divergence_matches_git_messages() {
        assert!(is_divergence(
            "fatal: Not possible to fast-forward, aborting."
        ));
        assert!(is_divergence(
            "hint: You have divergent branches and need to specify how to reconcile them."
        ));
        assert!(is_divergence("fatal: refusing to merge unrelated histories"));
        assert!(!is_divergence("fatal: could not read from remote repository"));
    }
}
