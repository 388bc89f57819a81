//! # Configuration Expansion & Selection
//!
//! This module turns the raw configuration tree into the flat, ordered list
//! of [`RepoSpec`] values the sync engine runs against.
//!
//! The on-disk format is a nested mapping of parent directory to repository
//! name to repository definition:
//!
//! ```yaml
//! ~/work:
//!   vcsync: git+https://example.com/vcsync.git
//!   mirror:
//!     url: git+https://example.com/mirror.git
//!     remotes:
//!       upstream: https://example.com/upstream.git
//! ```
//!
//! A definition is either a bare scheme-qualified URL (shorthand) or a
//! structured block with `url`, optional `remotes` and an optional `name`
//! override. Expansion performs, in order:
//!
//! 1. **Path expansion**: `~` and `$VAR`/`${VAR}` references in parent
//!    directories and URLs are resolved; unexpandable references fail with
//!    `ConfigPath`.
//! 2. **Normalization**: shorthand definitions are promoted to the full
//!    structured form with an empty remotes list.
//! 3. **Collision detection**: two definitions resolving to the same
//!    working-copy path make the whole configuration ambiguous and are
//!    rejected before any external process runs.
//!
//! Selection then applies up to three independent glob filters (directory,
//! URL, name), ANDed together. Encounter order of the source mapping is
//! preserved throughout so run logs are reproducible.
//!
//! Only the in-memory `serde_yaml::Value` shape matters here; `load_file`
//! is the one place that touches the filesystem, and JSON configs parse
//! through the same code path since YAML 1.2 is a superset.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::path::{expand_path, expand_vars, glob_match};
use crate::scheme::{self, VcsKind};

/// A named extra remote, additional to the implicit primary remote encoded
/// in the spec's own URL. Remote URLs are used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// A fully-resolved description of one synchronization target.
///
/// Immutable input to a [`crate::repo::Repository`]; constructed once per
/// run and never mutated after dispatch begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSpec {
    /// Unique within `parent_path`; used as the local directory name.
    pub name: String,
    /// Directory that contains (or will contain) the working copy.
    pub parent_path: PathBuf,
    /// Scheme-qualified remote URL (`<vcs>+<transport>://...`).
    pub url: String,
    /// Extra named remotes, in configuration order, names unique.
    pub remotes: Vec<Remote>,
}

impl RepoSpec {
    /// The working-copy path. Always derived, never stored independently.
    pub fn path(&self) -> PathBuf {
        self.parent_path.join(&self.name)
    }

    /// The VCS kind encoded in `url`.
    pub fn vcs_kind(&self) -> Result<VcsKind> {
        scheme::resolve(&self.url).map(|(kind, _)| kind)
    }
}

/// Optional selection filters, ANDed when more than one is supplied.
///
/// Each is a shell-glob pattern (`*`, `?`, bracket classes), case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Matched against the expanded parent directory.
    pub dirmatch: Option<String>,
    /// Matched against the scheme-qualified repository URL.
    pub repomatch: Option<String>,
    /// Matched against the repository name.
    pub namematch: Option<String>,
}

/// Read and parse a configuration file into the raw tree.
///
/// YAML and JSON both parse here; JSON is a subset of YAML 1.2.
pub fn load_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Expand the raw configuration tree into a flat, ordered spec list.
pub fn expand(raw: &Value) -> Result<Vec<RepoSpec>> {
    let dirs = raw.as_mapping().ok_or_else(|| Error::ConfigParse {
        message: "top level must be a mapping of parent directories".to_string(),
        hint: Some("start entries with a directory, e.g. '~/work:'".to_string()),
    })?;

    let mut specs = Vec::new();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for (dir_key, repos) in dirs {
        let dir = string_key(dir_key, "parent directory")?;
        let parent_path = expand_path(dir)?;

        let repos = repos.as_mapping().ok_or_else(|| Error::ConfigParse {
            message: format!("'{}' must map repository names to definitions", dir),
            hint: None,
        })?;

        for (name_key, definition) in repos {
            let key = string_key(name_key, "repository name")?;
            let spec = expand_definition(key, &parent_path, definition)?;

            if !seen_paths.insert(spec.path()) {
                return Err(Error::PathCollision { path: spec.path() });
            }
            specs.push(spec);
        }
    }

    Ok(specs)
}

/// Apply the selection filters, keeping only specs that match every
/// supplied pattern. No filters keeps everything; a filter matching
/// nothing yields an empty list without error.
pub fn select(specs: Vec<RepoSpec>, filters: &Filters) -> Result<Vec<RepoSpec>> {
    // Validate all patterns up front so a bad pattern fails even when the
    // spec list is empty.
    for pattern in [&filters.dirmatch, &filters.repomatch, &filters.namematch]
        .into_iter()
        .flatten()
    {
        Pattern::new(pattern).map_err(Error::Glob)?;
    }

    let mut selected = Vec::with_capacity(specs.len());
    for spec in specs {
        if retained(&spec, filters)? {
            selected.push(spec);
        }
    }
    Ok(selected)
}

/// Load, expand and filter a configuration file in one step.
pub fn load_and_select(path: &Path, filters: &Filters) -> Result<Vec<RepoSpec>> {
    let raw = load_file(path)?;
    select(expand(&raw)?, filters)
}

fn retained(spec: &RepoSpec, filters: &Filters) -> Result<bool> {
    if let Some(pattern) = &filters.dirmatch {
        if !glob_match(pattern, &spec.parent_path.to_string_lossy())? {
            return Ok(false);
        }
    }
    if let Some(pattern) = &filters.repomatch {
        if !glob_match(pattern, &spec.url)? {
            return Ok(false);
        }
    }
    if let Some(pattern) = &filters.namematch {
        if !glob_match(pattern, &spec.name)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn string_key<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| Error::ConfigParse {
        message: format!("{} must be a string, got: {:?}", what, value),
        hint: None,
    })
}

fn expand_definition(key: &str, parent_path: &Path, definition: &Value) -> Result<RepoSpec> {
    match definition {
        // Shorthand: bare URL string, promoted to the full form with no
        // extra remotes.
        Value::String(url) => Ok(RepoSpec {
            name: key.to_string(),
            parent_path: parent_path.to_path_buf(),
            url: expand_url(url)?,
            remotes: Vec::new(),
        }),
        Value::Mapping(fields) => {
            let url = fields
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::ConfigParse {
                    message: format!("repository '{}' has no 'url' field", key),
                    hint: Some("add 'url: <vcs>+<transport>://...' to the repo block".to_string()),
                })?;

            let name = match fields.get("name") {
                None => key.to_string(),
                Some(value) => string_key(value, "name override")?.to_string(),
            };

            let remotes = match fields.get("remotes") {
                None => Vec::new(),
                Some(value) => expand_remotes(key, value)?,
            };

            Ok(RepoSpec {
                name,
                parent_path: parent_path.to_path_buf(),
                url: expand_url(url)?,
                remotes,
            })
        }
        other => Err(Error::ConfigParse {
            message: format!(
                "repository '{}' must be a URL string or a mapping, got: {:?}",
                key, other
            ),
            hint: None,
        }),
    }
}

/// Parse the `remotes` field of a structured definition.
///
/// Accepts either a `name: url` mapping or a sequence of
/// `{name: ..., url: ...}` entries. In the sequence form a repeated name
/// overwrites the earlier entry instead of appending a duplicate.
fn expand_remotes(repo: &str, value: &Value) -> Result<Vec<Remote>> {
    let mut remotes: Vec<Remote> = Vec::new();
    let mut push = |name: String, url: String| {
        match remotes.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.url = url,
            None => remotes.push(Remote { name, url }),
        }
    };

    match value {
        Value::Mapping(entries) => {
            for (name, url) in entries {
                let name = string_key(name, "remote name")?;
                let url = url.as_str().ok_or_else(|| Error::ConfigParse {
                    message: format!("remote '{}' of '{}' must be a URL string", name, repo),
                    hint: None,
                })?;
                push(name.to_string(), expand_vars(url)?);
            }
        }
        Value::Sequence(entries) => {
            for entry in entries {
                let remote: Remote =
                    serde_yaml::from_value(entry.clone()).map_err(|e| Error::ConfigParse {
                        message: format!("invalid remote entry for '{}': {}", repo, e),
                        hint: Some("use '- name: <name>' with 'url: <url>'".to_string()),
                    })?;
                push(remote.name, expand_vars(&remote.url)?);
            }
        }
        other => {
            return Err(Error::ConfigParse {
                message: format!("'remotes' of '{}' must be a mapping or sequence, got: {:?}", repo, other),
                hint: None,
            })
        }
    }

    Ok(remotes)
}

/// Expand env-var references in a URL, plus a `file://~/...` home marker in
/// the transport part.
fn expand_url(url: &str) -> Result<String> {
    let expanded = expand_vars(url)?;
    if let Some(idx) = expanded.find("file://~/") {
        let home = dirs::home_dir().ok_or_else(|| Error::ConfigPath {
            reference: url.to_string(),
            message: "home directory could not be determined".to_string(),
        })?;
        let prefix = &expanded[..idx];
        let suffix = &expanded[idx + "file://~/".len()..];
        return Ok(format!("{}file://{}/{}", prefix, home.display(), suffix));
    }
    Ok(expanded)
}
