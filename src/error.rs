//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `vcsync` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Failure scoping
//!
//! Errors fall into two families:
//!
//! - **Configuration errors** (`MalformedUrl`, `UnsupportedVcs`,
//!   `ConfigParse`, `ConfigPath`, `PathCollision`): detected before any
//!   external process is spawned.
//! - **Run-time errors** (`ExternalCommand`, `Timeout`, `NotObtained`,
//!   `AlreadyObtained`, `UpdateConflict`, `RemoteNotFound`): scoped to the
//!   single repository being processed. One repository failing must never
//!   stop the remaining repositories in the same run; the sync engine
//!   collects these per-spec instead of propagating them.
//!
//! The `Operation` variant wraps a lower-level error with the operation name
//! and repository name so that a captured `git`/`hg`/`svn` stderr is always
//! attributable to a specific working copy.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vcsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A repository URL is missing the `<vcs>+<transport>` separator.
    #[error("malformed repository URL '{url}': expected '<vcs>+<transport>://...'")]
    MalformedUrl { url: String },

    /// A repository URL names a VCS this tool does not support.
    #[error("unsupported VCS '{vcs}' in URL '{url}' (supported: git, hg, svn)")]
    UnsupportedVcs { url: String, vcs: String },

    /// The configuration tree has the wrong shape.
    ///
    /// Includes an optional hint about how to fix the offending entry.
    #[error("configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A `~` or environment-variable reference in the configuration could
    /// not be expanded.
    #[error("cannot expand path reference '{reference}': {message}")]
    ConfigPath { reference: String, message: String },

    /// Two repository definitions resolve to the same working-copy path.
    #[error("multiple repositories resolve to the same path: {}", path.display())]
    PathCollision { path: PathBuf },

    /// An external VCS command exited with a non-zero status.
    #[error("command '{command}' failed in {} (exit code {}): {stderr}", cwd.display(), exit_code.map(|c| c.to_string()).unwrap_or_else(|| "signal".into()))]
    ExternalCommand {
        command: String,
        cwd: PathBuf,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        stderr: String,
    },

    /// An external command exceeded its allotted time and was killed.
    #[error("command '{command}' timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    /// An operation that requires a working copy was invoked before
    /// `obtain()`.
    #[error("no working copy at {}: repository has not been obtained", path.display())]
    NotObtained { path: PathBuf },

    /// `obtain()` was invoked while a working copy already exists.
    #[error("working copy already exists at {}", path.display())]
    AlreadyObtained { path: PathBuf },

    /// The local working copy has diverged from the remote and updating it
    /// would lose local history. The working copy is left untouched.
    #[error("update of {} aborted, local history has diverged: {message}", path.display())]
    UpdateConflict { path: PathBuf, message: String },

    /// A requested named remote does not exist.
    #[error("remote '{name}' not found")]
    RemoteNotFound { name: String },

    /// A lower-level failure, annotated with the operation and repository it
    /// occurred in.
    #[error("{operation} failed for repository '{repo}': {source}")]
    Operation {
        repo: String,
        operation: String,
        #[source]
        source: Box<Error>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Annotate this error with the operation and repository it belongs to.
    pub fn in_operation(self, operation: &str, repo: &str) -> Error {
        Error::Operation {
            repo: repo.to_string(),
            operation: operation.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping any `Operation` context layers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
