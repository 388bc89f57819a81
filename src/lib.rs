//! # vcsync Library
//!
//! This library provides the core functionality for keeping a set of local
//! working copies synchronized with remote version-control repositories
//! described in a declarative configuration. It is designed to be used by
//! the `vcsync` command-line tool but can also be integrated into other
//! applications that need declarative multi-repository management.
//!
//! ## Quick Example
//!
//! ```
//! use vcsync::config::{self, Filters};
//!
//! let raw: serde_yaml::Value = serde_yaml::from_str(
//!     r#"
//! /tmp/work:
//!   proj: git+file:///tmp/origin/proj
//! "#,
//! )
//! .unwrap();
//!
//! let specs = config::expand(&raw).unwrap();
//! assert_eq!(specs[0].name, "proj");
//! assert_eq!(specs[0].path().to_str(), Some("/tmp/work/proj"));
//!
//! // Filters narrow a run down without touching the configuration.
//! let filters = Filters { namematch: Some("p*".into()), ..Filters::default() };
//! assert_eq!(config::select(specs, &filters).unwrap().len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: expands the nested
//!   directory→name→definition tree into a flat, ordered list of
//!   [`config::RepoSpec`]s and applies glob selection filters.
//! - **URL scheme (`scheme`)**: one string encodes VCS kind and transport,
//!   `<vcs>+<transport>://...`; resolution is pure and lossless.
//! - **Backends (`vcs`)**: Git, Mercurial and Subversion variants behind a
//!   single capability trait; all repository work is delegated to the
//!   external tools through the command `runner`.
//! - **Repository (`repo`)**: binds a spec to its backend and enforces the
//!   Absent/Present state machine (obtain-if-absent, else update).
//! - **Engine (`sync`)**: processes specs to completion with per-spec
//!   failure isolation and an ordered outcome report.
//!
//! All durable state lives in the on-disk working copies owned by the
//! external VCS tools; the engine itself persists nothing between runs.

pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod path;
pub mod repo;
pub mod runner;
pub mod scheme;
pub mod sync;
pub mod vcs;
