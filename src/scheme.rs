//! # URL Scheme Resolution
//!
//! Repository URLs in the configuration encode both the VCS kind and the
//! transport in a single string: `<vcs>+<transport>://...`, e.g.
//! `git+file:///tmp/repo`, `hg+https://host/repo`, `svn+svn://host/repo`.
//!
//! [`resolve`] splits such a URL into a [`VcsKind`] and the transport URL.
//! The transport part is passed verbatim to the backend tool; it may carry
//! any scheme syntax the tool itself understands (`file://`, `https://`,
//! `ssh://`, ...). Resolution is a pure function and performs no I/O.

use serde::Serialize;

use crate::error::{Error, Result};

/// The version-control systems vcsync can drive.
///
/// A closed set: adding a VCS means adding a variant here plus one backend
/// module, and nothing else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Mercurial,
    Subversion,
}

impl VcsKind {
    /// The URL tag and executable name for this VCS.
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
            VcsKind::Subversion => "svn",
        }
    }

    /// The name under which this VCS exposes the primary remote.
    ///
    /// The primary remote (the spec's own URL) is always present even though
    /// it is not listed in the configured `remotes`. Subversion has no
    /// native remote concept; its degraded single-entry view reuses `origin`
    /// so callers see one stable key across backends.
    pub fn primary_remote_name(&self) -> &'static str {
        match self {
            VcsKind::Git | VcsKind::Subversion => "origin",
            VcsKind::Mercurial => "default",
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a scheme-qualified URL into its VCS kind and transport URL.
///
/// The tag before the first `+` must be exactly `git`, `hg` or `svn`
/// (lowercase). Everything after the `+` is returned unmodified.
///
/// ```
/// use vcsync::scheme::{resolve, VcsKind};
///
/// let (kind, transport) = resolve("git+file:///tmp/x").unwrap();
/// assert_eq!(kind, VcsKind::Git);
/// assert_eq!(transport, "file:///tmp/x");
/// ```
pub fn resolve(url: &str) -> Result<(VcsKind, &str)> {
    let (tag, transport) = url.split_once('+').ok_or_else(|| Error::MalformedUrl {
        url: url.to_string(),
    })?;

    let kind = match tag {
        "git" => VcsKind::Git,
        "hg" => VcsKind::Mercurial,
        "svn" => VcsKind::Subversion,
        other => {
            return Err(Error::UnsupportedVcs {
                url: url.to_string(),
                vcs: other.to_string(),
            })
        }
    };

    Ok((kind, transport))
}
