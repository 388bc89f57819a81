//! # VCS Backend Variants
//!
//! One module per supported version-control system, each implementing the
//! [`Vcs`] trait. The trait is the single capability contract the rest of
//! vcsync programs against: obtain a working copy, update it, read its
//! revision, and manage named remotes. Callers never branch on the VCS kind
//! themselves; [`crate::repo::Repository`] picks the variant once and
//! forwards every call.
//!
//! Backends do not speak any repository protocol. Every operation is an
//! invocation of the system `git`/`hg`/`svn` binary through
//! [`crate::runner::Runner`], and the differing output formats of those
//! tools are absorbed here.

pub mod git;
pub mod hg;
pub mod svn;

use std::collections::BTreeMap;

use crate::error::Result;

/// The uniform capability contract every backend satisfies.
///
/// State lives entirely on disk in the working copy; a backend holds only
/// the target path, the transport URL and the configured extra remotes, so
/// every query is answered live by the external tool.
pub trait Vcs {
    /// Create the working copy at the target path.
    ///
    /// Callers must only invoke this while the path is absent or an empty
    /// directory; [`crate::repo::Repository`] enforces that precondition.
    /// Configured extra remotes are registered immediately after the clone
    /// or checkout.
    fn obtain(&self) -> Result<()>;

    /// Synchronize an existing working copy with the primary remote.
    ///
    /// Non-destructive: if local history has diverged the update fails with
    /// [`crate::error::Error::UpdateConflict`] and the working copy is left
    /// in its prior state.
    fn update_repo(&self) -> Result<()>;

    /// The opaque revision identifier of the current checkout.
    ///
    /// A full commit/changeset hash for distributed backends, the numeric
    /// revision for Subversion.
    fn get_revision(&self) -> Result<String>;

    /// All named remotes of the working copy, as `name -> url`.
    ///
    /// Subversion has no multi-remote concept and reports a single entry
    /// for the checkout URL; that is a capability gap, not an error.
    fn remotes_get(&self) -> Result<BTreeMap<String, String>>;

    /// The URL of one named remote.
    ///
    /// Fails with [`crate::error::Error::RemoteNotFound`] if the name is
    /// not configured.
    fn remote_get(&self, name: &str) -> Result<String>;

    /// Create or overwrite a named remote, echoing back the stored URL.
    fn remote_set(&self, name: &str, url: &str) -> Result<String>;
}
