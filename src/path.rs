//! Path expansion and glob matching utilities for vcsync

use std::path::PathBuf;

use glob::Pattern;

use crate::error::{Error, Result};

/// Match a string against a shell-style glob pattern.
///
/// All three selection dimensions (directory, URL, name) use this one
/// grammar: `*`, `?` and bracket classes, case-sensitive, no regex.
pub fn glob_match(pattern: &str, text: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches(text))
}

/// Expand environment-variable references in a string.
///
/// Supports `$VAR` and `${VAR}`. A `$` not followed by a variable name is
/// kept literally. References to undefined variables fail with
/// [`Error::ConfigPath`] rather than expanding to an empty string.
pub fn expand_vars(input: &str) -> Result<String> {
    match shellexpand::env(input) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(Error::ConfigPath {
            reference: input.to_string(),
            message: format!("undefined environment variable '{}'", e.var_name),
        }),
    }
}

/// Expand a configured directory string into an absolute-ish `PathBuf`.
///
/// Environment variables are expanded first, then a leading `~` is replaced
/// with the user's home directory. `~user` forms are not supported.
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let expanded = expand_vars(input)?;

    if expanded == "~" || expanded.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| Error::ConfigPath {
            reference: input.to_string(),
            message: "home directory could not be determined".to_string(),
        })?;
        if expanded == "~" {
            return Ok(home);
        }
        return Ok(home.join(&expanded[2..]));
    }

    if expanded.starts_with('~') {
        // ~user expansion would require NSS lookups; reject it explicitly.
        return Err(Error::ConfigPath {
            reference: input.to_string(),
            message: "'~user' expansion is not supported".to_string(),
        });
    }

    Ok(PathBuf::from(expanded))
}
