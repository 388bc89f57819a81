//! Default values for vcsync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Basename of the per-user configuration file, without extension.
pub const CONFIG_BASENAME: &str = ".vcsync";

/// Candidate per-user configuration files, in lookup order.
///
/// Used when no `--config` is given: `~/.vcsync.yaml`, then
/// `~/.vcsync.json`. Returns an empty list when the home directory cannot
/// be determined.
pub fn home_config_candidates() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    ["yaml", "json"]
        .into_iter()
        .map(|ext| home.join(format!("{}.{}", CONFIG_BASENAME, ext)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_are_yaml_then_json() {
        let candidates = home_config_candidates();
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].to_string_lossy().ends_with(".vcsync.yaml"));
        assert!(candidates[1].to_string_lossy().ends_with(".vcsync.json"));
    }

    #[test]
    fn test_candidates_live_in_home() {
        let home = dirs::home_dir().unwrap();
        for candidate in home_config_candidates() {
            assert!(candidate.starts_with(&home));
        }
    }
}
