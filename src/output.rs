//! # Output Configuration
//!
//! Controls whether the CLI's run report uses color, based on terminal
//! capabilities and user preference.
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colored output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// - `--color=always`: force colors on (overrides NO_COLOR)
    /// - `--color=never`: force colors off
    /// - `--color=auto`: detect from the environment and TTY
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even empty) disables colors.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// A success marker, green when colors are on.
    pub fn ok(&self, text: &str) -> String {
        if self.use_color {
            style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    /// A failure marker, red when colors are on.
    pub fn failed(&self, text: &str) -> String {
        if self.use_color {
            style(text).red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_markers_plain_without_color() {
        let config = OutputConfig::from_env_and_flag("never");
        assert_eq!(config.ok("ok"), "ok");
        assert_eq!(config.failed("FAILED"), "FAILED");
    }

    #[test]
    fn test_markers_styled_with_color() {
        let config = OutputConfig::from_env_and_flag("always");
        // Styled output embeds the original text in escape sequences.
        assert!(config.ok("ok").contains("ok"));
        assert!(config.failed("FAILED").contains("FAILED"));
    }
}
