//! # Output Configuration
//!
//! Controls how CLI status lines look. With colour enabled each status is an
//! emoji; without it, a bracketed plain-text tag that survives logs and dumb
//! terminals.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

/// Kind of status line printed by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Scan,
    Ok,
    Warn,
    Err,
    Info,
    Write,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Scan => "🔍",
            Status::Ok => "✅",
            Status::Warn => "⚠️",
            Status::Err => "❌",
            Status::Info => "📊",
            Status::Write => "📝",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Scan => "[SCAN]",
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Err => "[ERR]",
            Status::Info => "[INFO]",
            Status::Write => "[WRITE]",
        }
    }
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color` flag
    /// value (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
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

    /// The marker to print in front of a status line.
    pub fn marker(&self, status: Status) -> &'static str {
        if self.use_color {
            status.emoji()
        } else {
            status.plain()
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
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
    fn test_color_flag() {
        assert!(OutputConfig::from_env_and_flag("always").use_color);
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
        assert!(!OutputConfig::from_env_and_flag("never").use_color);
    }

    #[test]
    fn test_marker_with_color() {
        assert_eq!(OutputConfig::with_color().marker(Status::Ok), "✅");
    }

    #[test]
    fn test_marker_without_color() {
        let out = OutputConfig::without_color();
        assert_eq!(out.marker(Status::Scan), "[SCAN]");
        assert_eq!(out.marker(Status::Warn), "[WARN]");
        assert_eq!(out.marker(Status::Write), "[WRITE]");
    }
}
