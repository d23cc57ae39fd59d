//! Color themes and ANSI escape sequence generation.
//!
//! Four Catppuccin variants ship with the plugin; any other palette can be
//! supplied as a TOML file through the `theme_file` configuration key.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! focus_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! chip_fg = "#1e1e2e"
//! chip_bg = "#94e2d5"
//! checkbox_fg = "#a6e3a1"
//! status_info_fg = "#89b4fa"
//! status_error_fg = "#f38ba8"
//! ```

use crate::domain::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Cursor row in the table, panel, and card list.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer hints, secondary card lines, unfocused regions.
    pub text_dim: String,

    pub border: String,
    /// Border of the search box and the focused region's heading.
    pub focus_border: String,

    /// Query matches inside result titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Selected-filter chips.
    pub chip_fg: String,
    pub chip_bg: String,

    /// Checked boxes in the filter panel and table.
    pub checkbox_fg: String,

    pub status_info_fg: String,
    pub status_error_fg: String,
}

impl Theme {
    /// Built-in theme by name: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, or `catppuccin-macchiato`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ScoutError::Theme` if the file cannot be read or is not a
    /// complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ScoutError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ScoutError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// Plain palette used only if the bundled themes are unusable.
    fn monochrome() -> Self {
        let light = "#d0d0d0".to_string();
        let dark = "#202020".to_string();
        let grey = "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: light.clone(),
                header_bg: None,
                selection_fg: dark.clone(),
                selection_bg: light.clone(),
                text_normal: light.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                focus_border: light.clone(),
                match_highlight_fg: dark.clone(),
                match_highlight_bg: grey.clone(),
                empty_state_fg: light.clone(),
                chip_fg: dark,
                chip_bg: grey,
                checkbox_fg: light.clone(),
                status_info_fg: light.clone(),
                status_error_fg: light,
            },
        }
    }

    /// Invalid input renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color, `ESC[38;2;r;g;bm`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color, `ESC[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::monochrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn loads_custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = include_str!("../../themes/catppuccin-mocha.toml");
        write!(file, "{}", mocha.replace("catppuccin-mocha", "custom")).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors, Theme::default().colors);
    }

    #[test]
    fn incomplete_theme_file_is_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ScoutError::Theme(_)));
        assert!(matches!(
            Theme::from_file("/nonexistent/theme.toml"),
            Err(ScoutError::Theme(_))
        ));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
    }
}
