//! Theme configuration.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Complete theme configuration with per-component color groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub tree: TreeTheme,
    #[serde(default)]
    pub preview: PreviewTheme,
    #[serde(default)]
    pub statusbar: StatusBarTheme,
    #[serde(default)]
    pub popup: PopupTheme,
}

impl Theme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Directory tree colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeTheme {
    pub border_fg: String,
    pub branch_fg: String,
    pub group_fg: String,
    pub file_fg: String,
    pub label_fg: String,
    /// The file currently held by the selection.
    pub selected_fg: String,
    /// Background of the row under the cursor.
    pub cursor_bg: String,
}

impl Default for TreeTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            branch_fg: "blue".to_string(),
            group_fg: "cyan".to_string(),
            file_fg: "white".to_string(),
            label_fg: "dark_gray".to_string(),
            selected_fg: "yellow".to_string(),
            cursor_bg: "dark_gray".to_string(),
        }
    }
}

/// Right-hand pane colors: action line and preview text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewTheme {
    pub border_fg: String,
    pub action_fg: String,
    pub disabled_fg: String,
    pub placeholder_fg: String,
    pub loading_fg: String,
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self {
            border_fg: "dark_gray".to_string(),
            action_fg: "green".to_string(),
            disabled_fg: "dark_gray".to_string(),
            placeholder_fg: "yellow".to_string(),
            loading_fg: "cyan".to_string(),
        }
    }
}

/// Status bar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBarTheme {
    pub bg: String,
    pub position_fg: String,
    pub message_fg: String,
}

impl Default for StatusBarTheme {
    fn default() -> Self {
        Self {
            bg: "white".to_string(),
            position_fg: "black".to_string(),
            message_fg: "magenta".to_string(),
        }
    }
}

/// Popup/dialog colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTheme {
    pub border_fg: String,
    pub alert_fg: String,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
            alert_fg: "red".to_string(),
        }
    }
}

/// Parses a color string into a `ratatui::style::Color`.
///
/// Supports named colors (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let channel =
                |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
            Color::Rgb(channel(1..3), channel(3..5), channel(5..7))
        }
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_theme_tree() {
        let theme = Theme::default();
        assert_eq!(theme.tree.branch_fg, "blue");
        assert_eq!(theme.tree.group_fg, "cyan");
        assert_eq!(theme.tree.selected_fg, "yellow");
        assert_eq!(theme.tree.cursor_bg, "dark_gray");
    }

    #[test]
    fn default_theme_preview() {
        let theme = Theme::default();
        assert_eq!(theme.preview.action_fg, "green");
        assert_eq!(theme.preview.disabled_fg, "dark_gray");
        assert_eq!(theme.preview.placeholder_fg, "yellow");
    }

    #[test]
    fn default_theme_statusbar_and_popup() {
        let theme = Theme::default();
        assert_eq!(theme.statusbar.bg, "white");
        assert_eq!(theme.statusbar.message_fg, "magenta");
        assert_eq!(theme.popup.border_fg, "yellow");
    }

    #[test]
    fn parse_color_named() {
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("white"), Color::White);
        assert_eq!(parse_color("gray"), Color::Gray);
        assert_eq!(parse_color("dark_gray"), Color::DarkGray);
        assert_eq!(parse_color("light_cyan"), Color::LightCyan);
        assert_eq!(parse_color("reset"), Color::Reset);
    }

    #[test]
    fn parse_color_case_insensitive() {
        assert_eq!(parse_color("Blue"), Color::Blue);
        assert_eq!(parse_color("DARK_GRAY"), Color::DarkGray);
        assert_eq!(parse_color("DarkGray"), Color::DarkGray);
    }

    #[test]
    fn parse_color_hex() {
        assert_eq!(parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#ff5500"), Color::Rgb(255, 85, 0));
        assert_eq!(parse_color("#FF5500"), Color::Rgb(255, 85, 0));
    }

    #[test]
    fn parse_color_unknown_returns_reset() {
        assert_eq!(parse_color("nonexistent"), Color::Reset);
        assert_eq!(parse_color(""), Color::Reset);
        assert_eq!(parse_color("#zzzzzz"), Color::Rgb(0, 0, 0));
        assert_eq!(parse_color("#fff"), Color::Reset);
    }

    #[test]
    fn load_theme_from_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("theme.toml");
        fs::write(
            &path,
            r##"
[tree]
branch_fg = "#00ff00"
selected_fg = "magenta"

[preview]
placeholder_fg = "red"

[popup]
border_fg = "white"
"##,
        )
        .unwrap();

        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.tree.branch_fg, "#00ff00");
        assert_eq!(theme.tree.selected_fg, "magenta");
        assert_eq!(theme.preview.placeholder_fg, "red");
        assert_eq!(theme.popup.border_fg, "white");
    }

    #[test]
    fn load_partial_group_fills_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("theme.toml");
        fs::write(&path, "[tree]\nfile_fg = \"gray\"\n").unwrap();

        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.tree.file_fg, "gray");
        assert_eq!(theme.tree.branch_fg, "blue");
        assert_eq!(theme.statusbar.bg, "white");
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Theme::load(&tmp.path().join("missing.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }
}
