//! Color theme system for diffr.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! diffr renders. Two built-in themes are provided:
//!
//! - `dark` — uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.
//!
//! Pager output carries its own colors; the `diff_*` fields are only used when
//! the raw diff is shown because no pager could be started.

use ratatui::style::Color;
use tracing::warn;

/// All color values used across diffr's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the panel that receives list navigation keys.
    pub border_active: Color,
    /// Border color for the other panel.
    pub border_inactive: Color,

    // Selection lists
    /// Foreground of the highlighted list row.
    pub selection_fg: Color,
    /// Prompt text above each list ("Choose a commit hash:").
    pub prompt: Color,
    /// Abbreviated commit hash in the commit list.
    pub commit_hash: Color,
    /// Placeholder and hint text.
    pub muted: Color,

    // Header
    /// Title bar background.
    pub header_bg: Color,
    /// Title bar foreground.
    pub header_fg: Color,

    // Raw diff fallback
    /// Added lines (`+`).
    pub diff_added: Color,
    /// Removed lines (`-`).
    pub diff_removed: Color,
    /// Hunk header lines (`@@ ... @@`).
    pub diff_hunk_header: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Step indicator color.
    pub status_step: Color,
    /// Color used for errors and notices.
    pub error: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when no config is present or color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::White,
            border_inactive: Color::DarkGray,

            selection_fg: Color::Cyan,
            prompt: Color::Reset,
            commit_hash: Color::Yellow,
            muted: Color::DarkGray,

            header_bg: Color::White,
            header_fg: Color::Black,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_hunk_header: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_step: Color::Cyan,
            error: Color::Red,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            selection_fg: teal,
            prompt: text,
            commit_hash: yellow,
            muted: overlay1,

            header_bg: lavender,
            header_fg: base,

            diff_added: green,
            diff_removed: red,
            diff_hunk_header: teal,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_step: lavender,
            error: red,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged, not a hard error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").border_active, Theme::dark().border_active);
    }

    #[test]
    fn both_spellings_of_catppuccin_resolve() {
        let expected = Theme::catppuccin_mocha().header_bg;
        assert_eq!(Theme::from_name("catppuccin-mocha").header_bg, expected);
        assert_eq!(Theme::from_name("catppuccin_mocha").header_bg, expected);
    }
}
