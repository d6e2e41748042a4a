//! Theme and color definitions for the TUI
//!
//! Provides a consistent color scheme across all screens.

use mq_api::Genre;
use ratatui::style::Color;

/// TUI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary background color
    pub bg_primary: Color,
    /// Secondary background color
    pub bg_secondary: Color,
    /// Success/active color
    pub ok: Color,
    /// Warning color
    pub warning: Color,
    /// Error color
    pub error: Color,
    /// Info color
    pub info: Color,
    /// Muted/dim text color
    pub muted: Color,
    /// Text color
    pub text: Color,
    /// Accent color for highlights and focus
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_primary: Color::Rgb(13, 17, 23),
            bg_secondary: Color::Rgb(22, 27, 34),
            ok: Color::Rgb(63, 185, 80),
            warning: Color::Rgb(210, 153, 34),
            error: Color::Rgb(248, 81, 73),
            info: Color::Rgb(88, 166, 255),
            muted: Color::Rgb(139, 148, 158),
            text: Color::Rgb(230, 237, 243),
            accent: Color::Rgb(136, 87, 229),
        }
    }
}

impl Theme {
    /// Color for a billboard's active/inactive status flag
    pub fn status_color(&self, active: bool) -> Color {
        if active { self.ok } else { self.muted }
    }

    /// Indicator character for a status flag
    pub fn status_indicator(&self, active: bool) -> &'static str {
        if active { "●" } else { "○" }
    }

    /// Color hint for a movie genre
    pub fn genre_color(&self, genre: Genre) -> Color {
        match genre {
            Genre::Horror | Genre::Thriller => self.error,
            Genre::Comedy | Genre::Musicals => self.warning,
            Genre::ScienceFiction | Genre::Fantasy => self.accent,
            Genre::Action | Genre::Adventure | Genre::Sports => self.info,
            _ => self.text,
        }
    }
}
