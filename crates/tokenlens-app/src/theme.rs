#![forbid(unsafe_code)]

//! Fixed color palette for the app.

use tokenlens_render::{PackedRgba, Style, StyleFlags};

/// The application palette.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Terminal background used for alpha flattening.
    pub background: PackedRgba,
    /// Title line.
    pub title: Style,
    /// Base token label style.
    pub token: Style,
    /// Hovered token label.
    pub token_hover: Style,
    /// Clicked token label.
    pub token_selected: Style,
    /// Attention edge hue; per-edge alpha comes from the weight.
    pub edge_hue: PackedRgba,
    /// Detail panel header.
    pub panel_header: Style,
    /// Input field text.
    pub input: Style,
    /// Dimmed hint/help text.
    pub hint: Style,
    /// Selected row in the saved-texts list.
    pub list_selected: Style,
    /// Status line messages.
    pub status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: PackedRgba::rgb(16, 18, 24),
            title: Style::new()
                .fg(PackedRgba::rgb(137, 180, 250))
                .attrs(StyleFlags::BOLD),
            token: Style::new().fg(PackedRgba::rgb(205, 214, 244)),
            token_hover: Style::new().attrs(StyleFlags::REVERSE),
            token_selected: Style::new()
                .fg(PackedRgba::rgb(250, 179, 135))
                .attrs(StyleFlags::UNDERLINE),
            edge_hue: PackedRgba::rgb(116, 143, 252),
            panel_header: Style::new()
                .fg(PackedRgba::rgb(166, 227, 161))
                .attrs(StyleFlags::BOLD),
            input: Style::new().fg(PackedRgba::rgb(205, 214, 244)),
            hint: Style::new()
                .fg(PackedRgba::rgb(127, 132, 156))
                .attrs(StyleFlags::DIM),
            list_selected: Style::new().attrs(StyleFlags::REVERSE),
            status: Style::new().fg(PackedRgba::rgb(249, 226, 175)),
        }
    }
}
