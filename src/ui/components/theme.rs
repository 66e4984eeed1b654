//! Terminal theme: a red brand accent over muted neutrals.
//!
//! Accent colors are used sparingly (titles, the focused input, the group
//! chip) so the article body stays the most legible thing on screen.

use ratatui::style::{Color, Modifier, Style};

pub mod colors {
    use ratatui::style::Color;

    // ═══════════════════════════════════════════════════════════════════════════
    // BASE COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deep background - primary canvas color
    pub const BG_DEEP: Color = Color::Rgb(24, 24, 27); // #18181b

    /// Elevated surface - article pane, popups
    pub const BG_SURFACE: Color = Color::Rgb(39, 39, 42); // #27272a

    /// Selected result row
    pub const BG_HIGHLIGHT: Color = Color::Rgb(69, 26, 26); // #451a1a

    pub const BORDER: Color = Color::Rgb(63, 63, 70); // #3f3f46

    pub const BORDER_FOCUS: Color = Color::Rgb(248, 113, 113); // #f87171

    // ═══════════════════════════════════════════════════════════════════════════
    // TEXT COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub const TEXT_PRIMARY: Color = Color::Rgb(228, 228, 231); // #e4e4e7

    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 170); // #a1a1aa

    /// Hints, placeholders
    pub const TEXT_MUTED: Color = Color::Rgb(113, 113, 122); // #71717a

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCENT COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Brand red
    pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 68, 68); // #ef4444

    /// Neutral counterpart used for the topic chip
    pub const ACCENT_SECONDARY: Color = Color::Rgb(212, 212, 216); // #d4d4d8

    // ═══════════════════════════════════════════════════════════════════════════
    // STATUS COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub const STATUS_SUCCESS: Color = Color::Rgb(74, 222, 128); // #4ade80

    pub const STATUS_WARNING: Color = Color::Rgb(250, 204, 21); // #facc15
}

#[derive(Clone, Copy)]
pub struct ThemePalette {
    pub accent: Color,
    pub accent_alt: Color,
    pub bg: Color,
    pub fg: Color,
    pub surface: Color,
    pub hint: Color,
    pub border: Color,
}

impl ThemePalette {
    /// Light theme, close to the web front-end's red-on-gray look
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(220, 0, 0),
            accent_alt: Color::Rgb(0, 0, 0),
            bg: Color::Rgb(245, 245, 245),
            fg: Color::Rgb(51, 51, 51),
            surface: Color::Rgb(255, 255, 255),
            hint: Color::Rgb(102, 102, 102),
            border: Color::Rgb(212, 212, 212),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: colors::ACCENT_PRIMARY,
            accent_alt: colors::ACCENT_SECONDARY,
            bg: colors::BG_DEEP,
            fg: colors::TEXT_PRIMARY,
            surface: colors::BG_SURFACE,
            hint: colors::TEXT_MUTED,
            border: colors::BORDER,
        }
    }

    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Result row headline
    pub fn title_subtle(self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn body_style(self) -> Style {
        Style::default().fg(colors::TEXT_SECONDARY)
    }

    pub fn border_style(self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focus_style(self) -> Style {
        Style::default().fg(colors::BORDER_FOCUS)
    }

    pub fn surface_style(self) -> Style {
        Style::default().bg(self.surface)
    }

    /// Row whose article is currently displayed
    pub fn selected_style(self) -> Style {
        Style::default()
            .bg(colors::BG_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard cursor row
    pub fn cursor_style(self) -> Style {
        Style::default().fg(self.accent)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STYLE HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Group chip on the article pane and the active category filter
pub fn chip_style(palette: ThemePalette) -> Style {
    Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD)
}

/// Topic chip
pub fn chip_alt_style(palette: ThemePalette) -> Style {
    Style::default().fg(palette.accent_alt)
}

/// Keyboard shortcut (footer legend)
pub fn kbd_style(palette: ThemePalette) -> Style {
    Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD)
}

/// Style for a similarity score in `[0, 1]`.
pub fn score_style(score: f32, palette: ThemePalette) -> Style {
    let color = if score >= 0.8 {
        colors::STATUS_SUCCESS
    } else if score >= 0.5 {
        colors::STATUS_WARNING
    } else {
        palette.hint
    };

    let modifier = if score >= 0.8 {
        Modifier::BOLD
    } else if score >= 0.5 {
        Modifier::empty()
    } else {
        Modifier::DIM
    };

    Style::default().fg(color).add_modifier(modifier)
}
