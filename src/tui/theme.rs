//! Theme and Styling
//!
//! Colors and styles for the TUI, including the status and work type badges.

use ratatui::style::{Color, Modifier, Style};

use crate::tui::app::NoticeKind;
use crate::types::{JobStatus, WorkType};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Primary accent color (cyan/teal)
    pub const ACCENT: Color = Color::Rgb(0, 212, 255);

    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);

    pub const WARNING: Color = Color::Rgb(251, 191, 36);

    pub const ERROR: Color = Color::Rgb(239, 68, 68);

    // === Badge Colors ===

    pub const BLUE: Color = Color::Rgb(59, 130, 246);
    pub const INDIGO: Color = Color::Rgb(99, 102, 241);
    pub const PURPLE: Color = Color::Rgb(168, 85, 247);
    pub const PINK: Color = Color::Rgb(236, 72, 153);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 229);

    /// Secondary text color (muted)
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 161);

    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 82);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(51, 51, 51);

    pub const BORDER_FOCUSED: Color = Color::Rgb(59, 130, 246);

    // === Styles ===

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Busy indicator while a request is in flight
    pub fn active() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    fn badge(bg: Color) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Interview is green, reject red, everything else yellow
    pub fn status_badge(status: JobStatus) -> Style {
        match status {
            JobStatus::Interview => Self::badge(Self::SUCCESS),
            JobStatus::Reject => Self::badge(Self::ERROR),
            _ => Self::badge(Self::WARNING),
        }
    }

    pub fn work_type_badge(work_type: WorkType) -> Style {
        match work_type {
            WorkType::FullTime => Self::badge(Self::BLUE),
            WorkType::PartTime => Self::badge(Self::INDIGO),
            WorkType::Internship => Self::badge(Self::PURPLE),
            _ => Self::badge(Self::PINK),
        }
    }

    pub fn notice(kind: NoticeKind) -> Style {
        let color = match kind {
            NoticeKind::Success => Self::SUCCESS,
            NoticeKind::Warning => Self::WARNING,
            NoticeKind::Error => Self::ERROR,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Glyphs used across the UI
pub struct Icons;

impl Icons {
    pub const COMPLETE: &'static str = "✓";
    pub const ACTIVE: &'static str = "●";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "!";
    pub const SELECTED: &'static str = "▶";
    pub const LOCATION: &'static str = "⌖";
    pub const CLOCK: &'static str = "◷";

    pub fn notice(kind: NoticeKind) -> &'static str {
        match kind {
            NoticeKind::Success => Self::COMPLETE,
            NoticeKind::Warning => Self::WARNING,
            NoticeKind::Error => Self::ERROR,
        }
    }
}
