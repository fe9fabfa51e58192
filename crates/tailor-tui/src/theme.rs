//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use tailor_core::SubmissionStatus;

/// The color palette for tailor's TUI. Subdued RGB tones with a single
/// blue accent.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(40, 40, 60)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn selection() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn error_text() -> Style {
        Style::default().fg(Self::error())
    }

    /// Badge color for the submission lifecycle.
    pub fn status_color(status: &SubmissionStatus) -> Color {
        match status {
            SubmissionStatus::Idle => Self::fg_muted(),
            SubmissionStatus::Busy => Self::warning(),
            SubmissionStatus::Succeeded => Self::success(),
            SubmissionStatus::Failed(_) => Self::error(),
        }
    }
}
