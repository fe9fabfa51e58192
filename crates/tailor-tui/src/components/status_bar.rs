//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tailor_core::{SubmissionStatus, Workflow};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
}

impl StatusBarComponent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Short name for the pill badge.
fn status_badge(status: &SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Idle => "Ready",
        SubmissionStatus::Busy => "Processing",
        SubmissionStatus::Succeeded => "Done",
        SubmissionStatus::Failed(_) => "Error",
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action, _workflow: &Workflow) -> Option<Action> {
        if let Action::SetStatus(msg) = action {
            self.message = msg.clone();
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, workflow: &Workflow) {
        let width = area.width as usize;

        let hints = "q·?·tab·ctrl+s";
        let hints_len = hints.chars().count() + 1;

        let status = workflow.status();
        let badge = status_badge(status);
        let badge_len = badge.len() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg: String = if self.message.chars().count() > msg_budget {
            if msg_budget > 3 {
                let head: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{head}...")
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", badge),
                Style::default()
                    .fg(Theme::status_color(status))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
