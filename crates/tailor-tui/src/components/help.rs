//! Help overlay with the keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use tailor_core::Workflow;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action, _workflow: &Workflow) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Any key closes help.
            _ if self.visible && action.is_input() => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _workflow: &Workflow) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 60, 22);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help · Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit (q only outside text fields)"),
            key_line("?", "Toggle this help"),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("Ctrl+S", "Enhance resume"),
            key_line("Esc", "Leave field / close section"),
            Line::from(""),
            Line::from(Span::styled("── Form ──", Theme::header())),
            Line::from(""),
            key_line("Enter (path)", "Select file and extract its text"),
            key_line("Up / Down (path)", "Browse suggestions, Tab accepts"),
            key_line("Enter / Space", "Toggle job description source"),
            key_line("Enter (JD text)", "New line"),
            Line::from(""),
            Line::from(Span::styled("── Sections ──", Theme::header())),
            Line::from(""),
            key_line("Up / Down / j / k", "Move selection"),
            key_line("Enter", "Open section"),
            key_line("PgUp / PgDn", "Scroll open section"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
