//! Overlay showing the full text of the selected section.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tailor_core::{Command, Workflow};

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

const PAGE: u16 = 10;

pub struct SectionViewerComponent {
    /// Scroll offset in wrapped lines.
    pub scroll: u16,
}

impl SectionViewerComponent {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    fn close(&mut self) -> Option<Action> {
        self.scroll = 0;
        Some(Action::Workflow(Command::ClearSelection))
    }
}

impl Default for SectionViewerComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SectionViewerComponent {
    fn handle_action(&mut self, action: &Action, workflow: &Workflow) -> Option<Action> {
        // A new selection always opens at the top.
        if let Action::Workflow(Command::SelectSection(_)) = action {
            self.scroll = 0;
            return None;
        }

        workflow.displayed_section()?;

        match action {
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                None
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE);
                None
            }
            Action::Cancel | Action::Confirm => self.close(),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, workflow: &Workflow) {
        let Some((name, text)) = workflow.displayed_section() else {
            return;
        };

        let width = (area.width as u32 * 4 / 5) as u16;
        let height = (area.height as u32 * 4 / 5) as u16;
        let dialog = centered_rect(area, width.max(30), height.max(8));
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(format!(" {name} "))
            .title_style(Theme::title())
            .title_bottom(Line::from(vec![
                Span::styled(" ↑↓/PgUp/PgDn", Theme::key_hint()),
                Span::styled(" scroll  ", Theme::dim()),
                Span::styled("esc", Theme::key_hint()),
                Span::styled(" close ", Theme::dim()),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        // Keep the last line reachable but don't scroll into empty space.
        let inner = block.inner(dialog);
        let lines = wrapped_line_count(text, inner.width as usize);
        let max_scroll = lines.saturating_sub(inner.height as usize) as u16;

        let body = Paragraph::new(text)
            .style(Theme::normal())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(max_scroll), 0))
            .block(block);
        frame.render_widget(body, dialog);
    }
}

/// Rough count of rows `text` occupies when wrapped at `width` columns.
fn wrapped_line_count(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum()
}
