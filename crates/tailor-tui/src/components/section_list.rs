//! List of enhanced sections returned by the backend.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use tailor_core::{Command, Workflow};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct SectionListComponent {
    /// Index of the highlighted section.
    pub selected: usize,
    /// Whether the list has keyboard focus.
    pub focused: bool,
    spinner_tick: usize,
}

impl SectionListComponent {
    pub fn new() -> Self {
        Self {
            selected: 0,
            focused: false,
            spinner_tick: 0,
        }
    }

    fn section_count(workflow: &Workflow) -> usize {
        workflow.result().map_or(0, |r| r.len())
    }
}

impl Default for SectionListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SectionListComponent {
    fn handle_action(&mut self, action: &Action, workflow: &Workflow) -> Option<Action> {
        let count = Self::section_count(workflow);
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }

        match action {
            Action::Tick => {
                if workflow.is_busy() {
                    self.spinner_tick = self.spinner_tick.wrapping_add(1);
                }
                None
            }
            Action::Workflow(Command::EnhancementFinished(Ok(_))) => {
                self.selected = 0;
                None
            }
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                None
            }
            Action::Confirm => {
                let name = workflow.result()?.names().nth(self.selected)?;
                Some(Action::Workflow(Command::SelectSection(name.to_string())))
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, workflow: &Workflow) {
        let mut title = vec![Span::styled(" Enhanced Sections ", Theme::title())];
        if workflow.is_busy() {
            let spinner = SPINNER[self.spinner_tick % SPINNER.len()];
            title.push(Span::styled(
                format!("{spinner} enhancing "),
                Style::default().fg(Theme::warning()),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Style::default().fg(Theme::accent())
            } else {
                Theme::border()
            });

        let result = match workflow.result() {
            Some(result) if !result.is_empty() => result,
            Some(_) => {
                let empty = Paragraph::new(Span::styled(
                    "The backend returned no sections.",
                    Theme::dim(),
                ))
                .block(block);
                frame.render_widget(empty, area);
                return;
            }
            None => {
                let hint = if workflow.is_busy() {
                    "Waiting for the backend..."
                } else {
                    "Pick a resume, add the job description, then press Ctrl+S."
                };
                let placeholder = Paragraph::new(Span::styled(hint, Theme::dim()))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(placeholder, area);
                return;
            }
        };

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = result
            .iter()
            .map(|(name, text)| {
                let preview = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                ListItem::new(vec![
                    Line::from(Span::styled(name.to_string(), Theme::header())),
                    Line::from(Span::styled(truncate(preview.trim(), inner_width), Theme::dim())),
                ])
            })
            .collect();

        let highlight = if self.focused {
            Theme::selection().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol(if self.focused { "▸ " } else { "  " });

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_core::{EnhancementResult, ExtractionTarget, JobDescriptionMode, SelectedFile};

    /// A workflow holding a finished result with the given section names.
    fn finished(names: &[&str]) -> Workflow {
        let mut wf = Workflow::new();
        wf.apply(Command::SetJobDescriptionMode(JobDescriptionMode::Text));
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("cv.pdf"),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 1,
            outcome: Ok("cv".into()),
        });
        wf.apply(Command::Submit);
        let result: EnhancementResult = names.iter().map(|n| (*n, "text")).collect();
        wf.apply(Command::EnhancementFinished(Ok(result)));
        wf
    }

    #[test]
    fn confirm_selects_highlighted_section() {
        let wf = finished(&["Concise", "Detailed", "Skills"]);
        let mut list = SectionListComponent::new();
        list.handle_action(&Action::ScrollDown, &wf);

        assert!(matches!(
            list.handle_action(&Action::Confirm, &wf),
            Some(Action::Workflow(Command::SelectSection(name))) if name == "Detailed"
        ));
    }

    #[test]
    fn selection_is_clamped_to_result() {
        let wf = finished(&["Concise", "Detailed"]);
        let mut list = SectionListComponent::new();
        for _ in 0..5 {
            list.handle_action(&Action::ScrollDown, &wf);
        }
        assert_eq!(list.selected, 1);

        let smaller = finished(&["Concise"]);
        list.handle_action(&Action::Tick, &smaller);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn confirm_without_result_does_nothing() {
        let wf = Workflow::new();
        let mut list = SectionListComponent::new();
        assert!(list.handle_action(&Action::Confirm, &wf).is_none());
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Senior engineer", 6), "Senio…");
        assert_eq!(truncate("short", 10), "short");
    }
}
