//! The intake form: resume file, job description (file or typed), prompt,
//! and the submit button.
//!
//! - Path fields are single-line with filesystem autocomplete; Enter selects
//!   the file and starts extraction right away
//! - The job description source toggles between a file and a text area
//! - Tab switches fields, Ctrl+S submits from anywhere

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use tailor_core::{
    Command, ExtractionTarget, JobDescriptionMode, SelectedFile, UploadSlot, Workflow,
};

use crate::action::Action;
use crate::components::path_suggest::{expand_tilde, PathSuggestions};
use crate::components::text_input::{render_multi_line, render_single_line, TextInput};
use crate::components::Component;
use crate::theme::Theme;

/// Which part of the form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ResumePath,
    JobDescriptionSource,
    JobDescriptionPath,
    JobDescriptionText,
    Prompt,
    Submit,
}

impl FormField {
    /// Tab order for the given job description mode.
    fn order(mode: JobDescriptionMode) -> [FormField; 5] {
        let jd = match mode {
            JobDescriptionMode::File => FormField::JobDescriptionPath,
            JobDescriptionMode::Text => FormField::JobDescriptionText,
        };
        [
            FormField::ResumePath,
            FormField::JobDescriptionSource,
            jd,
            FormField::Prompt,
            FormField::Submit,
        ]
    }

    /// Whether the field takes typed characters.
    fn is_text(self) -> bool {
        !matches!(self, FormField::JobDescriptionSource | FormField::Submit)
    }

    fn path_target(self) -> Option<ExtractionTarget> {
        match self {
            FormField::ResumePath => Some(ExtractionTarget::Resume),
            FormField::JobDescriptionPath => Some(ExtractionTarget::JobDescription),
            _ => None,
        }
    }
}

pub struct ResumeFormComponent {
    pub resume_path: TextInput,
    pub job_description_path: TextInput,
    pub job_description_text: TextInput,
    pub prompt: TextInput,
    focused: FormField,
    suggestions: PathSuggestions,
}

impl ResumeFormComponent {
    pub fn new() -> Self {
        let mut this = Self {
            resume_path: TextInput::new("~/"),
            job_description_path: TextInput::new("~/"),
            job_description_text: TextInput::default(),
            prompt: TextInput::default(),
            focused: FormField::ResumePath,
            suggestions: PathSuggestions::default(),
        };
        this.refresh_suggestions();
        this
    }

    pub fn focused(&self) -> FormField {
        self.focused
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        self.focused.is_text()
    }

    pub fn focus(&mut self, field: FormField) {
        self.focused = field;
        self.suggestions.clear();
        self.refresh_suggestions();
    }

    pub fn focus_first(&mut self) {
        self.focus(FormField::ResumePath);
    }

    pub fn focus_last(&mut self) {
        self.focus(FormField::Submit);
    }

    fn path_input(&self, target: ExtractionTarget) -> &TextInput {
        match target {
            ExtractionTarget::Resume => &self.resume_path,
            ExtractionTarget::JobDescription => &self.job_description_path,
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            FormField::ResumePath => Some(&mut self.resume_path),
            FormField::JobDescriptionPath => Some(&mut self.job_description_path),
            FormField::JobDescriptionText => Some(&mut self.job_description_text),
            FormField::Prompt => Some(&mut self.prompt),
            FormField::JobDescriptionSource | FormField::Submit => None,
        }
    }

    fn refresh_suggestions(&mut self) {
        if let Some(target) = self.focused.path_target() {
            let input = self.path_input(target).value().to_string();
            self.suggestions.refresh(&input);
        }
    }

    fn showing_suggestions(&self) -> bool {
        self.focused.path_target().is_some() && !self.suggestions.is_empty()
    }

    /// Move focus one step. Returns false when there is no field in that
    /// direction.
    fn step(&mut self, mode: JobDescriptionMode, forward: bool) -> bool {
        let order = FormField::order(mode);
        let pos = order.iter().position(|f| *f == self.focused).unwrap_or(0);
        let next = if forward {
            order.get(pos + 1)
        } else {
            pos.checked_sub(1).and_then(|p| order.get(p))
        };
        match next {
            Some(field) => {
                self.focus(*field);
                true
            }
            None => false,
        }
    }

    /// Tab past either end: hand over to the sections list when there is
    /// something to browse, otherwise wrap around.
    fn leave_form(&mut self, workflow: &Workflow, forward: bool) -> Option<Action> {
        if workflow.result().is_some_and(|r| !r.is_empty()) {
            return Some(Action::FocusSections);
        }
        if forward {
            self.focus_first();
        } else {
            self.focus_last();
        }
        None
    }

    fn accept_suggestion(&mut self) {
        let Some(path) = self.suggestions.accept() else {
            return;
        };
        if let Some(input) = self.focused_input_mut() {
            input.set(path);
        }
        self.suggestions.clear();
        self.refresh_suggestions();
    }

    /// Propagate an edit: refresh autocomplete for paths, push text fields
    /// into the workflow.
    fn after_edit(&mut self) -> Option<Action> {
        match self.focused {
            FormField::ResumePath | FormField::JobDescriptionPath => {
                self.refresh_suggestions();
                None
            }
            FormField::JobDescriptionText => Some(Action::Workflow(
                Command::SetJobDescriptionText(self.job_description_text.value().to_string()),
            )),
            FormField::Prompt => Some(Action::Workflow(Command::SetPrompt(
                self.prompt.value().to_string(),
            ))),
            FormField::JobDescriptionSource | FormField::Submit => None,
        }
    }

    /// Select the file named in the path field for `target`.
    fn choose_file(&mut self, target: ExtractionTarget, workflow: &Workflow) -> Option<Action> {
        let raw = self.path_input(target).value().trim().to_string();
        if raw.is_empty() {
            return Some(Action::SetStatus("Enter a file path first".to_string()));
        }

        let path = expand_tilde(&raw);
        if path.is_dir() {
            return Some(Action::SetStatus(format!(
                "{} is a directory, pick a file inside it",
                path.display()
            )));
        }

        self.suggestions.clear();
        self.step(workflow.job_description_mode(), true);
        Some(Action::Workflow(Command::SelectFile {
            target,
            file: SelectedFile::new(path),
        }))
    }

    fn paste(&mut self, text: &str) -> Option<Action> {
        let text = text.replace("\r\n", "\n");
        let to_paste = match self.focused {
            FormField::ResumePath | FormField::JobDescriptionPath => {
                text.lines().next().unwrap_or("").trim().to_string()
            }
            FormField::Prompt => text.lines().collect::<Vec<_>>().join(" "),
            _ => text,
        };
        let input = self.focused_input_mut()?;
        if to_paste.is_empty() {
            return None;
        }
        input.insert_str(&to_paste);
        self.after_edit()
    }
}

impl Default for ResumeFormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResumeFormComponent {
    fn handle_action(&mut self, action: &Action, workflow: &Workflow) -> Option<Action> {
        let mode = workflow.job_description_mode();
        match action {
            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) => {
                self.focused_input_mut()?.insert_char(*c);
                self.after_edit()
            }
            Action::BackspaceInput => {
                self.focused_input_mut()?.backspace();
                self.after_edit()
            }
            Action::DeleteWord => {
                self.focused_input_mut()?.delete_word();
                self.after_edit()
            }
            Action::PasteBulk(text) => self.paste(text),

            // ── Tab: accept a highlighted suggestion or move on ─
            Action::NextField => {
                if self.suggestions.highlighted().is_some() && self.showing_suggestions() {
                    self.accept_suggestion();
                    return None;
                }
                if self.step(mode, true) {
                    None
                } else {
                    self.leave_form(workflow, true)
                }
            }
            Action::PrevField => {
                if self.step(mode, false) {
                    None
                } else {
                    self.leave_form(workflow, false)
                }
            }

            // ── Up/Down ─────────────────────────────────────────
            Action::ScrollDown => {
                if self.showing_suggestions() {
                    self.suggestions.select_next();
                } else if self.focused == FormField::JobDescriptionText {
                    if !self.job_description_text.cursor_down() {
                        self.step(mode, true);
                    }
                } else {
                    self.step(mode, true);
                }
                None
            }
            Action::ScrollUp => {
                if self.showing_suggestions() && self.suggestions.highlighted().is_some() {
                    self.suggestions.select_prev();
                } else if self.focused == FormField::JobDescriptionText {
                    if !self.job_description_text.cursor_up() {
                        self.step(mode, false);
                    }
                } else {
                    self.step(mode, false);
                }
                None
            }

            // ── Enter ───────────────────────────────────────────
            Action::NewlineInput => match self.focused {
                field @ (FormField::ResumePath | FormField::JobDescriptionPath) => {
                    if self.suggestions.highlighted().is_some() {
                        self.accept_suggestion();
                        return None;
                    }
                    let target = field.path_target()?;
                    self.choose_file(target, workflow)
                }
                FormField::JobDescriptionText => {
                    self.job_description_text.insert_char('\n');
                    self.after_edit()
                }
                FormField::Prompt => {
                    self.step(mode, true);
                    None
                }
                FormField::JobDescriptionSource | FormField::Submit => None,
            },
            Action::Confirm => match self.focused {
                FormField::JobDescriptionSource => Some(Action::Workflow(
                    Command::SetJobDescriptionMode(mode.toggle()),
                )),
                FormField::Submit => Some(Action::Workflow(Command::Submit)),
                _ => None,
            },

            // ── Esc: drop suggestions, then leave the text field ─
            Action::Cancel => {
                if self.showing_suggestions() {
                    self.suggestions.clear();
                } else if self.focused.is_text() {
                    self.focus(FormField::Submit);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, workflow: &Workflow) {
        let mode = workflow.job_description_mode();

        let suggestion_height = if self.showing_suggestions() {
            self.suggestions.items().len() as u16 + 1 // bottom border
        } else {
            0
        };
        let resume_suggestions = if self.focused == FormField::ResumePath {
            suggestion_height
        } else {
            0
        };
        let jd_suggestions = if self.focused == FormField::JobDescriptionPath {
            suggestion_height
        } else {
            0
        };
        let (jd_constraint, spacer) = match mode {
            JobDescriptionMode::File => (Constraint::Length(3), Constraint::Min(0)),
            JobDescriptionMode::Text => (Constraint::Min(5), Constraint::Length(0)),
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),                  // Resume path
            Constraint::Length(resume_suggestions), // Suggestions dropdown
            Constraint::Length(3),                  // JD source toggle
            jd_constraint,                          // JD path or JD text
            Constraint::Length(jd_suggestions),     // Suggestions dropdown
            Constraint::Length(3),                  // Prompt
            Constraint::Length(3),                  // Submit button
            spacer,
            Constraint::Length(2), // Error line
            Constraint::Length(1), // Instructions
        ])
        .split(area);

        render_single_line(
            &self.resume_path,
            slot_title("Resume", workflow.slot(ExtractionTarget::Resume)),
            "~/path/to/resume.pdf",
            self.focused == FormField::ResumePath,
            frame,
            chunks[0],
        );
        if resume_suggestions > 0 {
            self.render_suggestions(frame, chunks[1]);
        }

        self.render_source_toggle(mode, frame, chunks[2]);

        match mode {
            JobDescriptionMode::File => {
                render_single_line(
                    &self.job_description_path,
                    slot_title(
                        "Job Description",
                        workflow.slot(ExtractionTarget::JobDescription),
                    ),
                    "~/path/to/job_description.pdf",
                    self.focused == FormField::JobDescriptionPath,
                    frame,
                    chunks[3],
                );
                if jd_suggestions > 0 {
                    self.render_suggestions(frame, chunks[4]);
                }
            }
            JobDescriptionMode::Text => render_multi_line(
                &self.job_description_text,
                " Job Description ".to_string(),
                "Paste or type the job description here",
                self.focused == FormField::JobDescriptionText,
                frame,
                chunks[3],
            ),
        }

        render_single_line(
            &self.prompt,
            " Prompt ".to_string(),
            "e.g. Tailor this resume to the role",
            self.focused == FormField::Prompt,
            frame,
            chunks[5],
        );

        self.render_submit(workflow, frame, chunks[6]);

        if let Some(message) = workflow.error_message() {
            let error = Paragraph::new(Span::styled(message, Theme::error_text()))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, chunks[8]);
        }

        frame.render_widget(self.instructions(), chunks[9]);
    }
}

impl ResumeFormComponent {
    fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(Theme::border());

        let items: Vec<ListItem> = self
            .suggestions
            .items()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let style = if self.suggestions.highlighted() == Some(i) {
                    Style::default()
                        .fg(Theme::bg())
                        .bg(Theme::accent())
                        .add_modifier(Modifier::BOLD)
                } else if s.is_dir {
                    Style::default().fg(Theme::accent())
                } else {
                    Theme::normal()
                };
                let icon = if s.is_dir { "/" } else { " " };
                ListItem::new(Span::styled(format!(" {}{} ", s.name, icon), style))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_source_toggle(&self, mode: JobDescriptionMode, frame: &mut Frame, area: Rect) {
        let focused = self.focused == FormField::JobDescriptionSource;
        let block = Block::default()
            .title(" Job Description Source ")
            .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Theme::accent())
            } else {
                Theme::border()
            });

        let mut spans = Vec::new();
        for option in [JobDescriptionMode::File, JobDescriptionMode::Text] {
            let (marker, style) = if option == mode {
                ("(•) ", Theme::selected())
            } else {
                ("( ) ", Theme::dim())
            };
            spans.push(Span::styled(marker, style));
            spans.push(Span::styled(option.label(), style));
            spans.push(Span::raw("    "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_submit(&self, workflow: &Workflow, frame: &mut Frame, area: Rect) {
        let focused = self.focused == FormField::Submit;
        let (label, style) = if workflow.is_busy() {
            ("Processing...", Style::default().fg(Theme::warning()))
        } else if focused {
            (
                "Enhance Resume",
                Style::default()
                    .fg(Theme::bg())
                    .bg(Theme::accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("Enhance Resume", Theme::selected())
        };

        let button = Paragraph::new(Span::styled(format!(" {label} "), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Style::default().fg(Theme::accent())
                    } else {
                        Theme::border()
                    }),
            );
        frame.render_widget(button, area);
    }

    fn instructions(&self) -> Paragraph<'static> {
        let hints: &[(&str, &str)] = if self.showing_suggestions() {
            &[("↑↓", "navigate"), ("tab", "accept"), ("enter", "select file")]
        } else {
            match self.focused {
                FormField::ResumePath | FormField::JobDescriptionPath => {
                    &[("enter", "select file"), ("tab", "next"), ("ctrl+s", "submit")]
                }
                FormField::JobDescriptionText => {
                    &[("ctrl+s", "submit"), ("tab", "next"), ("esc", "leave field")]
                }
                FormField::Prompt => &[("ctrl+s", "submit"), ("tab", "next"), ("esc", "leave field")],
                FormField::JobDescriptionSource => {
                    &[("enter/space", "toggle"), ("tab", "next"), ("?", "help")]
                }
                FormField::Submit => &[("enter", "submit"), ("tab", "next"), ("q", "quit")],
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, desc) in hints {
            spans.push(Span::styled(format!(" {key}"), Theme::key_hint()));
            spans.push(Span::styled(format!(" {desc} "), Theme::dim()));
        }
        Paragraph::new(Line::from(spans))
    }
}

/// Field title showing what the upload slot holds.
fn slot_title(label: &str, slot: &UploadSlot) -> String {
    match slot.raw_file() {
        None => format!(" {label} "),
        Some(file) if slot.is_pending() => {
            format!(" {label} · extracting {}... ", file.file_name)
        }
        Some(file) if !slot.extracted_text().is_empty() => format!(
            " {label} · {} · {} chars ",
            file.file_name,
            slot.extracted_text().chars().count()
        ),
        Some(file) => format!(" {label} · {} · no text ", file.file_name),
    }
}
