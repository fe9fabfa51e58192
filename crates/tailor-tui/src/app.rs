//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use tailor_client::ResumeBackend;
use tailor_core::{Command, Effect, ExtractionTarget, JobDescriptionMode, SelectedFile, Workflow};

use crate::action::{Action, InputMode};
use crate::components::help::HelpComponent;
use crate::components::path_suggest::expand_tilde;
use crate::components::resume_form::ResumeFormComponent;
use crate::components::section_list::SectionListComponent;
use crate::components::section_viewer::SectionViewerComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Sections,
}

/// Main application state.
pub struct App {
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    focus: Focus,

    workflow: Workflow,
    /// Backend shared with the tasks that run effects.
    backend: Arc<dyn ResumeBackend>,
    base_url: String,
    /// Commands from CLI pre-fills, applied once the action channel exists.
    startup: Vec<Command>,

    // Components
    resume_form: ResumeFormComponent,
    section_list: SectionListComponent,
    section_viewer: SectionViewerComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(backend: Arc<dyn ResumeBackend>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let mut app = Self {
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            focus: Focus::Form,
            workflow: Workflow::new(),
            backend,
            status_bar: StatusBarComponent::new(format!(
                "Backend at {base_url}. Pick a resume file to begin."
            )),
            base_url,
            startup: Vec::new(),
            resume_form: ResumeFormComponent::new(),
            section_list: SectionListComponent::new(),
            section_viewer: SectionViewerComponent::new(),
            help: HelpComponent::new(),
        };
        app.sync_input_mode();
        app
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Pre-select the resume file; extraction starts when the app runs.
    pub fn set_initial_resume(&mut self, path: String) {
        self.queue_file(ExtractionTarget::Resume, path);
    }

    /// Pre-select the job description file; extraction starts when the app runs.
    pub fn set_initial_job_description(&mut self, path: String) {
        self.workflow
            .apply(Command::SetJobDescriptionMode(JobDescriptionMode::File));
        self.queue_file(ExtractionTarget::JobDescription, path);
    }

    /// Pre-fill typed job description text and switch to text mode.
    pub fn set_initial_job_description_text(&mut self, text: String) {
        self.workflow
            .apply(Command::SetJobDescriptionMode(JobDescriptionMode::Text));
        self.resume_form.job_description_text.set(text.clone());
        self.workflow.apply(Command::SetJobDescriptionText(text));
    }

    pub fn set_initial_prompt(&mut self, prompt: String) {
        self.resume_form.prompt.set(prompt.clone());
        self.workflow.apply(Command::SetPrompt(prompt));
    }

    fn queue_file(&mut self, target: ExtractionTarget, path: String) {
        let file = SelectedFile::new(expand_tilde(&path));
        match target {
            ExtractionTarget::Resume => self.resume_form.resume_path.set(path),
            ExtractionTarget::JobDescription => self.resume_form.job_description_path.set(path),
        }
        self.startup.push(Command::SelectFile { target, file });
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        info!(base_url = %self.base_url, "TUI started");
        for command in std::mem::take(&mut self.startup) {
            self.dispatch(command, &tx);
        }
        self.sync_input_mode();

        loop {
            terminal.draw(|frame| self.render(frame))?;

            match rx.recv().await {
                Some(action) => {
                    self.handle_action(&action, &tx);
                    if self.should_quit {
                        break;
                    }
                }
                None => break,
            }
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    fn current_input_mode(&self) -> InputMode {
        // Overlays take plain keys so Esc and scrolling work.
        if self.help.visible || self.workflow.displayed_section().is_some() {
            return InputMode::Normal;
        }
        match self.focus {
            Focus::Form if self.resume_form.wants_input() => InputMode::Editing,
            _ => InputMode::Normal,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.section_list.focused = focus == Focus::Sections;
    }

    /// Apply an action, then any action it chains into.
    pub fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::SubmitForm if !self.help.visible => {
                self.handle_action(&Action::Workflow(Command::Submit), tx);
                return;
            }
            Action::Workflow(command) => self.dispatch(command.clone(), tx),
            Action::FocusSections => self.set_focus(Focus::Sections),
            _ => {}
        }

        let chained = if !action.is_input() {
            // Timers and completions go to everything that animates or tracks them.
            self.section_list.handle_action(action, &self.workflow);
            self.section_viewer.handle_action(action, &self.workflow);
            None
        } else if self.help.visible || matches!(action, Action::ToggleHelp) {
            self.help.handle_action(action, &self.workflow)
        } else if self.workflow.displayed_section().is_some() {
            self.section_viewer.handle_action(action, &self.workflow)
        } else {
            match self.focus {
                Focus::Form => self.resume_form.handle_action(action, &self.workflow),
                Focus::Sections => self.handle_sections_input(action),
            }
        };

        self.status_bar.handle_action(action, &self.workflow);
        self.sync_input_mode();

        if let Some(chained) = chained {
            self.handle_action(&chained, tx);
        }
    }

    fn handle_sections_input(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::NextField => {
                self.set_focus(Focus::Form);
                self.resume_form.focus_first();
                None
            }
            Action::PrevField | Action::Cancel => {
                self.set_focus(Focus::Form);
                self.resume_form.focus_last();
                None
            }
            _ => self.section_list.handle_action(action, &self.workflow),
        }
    }

    /// Apply a workflow command and start whatever effect it asks for.
    fn dispatch(&mut self, command: Command, tx: &mpsc::UnboundedSender<Action>) {
        let note = completion_note(&command);
        let finished_target = match &command {
            Command::ExtractionFinished { target, .. } => Some(*target),
            _ => None,
        };

        if let Some(effect) = self.workflow.apply(command) {
            self.spawn_effect(effect, tx);
        }

        // A completion that left its slot pending was superseded; stay quiet.
        let superseded =
            finished_target.is_some_and(|target| self.workflow.slot(target).is_pending());
        if let Some(note) = note.filter(|_| !superseded) {
            self.status_bar.message = note;
        }

        let has_sections = self.workflow.result().is_some_and(|r| !r.is_empty());
        if !has_sections && self.focus == Focus::Sections {
            self.set_focus(Focus::Form);
        }
    }

    /// Run an effect in the background; its completion comes back as an action.
    fn spawn_effect(&mut self, effect: Effect, tx: &mpsc::UnboundedSender<Action>) {
        self.status_bar.message = match &effect {
            Effect::Extract { target, file, .. } => {
                format!("Extracting {} text from {}...", target.label().to_lowercase(), file.file_name)
            }
            Effect::Enhance(_) => "Enhancing resume...".to_string(),
        };
        debug!(status = %self.status_bar.message, "Spawning effect");

        let tx = tx.clone();
        tailor_client::spawn_effect(Arc::clone(&self.backend), effect, move |command| {
            let _ = tx.send(Action::Workflow(command));
        });
    }

    /// Render the full UI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_title(frame, chunks[0]);

        let main = Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[1]);
        self.resume_form.render(frame, main[0], &self.workflow);
        self.section_list.render(frame, main[1], &self.workflow);

        self.status_bar.render(frame, chunks[2], &self.workflow);

        // Overlays (rendered on top)
        self.section_viewer.render(frame, area, &self.workflow);
        self.help.render(frame, area, &self.workflow);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" tailor ", Theme::title()),
            Span::styled("resume enhancer", Theme::muted()),
            Span::styled(format!("  {}", self.base_url), Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }
}

/// Status line for a finished backend call.
fn completion_note(command: &Command) -> Option<String> {
    match command {
        Command::ExtractionFinished {
            target,
            outcome: Ok(text),
            ..
        } => Some(format!(
            "{} text extracted ({} chars)",
            target.label(),
            text.chars().count()
        )),
        Command::ExtractionFinished {
            target,
            outcome: Err(_),
            ..
        } => Some(format!("{} extraction failed", target.label())),
        Command::EnhancementFinished(Ok(result)) if result.is_empty() => {
            Some("Enhancement finished with no sections".to_string())
        }
        Command::EnhancementFinished(Ok(result)) => Some(format!(
            "Enhancement complete: {} sections. Tab to the list, Enter to open one.",
            result.len()
        )),
        Command::EnhancementFinished(Err(_)) => Some("Enhancement failed".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use tailor_core::error::{ENHANCEMENT_FAILED, MISSING_INPUT};
    use tailor_core::{
        EnhancementError, EnhancementRequest, EnhancementResult, ExtractionError,
    };

    struct StubBackend {
        text: String,
        enhance_ok: bool,
    }

    #[async_trait]
    impl ResumeBackend for StubBackend {
        async fn extract(
            &self,
            _target: ExtractionTarget,
            _file: &SelectedFile,
        ) -> Result<String, ExtractionError> {
            Ok(self.text.clone())
        }

        async fn enhance(
            &self,
            _request: &EnhancementRequest,
        ) -> Result<EnhancementResult, EnhancementError> {
            if self.enhance_ok {
                Ok([("Concise", "Short and sharp."), ("Detailed", "Long form.")]
                    .into_iter()
                    .collect())
            } else {
                Err(EnhancementError::Status(500))
            }
        }
    }

    fn app(enhance_ok: bool) -> App {
        let backend = StubBackend {
            text: "Experienced engineer...".into(),
            enhance_ok,
        };
        App::new(Arc::new(backend), "http://localhost:8000/api")
    }

    /// Feed the next completion from a spawned effect back into the app.
    async fn settle(
        app: &mut App,
        tx: &mpsc::UnboundedSender<Action>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) {
        let action = rx.recv().await.unwrap();
        assert!(matches!(action, Action::Workflow(_)));
        app.handle_action(&action, tx);
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn ctrl_s_with_empty_form_shows_missing_input() {
        let mut app = app(true);
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_action(&Action::SubmitForm, &tx);

        assert_eq!(app.workflow().error_message(), Some(MISSING_INPUT));
        assert!(screen(&app).contains(MISSING_INPUT));
    }

    #[tokio::test]
    async fn text_mode_flow_ends_with_browsable_sections() {
        let mut app = app(true);
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.set_initial_resume("/tmp/cv.pdf".into());
        app.set_initial_job_description_text("Looking for a backend engineer".into());
        app.set_initial_prompt("Tailor this resume".into());

        for command in std::mem::take(&mut app.startup) {
            app.dispatch(command, &tx);
        }
        settle(&mut app, &tx, &mut rx).await;
        assert_eq!(app.workflow().resume_text(), "Experienced engineer...");

        app.handle_action(&Action::SubmitForm, &tx);
        assert!(app.workflow().is_busy());
        assert!(screen(&app).contains("Processing..."));

        settle(&mut app, &tx, &mut rx).await;
        assert!(!app.workflow().is_busy());
        assert!(screen(&app).contains("Enhance Resume"));

        app.handle_action(&Action::FocusSections, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Normal);
        app.handle_action(&Action::ScrollDown, &tx);
        app.handle_action(&Action::Confirm, &tx);
        assert_eq!(
            app.workflow().displayed_section(),
            Some(("Detailed", "Long form."))
        );
        assert!(screen(&app).contains("Long form."));

        app.handle_action(&Action::Cancel, &tx);
        assert_eq!(app.workflow().displayed_section(), None);
    }

    #[tokio::test]
    async fn failed_enhancement_shows_message_and_clears_busy() {
        let mut app = app(false);
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.set_initial_resume("/tmp/cv.pdf".into());
        app.set_initial_job_description_text("jd".into());
        for command in std::mem::take(&mut app.startup) {
            app.dispatch(command, &tx);
        }
        settle(&mut app, &tx, &mut rx).await;

        app.handle_action(&Action::SubmitForm, &tx);
        settle(&mut app, &tx, &mut rx).await;

        assert!(!app.workflow().is_busy());
        assert_eq!(app.workflow().error_message(), Some(ENHANCEMENT_FAILED));
    }

    #[tokio::test]
    async fn typing_in_form_reaches_workflow() {
        let mut app = app(true);
        let (tx, _rx) = mpsc::unbounded_channel();
        assert_eq!(app.current_input_mode(), InputMode::Editing);

        // Resume path -> source -> JD path -> prompt
        for _ in 0..3 {
            app.handle_action(&Action::NextField, &tx);
        }
        for c in "Be bold".chars() {
            app.handle_action(&Action::CharInput(c), &tx);
        }
        assert_eq!(app.workflow().prompt(), "Be bold");
    }

    #[tokio::test]
    async fn help_swallows_the_key_that_closes_it() {
        let mut app = app(true);
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(&Action::ToggleHelp, &tx);
        assert!(app.help.visible);
        assert!(screen(&app).contains("Keybindings"));

        app.handle_action(&Action::Confirm, &tx);
        assert!(!app.help.visible);
        assert!(app.workflow().error_message().is_none());
    }
}
