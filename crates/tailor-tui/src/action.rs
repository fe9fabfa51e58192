//! Action enum: the message bus for the TUI.
//! Key presses and backend completions both arrive here.

use tailor_core::Command;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// A tick event for animations.
    Tick,

    // ── Workflow ────────────────────────────────────────────
    /// A command for the resume workflow. Completions from spawned backend
    /// calls come back through here too.
    Workflow(Command),

    // ── Focus ───────────────────────────────────────────────
    /// Move to the next field (Tab).
    NextField,
    /// Move to the previous field (Shift+Tab).
    PrevField,
    /// Hand focus to the sections list.
    FocusSections,

    // ── Text Input ──────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter in a text field. The focused field decides what it means.
    NewlineInput,
    /// Submit the form (Ctrl+S).
    SubmitForm,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Confirm,
    Cancel,
}

impl Action {
    /// Whether this action came from the keyboard, as opposed to a timer or
    /// a background task.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Action::ToggleHelp
                | Action::NextField
                | Action::PrevField
                | Action::CharInput(_)
                | Action::BackspaceInput
                | Action::DeleteWord
                | Action::NewlineInput
                | Action::SubmitForm
                | Action::PasteBulk(_)
                | Action::ScrollUp
                | Action::ScrollDown
                | Action::PageUp
                | Action::PageDown
                | Action::Confirm
                | Action::Cancel
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}
