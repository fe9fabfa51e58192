//! Component trait and all TUI components.
//!
//! Components own only view state (cursors, scroll offsets, highlights).
//! Everything the workflow knows is read from the `Workflow` passed in.

pub mod help;
pub mod path_suggest;
pub mod resume_form;
pub mod section_list;
pub mod section_viewer;
pub mod status_bar;
pub mod text_input;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::Frame;

use tailor_core::Workflow;

use crate::action::Action;

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action, workflow: &Workflow) -> Option<Action> {
        let _ = (action, workflow);
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, workflow: &Workflow);
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}
