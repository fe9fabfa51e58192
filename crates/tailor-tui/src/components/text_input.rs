//! Editable text buffer with a byte cursor, plus the renderers for single-line
//! and multi-line fields.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Byte offset into `value`, always on a char boundary.
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.value.len())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the whole value and park the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.cursor();
        self.value.insert(at, c);
        self.cursor = at + c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.cursor();
        self.value.insert_str(at, s);
        self.cursor = at + s.len();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        let at = self.cursor();
        if at == 0 {
            return;
        }
        let prev = self.value[..at]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.value.remove(prev);
        self.cursor = prev;
    }

    /// Delete the word before the cursor, along with any spaces after it.
    pub fn delete_word(&mut self) {
        let at = self.cursor();
        let bytes = self.value.as_bytes();
        let mut end = at;
        while end > 0 && bytes[end - 1] == b' ' {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && !matches!(bytes[start - 1], b' ' | b'\n' | b'/') {
            start -= 1;
        }
        self.value.drain(start..at);
        self.cursor = start;
    }

    /// (line, column) of the cursor, both 0-based, column in bytes.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let at = self.cursor();
        let before = &self.value[..at];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map(|p| at - p - 1).unwrap_or(at);
        (line, col)
    }

    /// Move up one logical line. Returns false when already on the first line.
    pub fn cursor_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return false;
        }
        let lines: Vec<&str> = self.value.split('\n').collect();
        let start: usize = lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = start + col.min(lines[line - 1].len());
        self.snap_to_char_boundary();
        true
    }

    /// Move down one logical line. Returns false when already on the last line.
    pub fn cursor_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        let lines: Vec<&str> = self.value.split('\n').collect();
        if line + 1 >= lines.len() {
            return false;
        }
        let start: usize = lines[..line + 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = start + col.min(lines[line + 1].len());
        self.snap_to_char_boundary();
        true
    }

    fn snap_to_char_boundary(&mut self) {
        while self.cursor > 0 && !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }
}

fn field_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Theme::accent())
    } else {
        Theme::border()
    };
    Block::default()
        .title(title)
        .title_style(if focused { Theme::key_hint() } else { Theme::muted() })
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Split `text` at `col` into (before, char under cursor, after).
fn split_at_cursor(text: &str, col: usize) -> (&str, String, &str) {
    let col = col.min(text.len());
    let (before, after) = text.split_at(col);
    match after.chars().next() {
        Some(c) => (before, c.to_string(), &after[c.len_utf8()..]),
        None => (before, " ".to_string(), ""),
    }
}

fn cursor_line<'a>(before: &'a str, under: String, after: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(before, Theme::normal()),
        Span::styled(under, Style::default().fg(Theme::bg()).bg(Theme::accent())),
        Span::styled(after, Theme::normal()),
    ])
}

/// Render a single-line field with a block cursor when focused.
pub fn render_single_line(
    input: &TextInput,
    title: String,
    placeholder: &str,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let block = field_block(title, focused);
    let text = input.value();

    let display = if text.is_empty() && !focused {
        Paragraph::new(Span::styled(placeholder, Theme::dim()))
    } else if focused {
        let (before, under, after) = split_at_cursor(text, input.cursor());
        Paragraph::new(cursor_line(before, under, after))
    } else {
        Paragraph::new(Span::styled(text, Theme::normal()))
    };

    frame.render_widget(display.block(block), area);
}

/// Render a word-wrapped multi-line field that keeps the cursor in view.
pub fn render_multi_line(
    input: &TextInput,
    title: String,
    placeholder: &str,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let block = field_block(title.clone(), focused);
    let inner = block.inner(area);
    let viewport_height = inner.height as usize;
    let text = input.value();

    if text.is_empty() && !focused {
        let placeholder = Paragraph::new(Span::styled(placeholder, Theme::dim()))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    if !focused {
        let display = Paragraph::new(text)
            .style(Theme::normal())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(display, area);
        return;
    }

    let wrap_width = (inner.width as usize).max(1);
    let (cursor_line_idx, cursor_col) = input.cursor_line_col();

    // (segment, cursor column within the segment if it holds the cursor)
    let mut visual: Vec<(String, Option<usize>)> = Vec::new();
    let mut cursor_visual = 0usize;

    for (li, logical) in text.split('\n').enumerate() {
        let segments = wrap_line(logical, wrap_width);
        let mut offset = 0usize;
        let last = segments.len() - 1;
        for (si, segment) in segments.into_iter().enumerate() {
            let len = segment.len();
            let holds_cursor = li == cursor_line_idx
                && cursor_col >= offset
                && (cursor_col < offset + len || si == last);
            if holds_cursor {
                cursor_visual = visual.len();
                visual.push((segment, Some(cursor_col - offset)));
            } else {
                visual.push((segment, None));
            }
            offset += len;
        }
    }

    // Scroll just far enough to keep the cursor line on screen.
    let scroll = (cursor_visual + 1).saturating_sub(viewport_height.max(1));

    let lines: Vec<Line> = visual
        .iter()
        .skip(scroll)
        .take(viewport_height)
        .map(|(segment, cursor)| match cursor {
            Some(col) => {
                let (before, under, after) = split_at_cursor(segment, *col);
                cursor_line(before, under, after)
            }
            None => Line::from(Span::styled(segment.as_str(), Theme::normal())),
        })
        .collect();

    let below = visual.len().saturating_sub(scroll + viewport_height);
    let block = if below > 0 {
        field_block(title, focused)
            .title_bottom(Line::from(Span::styled(format!(" [{below} more below] "), Theme::dim())))
    } else if scroll > 0 {
        field_block(title, focused)
            .title_bottom(Line::from(Span::styled(format!(" [{scroll} above] "), Theme::dim())))
    } else {
        block
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Word-wrap one logical line into segments of at most `max_width` bytes,
/// preferring to break after a space. Always returns at least one segment.
pub fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.len() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut remaining = text;

    while remaining.len() > max_width {
        let mut limit = max_width;
        while !remaining.is_char_boundary(limit) {
            limit -= 1;
        }
        let break_at = match remaining[..limit].rfind(' ') {
            Some(pos) if pos > max_width / 3 => pos + 1,
            _ => limit,
        };
        // A single char wider than the line still has to go somewhere.
        let break_at = if break_at == 0 {
            remaining.chars().next().map(char::len_utf8).unwrap_or(1)
        } else {
            break_at
        };
        let (line, rest) = remaining.split_at(break_at);
        lines.push(line.to_string());
        remaining = rest;
    }
    lines.push(remaining.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "héllo");
        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "hé");
        input.backspace();
        assert_eq!(input.value(), "h");
    }

    #[test]
    fn delete_word_stops_at_path_separator() {
        let mut input = TextInput::new("~/docs/resume.pdf");
        input.delete_word();
        assert_eq!(input.value(), "~/docs/");
        input.delete_word();
        assert_eq!(input.value(), "~/docs/");
    }

    #[test]
    fn delete_word_eats_trailing_spaces() {
        let mut input = TextInput::new("make it   ");
        input.delete_word();
        assert_eq!(input.value(), "make ");
    }

    #[test]
    fn cursor_moves_between_lines_keeping_column() {
        let mut input = TextInput::new("first line\nab\nthird line");
        assert_eq!(input.cursor_line_col(), (2, 10));
        assert!(input.cursor_up());
        assert_eq!(input.cursor_line_col(), (1, 2));
        assert!(input.cursor_up());
        assert_eq!(input.cursor_line_col(), (0, 2));
        assert!(!input.cursor_up());
        assert!(input.cursor_down());
        assert_eq!(input.cursor_line_col(), (1, 2));
    }

    #[test]
    fn wrap_prefers_spaces() {
        assert_eq!(
            wrap_line("backend engineer with rust", 10),
            vec!["backend ", "engineer ", "with rust"]
        );
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_empty_line_is_one_segment() {
        assert_eq!(wrap_line("", 10), vec![String::new()]);
    }
}
