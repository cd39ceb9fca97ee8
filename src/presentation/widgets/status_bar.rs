//! Bottom bar with key hints and an optional status message.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    /// Message color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Bottom bar of the screen.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    hints: Vec<(&'static str, &'static str)>,
    message: Option<(String, StatusLevel)>,
}

impl StatusBar {
    /// Creates an empty bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hints: Vec::new(),
            message: None,
        }
    }

    /// Adds a `key: action` hint.
    #[must_use]
    pub fn hint(mut self, key: &'static str, action: &'static str) -> Self {
        self.hints.push((key, action));
        self
    }

    /// Right-aligned message.
    #[must_use]
    pub fn message(mut self, text: impl Into<String>, level: StatusLevel) -> Self {
        self.message = Some((text.into(), level));
        self
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", text_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(": {action}"), text_style));
        }
        spans
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut spans = self.hint_spans();
        let used: usize = spans.iter().map(|s| s.content.width()).sum();

        if let Some((text, level)) = &self.message {
            let width = usize::from(area.width);
            let padding = width.saturating_sub(used + text.width());
            if padding > 0 {
                spans.push(Span::raw(" ".repeat(padding)));
                spans.push(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(level.color())
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_hints_and_message() {
        let bar = StatusBar::new()
            .hint("Enter", "Search")
            .hint("Esc", "Back")
            .message("Unsaved changes", StatusLevel::Warning);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.starts_with("Enter: Search | Esc: Back"));
        assert!(line.trim_end().ends_with("Unsaved changes"));
    }
}
