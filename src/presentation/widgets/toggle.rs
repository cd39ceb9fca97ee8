//! Checkbox and radio button lines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToggleKind {
    Checkbox,
    Radio,
}

/// One labelled checkbox or radio button.
#[derive(Debug, Clone)]
pub struct Toggle<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
    kind: ToggleKind,
}

impl<'a> Toggle<'a> {
    /// Creates a checkbox.
    #[must_use]
    pub const fn checkbox(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            focused: false,
            kind: ToggleKind::Checkbox,
        }
    }

    /// Creates a radio button.
    #[must_use]
    pub const fn radio(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            focused: false,
            kind: ToggleKind::Radio,
        }
    }

    /// Sets focus state.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn marker(&self) -> &'static str {
        match (self.kind, self.checked) {
            (ToggleKind::Checkbox, true) => "[x]",
            (ToggleKind::Checkbox, false) => "[ ]",
            (ToggleKind::Radio, true) => "(•)",
            (ToggleKind::Radio, false) => "( )",
        }
    }

    /// Spans for embedding in a larger line.
    #[must_use]
    pub fn spans(&self) -> Vec<Span<'a>> {
        let label_style = if self.focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            Span::styled(self.marker(), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(self.label, label_style),
        ]
    }
}

impl Widget for Toggle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(self.spans()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(Toggle::checkbox("a", true).marker(), "[x]");
        assert_eq!(Toggle::checkbox("a", false).marker(), "[ ]");
        assert_eq!(Toggle::radio("a", true).marker(), "(•)");
        assert_eq!(Toggle::radio("a", false).marker(), "( )");
    }
}
