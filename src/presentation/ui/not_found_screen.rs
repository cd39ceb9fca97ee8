use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

/// Shown for any unknown route.
pub struct NotFoundScreen {
    path: String,
}

impl NotFoundScreen {
    /// Creates the screen for an unknown `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Widget for &NotFoundScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [center] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);
        let lines = vec![
            Line::from("404 - Page Not Found").style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from("The requested page does not exist."),
            Line::from(self.path.as_str()).style(Style::default().fg(Color::DarkGray)),
            Line::from("Esc: Home").style(Style::default().fg(Color::DarkGray)),
        ];
        Paragraph::new(lines).centered().render(center, buf);
    }
}
