use crate::domain::Route;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Navigation entries of the header, with their shortcut.
pub const NAV_ITEMS: [(Route, &str, &str); 2] = [
    (Route::SearchClient, "Search Client", "Ctrl+F"),
    (Route::ClientContacted, "Client Contacted", "Ctrl+T"),
];

/// Header colors.
#[allow(missing_docs)]
pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub tab: Style,
    pub tab_active: Style,
    pub logout: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::DarkGray),
            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            logout: Style::default().fg(Color::Red),
        }
    }
}

/// Top line with app name, tabs and logout hint.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    active: Option<&'a Route>,
    show_navigation: bool,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Creates a header with default styling.
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            active: None,
            show_navigation: true,
            style: HeaderBarStyle::default(),
        }
    }

    /// Highlights the tab of `route`.
    #[must_use]
    pub const fn active(mut self, route: &'a Route) -> Self {
        self.active = Some(route);
        self
    }

    /// Hides tabs and logout, as on the login screen.
    #[must_use]
    pub const fn navigation(mut self, show: bool) -> Self {
        self.show_navigation = show;
        self
    }

    fn tab_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (route, label, shortcut) in &NAV_ITEMS {
            let style = if self.active == Some(route) {
                self.style.tab_active
            } else {
                self.style.tab
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::styled(format!("[{shortcut}]  "), self.style.version));
        }
        spans
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let mut left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::styled(format!(" v{}  ", self.version), self.style.version),
        ];
        if self.show_navigation {
            left_spans.extend(self.tab_spans());
        }
        Paragraph::new(Line::from(left_spans)).render(area, buf);

        if self.show_navigation {
            let logout = " Logout [Ctrl+L] ";
            let width = u16::try_from(logout.width()).unwrap_or(u16::MAX);
            if width < area.width {
                let right_area = Rect::new(area.right().saturating_sub(width), area.y, width, 1);
                Paragraph::new(Span::styled(logout, self.style.logout)).render(right_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(header: HeaderBar<'_>) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_header_shows_tabs_and_logout() {
        let route = Route::ClientContacted;
        let line = rendered(HeaderBar::new("vetdesk", "0.1.0").active(&route));

        assert!(line.contains("VETDESK"));
        assert!(line.contains("Search Client"));
        assert!(line.contains("Client Contacted"));
        assert!(line.contains("Logout"));
    }

    #[test]
    fn test_login_header_hides_navigation() {
        let line = rendered(HeaderBar::new("vetdesk", "0.1.0").navigation(false));

        assert!(!line.contains("Logout"));
        assert!(!line.contains("Search Client"));
    }
}
