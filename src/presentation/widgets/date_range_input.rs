//! Text field holding a date range.

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::input::TextInput;
use crate::application::services::DateRange;

/// What the field currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeValue {
    /// Nothing typed.
    Empty,
    /// Both bounds parsed.
    Valid(DateRange),
    /// Text that is not a range.
    Invalid,
}

/// Accepts `DD Mon YYYY - DD Mon YYYY` or `YYYY-MM-DD - YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct DateRangeInput {
    input: TextInput,
}

impl DateRangeInput {
    /// Creates an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: TextInput::new("Sent between").placeholder("01 Mar 2026 - 31 Mar 2026"),
        }
    }

    /// Text as typed.
    #[must_use]
    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_value(text);
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    /// Edits the text. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.input.handle_key(key)
    }

    /// Parses the current text.
    #[must_use]
    pub fn value(&self) -> RangeValue {
        let text = self.input.value().trim();
        if text.is_empty() {
            return RangeValue::Empty;
        }
        DateRange::parse(text).map_or(RangeValue::Invalid, RangeValue::Valid)
    }

    /// Rewrites the text in display form when it parses.
    pub fn normalize(&mut self) {
        if let RangeValue::Valid(range) = self.value() {
            self.input.set_value(range.display_text());
        }
    }
}

impl Default for DateRangeInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &DateRangeInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self.input).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_values() {
        let mut input = DateRangeInput::new();
        assert_eq!(input.value(), RangeValue::Empty);

        input.set_text("soon");
        assert_eq!(input.value(), RangeValue::Invalid);

        input.set_text("2026-03-31 - 2026-03-01");
        let expected = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        );
        assert_eq!(input.value(), RangeValue::Valid(expected));

        input.normalize();
        assert_eq!(input.text(), "01 Mar 2026 - 31 Mar 2026");
    }
}
