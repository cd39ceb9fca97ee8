//! Selectable list with an optional fuzzy filter.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::infrastructure::search::FuzzySearcher;

/// Result of a key press on a [`SelectList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEvent {
    /// Key not handled.
    Ignored,
    /// Cursor or filter moved.
    Moved,
    /// Item chosen, by index into the full item list.
    Chosen(usize),
    /// Escape pressed.
    Cancelled,
}

/// Scrollable list of labels with optional marks and fuzzy filter.
#[derive(Debug, Clone)]
pub struct SelectList {
    title: String,
    items: Vec<String>,
    marked: HashSet<usize>,
    filterable: bool,
    filter: String,
    visible: Vec<usize>,
    state: ListState,
    searcher: FuzzySearcher,
    focused: bool,
    empty_text: String,
}

impl SelectList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            marked: HashSet::new(),
            filterable: false,
            filter: String::new(),
            visible: Vec::new(),
            state: ListState::default(),
            searcher: FuzzySearcher::new(),
            focused: false,
            empty_text: "No options".to_string(),
        }
    }

    /// Typing narrows the list by fuzzy match.
    #[must_use]
    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Text shown when nothing is listed.
    #[must_use]
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Changes the text shown when nothing is listed.
    pub fn set_empty_text(&mut self, text: impl Into<String>) {
        self.empty_text = text.into();
    }

    /// Changes the block title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the items and clears filter and marks.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.marked.clear();
        self.filter.clear();
        self.refresh();
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    /// All items, ignoring the filter.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Marks items by index, replacing previous marks.
    pub fn set_marked(&mut self, marked: impl IntoIterator<Item = usize>) {
        self.marked = marked.into_iter().collect();
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Index into the full list of the highlighted item.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.state
            .selected()
            .and_then(|row| self.visible.get(row).copied())
    }

    /// Moves the highlight to the item at `index` if it is visible.
    pub fn select(&mut self, index: usize) {
        if let Some(row) = self.visible.iter().position(|i| *i == index) {
            self.state.select(Some(row));
        }
    }

    fn refresh(&mut self) {
        self.visible = self.searcher.rank(&self.items, &self.filter);
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn step(&mut self, forward: bool) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = if forward {
            if current >= last { 0 } else { current + 1 }
        } else if current == 0 {
            last
        } else {
            current - 1
        };
        self.state.select(Some(next));
    }

    /// Moves the cursor, edits the filter or chooses an item.
    pub fn handle_key(&mut self, key: KeyEvent) -> SelectEvent {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return SelectEvent::Ignored;
        }
        match key.code {
            KeyCode::Up => {
                self.step(false);
                SelectEvent::Moved
            }
            KeyCode::Down => {
                self.step(true);
                SelectEvent::Moved
            }
            KeyCode::Enter => self
                .selected()
                .map_or(SelectEvent::Ignored, SelectEvent::Chosen),
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    SelectEvent::Cancelled
                } else {
                    self.filter.clear();
                    self.refresh();
                    SelectEvent::Moved
                }
            }
            KeyCode::Char(c) if self.filterable => {
                self.filter.push(c);
                self.refresh();
                SelectEvent::Moved
            }
            KeyCode::Backspace if self.filterable && !self.filter.is_empty() => {
                self.filter.pop();
                self.refresh();
                SelectEvent::Moved
            }
            _ => SelectEvent::Ignored,
        }
    }
}

impl Widget for &mut SelectList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let title = if self.filter.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(" {} / {} ", self.title, self.filter)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if self.visible.is_empty() {
            Paragraph::new(self.empty_text.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&index| {
                let label = self.items[index].as_str();
                if self.marked.is_empty() {
                    ListItem::new(label)
                } else {
                    let marker = if self.marked.contains(&index) { "[x] " } else { "[ ] " };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Yellow)),
                        Span::raw(label),
                    ]))
                }
            })
            .collect();

        let highlight = if self.focused {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");
        StatefulWidget::render(list, area, buf, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn outcomes() -> SelectList {
        let mut list = SelectList::new("Outcome").filterable();
        list.set_items(vec![
            "Booked".to_string(),
            "Declined".to_string(),
            "No answer".to_string(),
        ]);
        list
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = outcomes();
        assert_eq!(list.selected(), Some(0));

        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.selected(), Some(2));

        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_filter_then_choose_returns_full_index() {
        let mut list = outcomes();
        for c in "decl".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(list.handle_key(key(KeyCode::Enter)), SelectEvent::Chosen(1));
    }

    #[test]
    fn test_escape_clears_filter_first() {
        let mut list = outcomes();
        list.handle_key(key(KeyCode::Char('z')));
        assert_eq!(list.selected(), None);

        assert_eq!(list.handle_key(key(KeyCode::Esc)), SelectEvent::Moved);
        assert_eq!(list.selected(), Some(0));
        assert_eq!(list.handle_key(key(KeyCode::Esc)), SelectEvent::Cancelled);
    }

    #[test]
    fn test_unfilterable_ignores_chars() {
        let mut list = SelectList::new("Opt out");
        list.set_items(vec!["Yes".into(), "No".into()]);

        assert_eq!(list.handle_key(key(KeyCode::Char('n'))), SelectEvent::Ignored);
        list.select(1);
        assert_eq!(list.selected(), Some(1));
    }
}
