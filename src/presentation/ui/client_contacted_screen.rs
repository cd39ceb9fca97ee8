//! Client-Contacted screen: the paginated outreach log with its filter bar.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};
use tracing::debug;
use uuid::Uuid;

use super::utils::{render_loading, truncate};
use crate::application::services::{ContactedFilter, FollowStatus, PAGE_SIZES};
use crate::domain::NotificationLevel;
use crate::domain::entities::{ContactedEntry, ContactedPage, FollowSwitch, PracticeOption};
use crate::domain::ports::ContactedQuery;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    DateRangeInput, RangeValue, SelectEvent, SelectList, StatusBar, TextInput, Toggle,
};

/// What the app has to do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactedAction {
    /// Nothing to do.
    None,
    /// Show a toast.
    Notify(NotificationLevel, String),
    /// Load a page. Only the result of the latest `seq` is applied.
    Fetch {
        /// Request number.
        seq: u64,
        /// Filters and page.
        query: ContactedQuery,
    },
    /// Toggle the follow-up flag of an SMS contact.
    ToggleFollow(Uuid),
    /// Open the client on the search screen.
    OpenClient(String),
}

/// Focused filter control or the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ContactedFocus {
    Name,
    Dates,
    Status,
    Practices,
    Table,
}

impl ContactedFocus {
    const ORDER: [Self; 5] = [
        Self::Name,
        Self::Dates,
        Self::Status,
        Self::Practices,
        Self::Table,
    ];

    fn step(self, forward: bool) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ORDER[next]
    }
}

/// Filterable, paginated log of clients contacted by SMS.
pub struct ClientContactedScreen {
    filter: ContactedFilter,
    name_input: TextInput,
    dates_input: DateRangeInput,
    status_cursor: usize,
    catalog: Vec<PracticeOption>,
    practice_list: SelectList,
    entries: Vec<ContactedEntry>,
    count: u64,
    table_state: TableState,
    pending_follow: HashSet<Uuid>,
    focus: ContactedFocus,
    seq: u64,
    loading: bool,
}

impl ClientContactedScreen {
    /// Builds the screen from a filter restored out of the session store.
    #[must_use]
    pub fn new(filter: ContactedFilter) -> Self {
        let state = filter.state();
        let mut name_input = TextInput::new(" Client name ").placeholder("At least 3 letters");
        name_input.set_value(state.name.as_str());
        let mut dates_input = DateRangeInput::new();
        dates_input.set_text(state.range_text.as_str());

        let mut screen = Self {
            filter,
            name_input,
            dates_input,
            status_cursor: 0,
            catalog: Vec::new(),
            practice_list: SelectList::new("Practices")
                .filterable()
                .empty_text("Loading practices..."),
            entries: Vec::new(),
            count: 0,
            table_state: TableState::default(),
            pending_follow: HashSet::new(),
            focus: ContactedFocus::Table,
            seq: 0,
            loading: false,
        };
        screen.apply_focus();
        screen
    }

    /// Current filters.
    #[must_use]
    pub const fn filter(&self) -> &ContactedFilter {
        &self.filter
    }

    /// Rows of the current page.
    #[must_use]
    pub fn entries(&self) -> &[ContactedEntry] {
        &self.entries
    }

    /// Focused control.
    #[must_use]
    pub const fn focus(&self) -> ContactedFocus {
        self.focus
    }

    /// Whether a page request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    fn fetch(&mut self, query: ContactedQuery) -> ContactedAction {
        self.seq += 1;
        self.loading = true;
        ContactedAction::Fetch {
            seq: self.seq,
            query,
        }
    }

    /// Query for the first page with the restored filter.
    pub fn start(&mut self) -> ContactedAction {
        let query = self.filter.search();
        self.fetch(query)
    }

    /// Applies the configured rows per page.
    pub fn set_page_size(&mut self, size: u32) {
        let _ = self.filter.set_page_size(size);
    }

    /// Applies a page unless a newer request was made.
    pub fn apply_page(&mut self, seq: u64, page: ContactedPage) {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "Dropping superseded contacted page");
            return;
        }
        self.loading = false;
        self.count = page.count;
        self.entries = page.results;
        self.table_state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    /// Ends loading when `seq` is the latest request.
    pub fn fetch_failed(&mut self, seq: u64) {
        if seq == self.seq {
            self.loading = false;
        }
    }

    /// The row takes the value returned by the server.
    pub fn apply_follow(&mut self, switch: FollowSwitch) {
        self.pending_follow.remove(&switch.uuid);
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.sms_history_id == switch.uuid)
        {
            entry.is_followed = switch.is_followed;
        }
    }

    /// Re-enables the row after a failed toggle.
    pub fn follow_failed(&mut self, sms_id: Uuid) {
        self.pending_follow.remove(&sms_id);
    }

    /// Fills the practice picker and re-marks the saved selection.
    pub fn set_catalog(&mut self, catalog: Vec<PracticeOption>) {
        self.practice_list
            .set_items(catalog.iter().map(|o| o.label.clone()).collect());
        self.practice_list.set_empty_text("No practices");
        self.catalog = catalog;
        self.refresh_marks();
    }

    fn refresh_marks(&mut self) {
        let state = self.filter.state();
        let marked: Vec<usize> = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, option)| state.is_selected(option))
            .map(|(i, _)| i)
            .collect();
        self.practice_list.set_marked(marked);
    }

    fn apply_focus(&mut self) {
        self.name_input.set_focused(self.focus == ContactedFocus::Name);
        self.dates_input
            .set_focused(self.focus == ContactedFocus::Dates);
        self.practice_list
            .set_focused(self.focus == ContactedFocus::Practices);
    }

    /// Persists the field being left.
    fn leave_focus(&mut self) -> ContactedAction {
        match self.focus {
            ContactedFocus::Name => {
                self.filter.commit_name();
                ContactedAction::None
            }
            ContactedFocus::Dates => self.commit_dates(),
            _ => ContactedAction::None,
        }
    }

    fn commit_dates(&mut self) -> ContactedAction {
        match self.dates_input.value() {
            RangeValue::Empty => {
                self.filter.set_date_range(None, "");
                ContactedAction::None
            }
            RangeValue::Valid(range) => {
                self.dates_input.normalize();
                self.filter
                    .set_date_range(Some(range), self.dates_input.text().to_string());
                ContactedAction::None
            }
            RangeValue::Invalid => ContactedAction::Notify(
                NotificationLevel::Warn,
                "Enter dates as DD Mon YYYY - DD Mon YYYY".to_string(),
            ),
        }
    }

    fn move_focus(&mut self, forward: bool) -> ContactedAction {
        let action = self.leave_focus();
        self.focus = self.focus.step(forward);
        self.apply_focus();
        action
    }

    fn search(&mut self) -> ContactedAction {
        if let ContactedAction::Notify(level, message) = self.leave_focus() {
            return ContactedAction::Notify(level, message);
        }
        let query = self.filter.search();
        self.fetch(query)
    }

    fn reset(&mut self) -> ContactedAction {
        self.filter.reset();
        self.name_input.clear();
        self.dates_input.clear();
        self.refresh_marks();
        let query = self.filter.search();
        self.fetch(query)
    }

    fn selected_entry(&self) -> Option<&ContactedEntry> {
        self.table_state.selected().and_then(|i| self.entries.get(i))
    }

    fn page_count(&self) -> u32 {
        self.filter.page_count(self.count).max(1)
    }

    fn go_to_page(&mut self, page: u32) -> ContactedAction {
        if page >= self.page_count() || page == self.filter.state().page {
            return ContactedAction::None;
        }
        let query = self.filter.go_to_page(page);
        self.fetch(query)
    }

    fn cycle_page_size(&mut self) -> ContactedAction {
        let current = self.filter.state().page_size;
        let index = PAGE_SIZES.iter().position(|s| *s == current).unwrap_or(0);
        let next = PAGE_SIZES[(index + 1) % PAGE_SIZES.len()];
        let query = self.filter.set_page_size(next);
        self.fetch(query)
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> ContactedAction {
        let page = self.filter.state().page;
        match key.code {
            KeyCode::Up => {
                self.table_state.select_previous();
                ContactedAction::None
            }
            KeyCode::Down => {
                if self
                    .table_state
                    .selected()
                    .is_some_and(|i| i + 1 < self.entries.len())
                {
                    self.table_state.select_next();
                }
                ContactedAction::None
            }
            KeyCode::Left | KeyCode::PageUp => match page.checked_sub(1) {
                Some(previous) => self.go_to_page(previous),
                None => ContactedAction::None,
            },
            KeyCode::Right | KeyCode::PageDown => self.go_to_page(page + 1),
            KeyCode::Char('s') => self.cycle_page_size(),
            KeyCode::Char(' ') => {
                let Some(id) = self.selected_entry().map(|e| e.sms_history_id) else {
                    return ContactedAction::None;
                };
                if self.pending_follow.insert(id) {
                    ContactedAction::ToggleFollow(id)
                } else {
                    ContactedAction::None
                }
            }
            KeyCode::Enter => self
                .selected_entry()
                .map_or(ContactedAction::None, |e| {
                    ContactedAction::OpenClient(e.client_id.clone())
                }),
            _ => ContactedAction::None,
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> ContactedAction {
        if EventHandler::is_alt(&key, 'r') {
            return self.reset();
        }
        match key.code {
            KeyCode::Tab => return self.move_focus(true),
            KeyCode::BackTab => return self.move_focus(false),
            _ => {}
        }

        match self.focus {
            ContactedFocus::Name => {
                if EventHandler::is_submit_event(&key) {
                    return self.search();
                }
                if self.name_input.handle_key(key) {
                    self.filter.set_name(self.name_input.value());
                }
            }
            ContactedFocus::Dates => {
                if EventHandler::is_submit_event(&key) {
                    return self.search();
                }
                self.dates_input.handle_key(key);
            }
            ContactedFocus::Status => match key.code {
                KeyCode::Left | KeyCode::Right => self.status_cursor ^= 1,
                KeyCode::Char(' ') => {
                    self.filter
                        .toggle_status(FollowStatus::ALL[self.status_cursor]);
                }
                KeyCode::Enter => return self.search(),
                _ => {}
            },
            ContactedFocus::Practices => match self.practice_list.handle_key(key) {
                SelectEvent::Chosen(index) => {
                    if let Some(option) = self.catalog.get(index).cloned() {
                        self.filter.toggle_practice(&option, &self.catalog);
                        self.refresh_marks();
                    }
                }
                SelectEvent::Ignored if key.code == KeyCode::Delete => {
                    self.filter.clear_practices();
                    self.refresh_marks();
                }
                _ => {}
            },
            ContactedFocus::Table => return self.handle_table_key(key),
        }
        ContactedAction::None
    }

    /// Key hints for the focused control.
    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        let bar = StatusBar::new().hint("Tab", "Next").hint("Alt+R", "Reset");
        match self.focus {
            ContactedFocus::Table => bar
                .hint("Space", "Follow up")
                .hint("Enter", "Open client")
                .hint("←/→", "Page")
                .hint("s", "Page size"),
            ContactedFocus::Practices => bar.hint("Enter", "Toggle").hint("Del", "Clear"),
            ContactedFocus::Status => bar.hint("Space", "Toggle").hint("Enter", "Search"),
            ContactedFocus::Name | ContactedFocus::Dates => bar.hint("Enter", "Search"),
        }
    }

    fn practice_summary(&self) -> String {
        let selected = &self.filter.state().practices;
        if selected.is_empty() {
            "All practices".to_string()
        } else {
            selected
                .iter()
                .map(|p| p.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn render_filters(&self, area: Rect, buf: &mut Buffer) {
        let [name_area, dates_area, status_area, practice_area] = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(42),
            Constraint::Fill(2),
        ])
        .areas(area);

        (&self.name_input).render(name_area, buf);
        (&self.dates_input).render(dates_area, buf);

        let status_focused = self.focus == ContactedFocus::Status;
        let statuses = &self.filter.state().statuses;
        let mut spans = Vec::new();
        for (i, status) in FollowStatus::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.extend(
                Toggle::checkbox(status.label(), statuses.contains(status))
                    .focused(status_focused && self.status_cursor == i)
                    .spans(),
            );
        }
        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if status_focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::Gray)
                    })
                    .title(" Status "),
            )
            .render(status_area, buf);

        let width = usize::from(practice_area.width.saturating_sub(2));
        Paragraph::new(truncate(&self.practice_summary(), width))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray))
                    .title(" Practices "),
            )
            .render(practice_area, buf);
    }

    fn render_table(&mut self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focus == ContactedFocus::Table {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Client Contacted ({}) ", self.count));

        if self.entries.is_empty() {
            let text = if self.loading { "Loading..." } else { "No contacted clients" };
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(
            ["Client", "Pets", "Email", "Phone", "Practice", "SMS sent", "Followed"]
                .map(Cell::from),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.entries.iter().map(|entry| {
            let followed = if self.pending_follow.contains(&entry.sms_history_id) {
                Span::styled("[…]", Style::default().fg(Color::Yellow))
            } else if entry.is_followed {
                Span::styled("[x] Yes", Style::default().fg(Color::Green))
            } else {
                Span::styled("[ ] No", Style::default().fg(Color::Gray))
            };
            Row::new(vec![
                Cell::from(entry.full_name.clone()),
                Cell::from(entry.pet_names()),
                Cell::from(entry.primary_email().unwrap_or("-").to_string()),
                Cell::from(entry.primary_phone().unwrap_or_else(|| "-".to_string())),
                Cell::from(entry.practice_name.clone().unwrap_or_default()),
                Cell::from(entry.sent_date_label()),
                Cell::from(Line::from(followed)),
            ])
        });

        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(15),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(9),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(table, area, buf, &mut self.table_state);
    }

    fn render_pager(&self, area: Rect, buf: &mut Buffer) {
        let state = self.filter.state();
        let dim = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(
                format!("Page {} of {}", state.page + 1, self.page_count()),
                Style::default().fg(Color::White),
            ),
            Span::styled("  |  ", dim),
            Span::styled(format!("{} results", self.count), dim),
            Span::styled("  |  ", dim),
            Span::styled(format!("Rows per page: {}", state.page_size), dim),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

impl Widget for &mut ClientContactedScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [filter_area, table_area, pager_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_filters(filter_area, buf);
        self.render_table(table_area, buf);
        self.render_pager(pager_area, buf);

        if self.focus == ContactedFocus::Practices {
            let [_, _, _, practice_column] = Layout::horizontal([
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(42),
                Constraint::Fill(2),
            ])
            .areas(filter_area);
            let height = 14.min(area.bottom().saturating_sub(filter_area.bottom()));
            let dropdown = Rect::new(
                practice_column.x,
                filter_area.bottom(),
                practice_column.width,
                height,
            );
            Clear.render(dropdown, buf);
            (&mut self.practice_list).render(dropdown, buf);
        }

        if self.loading && !self.entries.is_empty() {
            render_loading(table_area, buf, "Loading...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionStorePort;
    use crate::domain::entities::PatientName;
    use crate::infrastructure::storage::MemorySessionStore;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entry(id: Uuid, followed: bool) -> ContactedEntry {
        ContactedEntry {
            client_id: "C1".into(),
            emails: Vec::new(),
            phones: Vec::new(),
            patients: vec![PatientName {
                odu_id: "P1".into(),
                name: "Rex".into(),
            }],
            full_name: "Ann Smith".into(),
            is_followed: followed,
            practice_id: None,
            practice_name: Some("Main St".into()),
            sent_at: None,
            sms_history_id: id,
        }
    }

    fn page(entries: Vec<ContactedEntry>, count: u64) -> ContactedPage {
        ContactedPage {
            count,
            next: None,
            previous: None,
            results: entries,
        }
    }

    fn screen_with_store() -> (ClientContactedScreen, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let filter = ContactedFilter::restore(store.clone());
        (ClientContactedScreen::new(filter), store)
    }

    fn fetch_seq(action: &ContactedAction) -> u64 {
        match action {
            ContactedAction::Fetch { seq, .. } => *seq,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_start_uses_default_status() {
        let (mut screen, _) = screen_with_store();
        match screen.start() {
            ContactedAction::Fetch { query, .. } => {
                assert_eq!(query.followed, Some(false));
                assert_eq!(query.offset, 0);
            }
            other => panic!("expected fetch, got {other:?}"),
        }
        assert!(screen.is_loading());
    }

    #[test]
    fn test_superseded_page_is_dropped() {
        let (mut screen, _) = screen_with_store();
        let first = fetch_seq(&screen.start());
        let second = fetch_seq(&screen.start());

        screen.apply_page(first, page(vec![entry(Uuid::new_v4(), false)], 1));
        assert!(screen.entries().is_empty());

        screen.apply_page(second, page(vec![], 0));
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_toggle_follow_sends_once_and_takes_server_value() {
        let (mut screen, _) = screen_with_store();
        let id = Uuid::new_v4();
        let seq = fetch_seq(&screen.start());
        screen.apply_page(seq, page(vec![entry(id, false)], 1));

        assert_eq!(
            screen.handle_key(key(KeyCode::Char(' '))),
            ContactedAction::ToggleFollow(id)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Char(' '))),
            ContactedAction::None
        );

        screen.apply_follow(FollowSwitch {
            is_followed: true,
            uuid: id,
        });
        assert!(screen.entries()[0].is_followed);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char(' '))),
            ContactedAction::ToggleFollow(id)
        );
    }

    #[test]
    fn test_enter_opens_client() {
        let (mut screen, _) = screen_with_store();
        let seq = fetch_seq(&screen.start());
        screen.apply_page(seq, page(vec![entry(Uuid::new_v4(), true)], 1));

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            ContactedAction::OpenClient("C1".into())
        );
    }

    #[test]
    fn test_next_page_only_within_count() {
        let (mut screen, _) = screen_with_store();
        let seq = fetch_seq(&screen.start());
        screen.apply_page(seq, page(vec![entry(Uuid::new_v4(), true)], 30));

        match screen.handle_key(key(KeyCode::Right)) {
            ContactedAction::Fetch { query, .. } => assert_eq!(query.offset, 25),
            other => panic!("expected fetch, got {other:?}"),
        }
        let seq = screen.seq;
        screen.apply_page(seq, page(vec![entry(Uuid::new_v4(), true)], 30));
        assert_eq!(screen.handle_key(key(KeyCode::Right)), ContactedAction::None);
    }

    #[test]
    fn test_name_is_persisted_when_leaving_field() {
        let (mut screen, store) = screen_with_store();
        screen.focus = ContactedFocus::Name;
        for c in "Ann".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(store.get("nameFilter"), None);

        screen.handle_key(key(KeyCode::Tab));

        assert_eq!(store.get("nameFilter").as_deref(), Some("\"Ann\""));
        assert_eq!(screen.focus(), ContactedFocus::Dates);
    }

    #[test]
    fn test_invalid_dates_warn_on_search() {
        let (mut screen, _) = screen_with_store();
        screen.focus = ContactedFocus::Dates;
        screen.apply_focus();
        for c in "tomorrow".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter)),
            ContactedAction::Notify(NotificationLevel::Warn, _)
        ));
    }

    #[test]
    fn test_filter_restored_from_store() {
        let store = Arc::new(MemorySessionStore::new());
        {
            let mut filter = ContactedFilter::restore(store.clone());
            filter.set_name("Smith");
            filter.commit_name();
        }

        let screen = ClientContactedScreen::new(ContactedFilter::restore(store));

        assert_eq!(screen.name_input.value(), "Smith");
    }

    #[test]
    fn test_practice_toggle_marks_group_members() {
        let (mut screen, _) = screen_with_store();
        screen.set_catalog(vec![
            PracticeOption::group("West", vec!["P1".into(), "P2".into()]),
            PracticeOption::practice("Alpha", "P1"),
            PracticeOption::practice("Beta", "P2"),
        ]);
        screen.focus = ContactedFocus::Practices;

        screen.handle_key(key(KeyCode::Enter));

        assert_eq!(screen.filter().state().practices.len(), 3);
        assert_eq!(screen.practice_summary(), "West, Alpha, Beta");

        screen.handle_key(key(KeyCode::Delete));
        assert_eq!(screen.practice_summary(), "All practices");
    }

    #[test]
    fn test_reset_sets_followed_up_and_fetches() {
        let (mut screen, _) = screen_with_store();
        let action = screen.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT));

        match action {
            ContactedAction::Fetch { query, .. } => assert_eq!(query.followed, Some(true)),
            other => panic!("expected fetch, got {other:?}"),
        }
    }
}
