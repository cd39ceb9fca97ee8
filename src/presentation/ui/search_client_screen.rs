//! Search-Client screen: find a client, edit contact data and patient outcomes,
//! browse the practice FAQ.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use tracing::debug;

use super::utils::{centered_fixed, centered_rect, render_loading};
use crate::application::services::{ClientEditor, FormField};
use crate::application::use_cases::{SearchMode, SearchOutcome, build_search};
use crate::domain::{NotificationLevel, Route};
use crate::domain::entities::{ClientRecord, ClientSummary, ClientUpdate, FaqEntry};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    PatientColumn, PatientsTable, SelectEvent, SelectList, StatusBar, TextInput, Toggle,
};

const FORM_FIELDS: [FormField; 4] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Phone,
    FormField::Email,
];

const NO_RESULTS_MESSAGE: &str = "No results found. Please refine your search and try again.";
const NO_CLIENT_PLACEHOLDER: &str = "Results will show once a client is selected";
const NO_PRACTICE_PLACEHOLDER: &str = "Results will show once a practice is added";
const EMPTY_FAQ_PLACEHOLDER: &str = "No results provided by the practice";
const NO_OUTCOME_LABEL: &str = "(no outcome)";

/// A search waiting on the operator or on a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Search mode at the time of the request.
    pub mode: SearchMode,
    /// Query as typed.
    pub input: String,
}

/// Where the operator was heading when unsaved edits stopped them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Run this search.
    Search(PendingSearch),
    /// Open another screen.
    Navigate(Route),
    /// Log out.
    Logout,
    /// Exit the app.
    Quit,
}

/// What the app has to do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// Nothing to do.
    None,
    /// Show a toast.
    Notify(NotificationLevel, String),
    /// Run a validated search.
    Search(PendingSearch),
    /// Load the client with this id.
    LoadClient(String),
    /// Load the FAQ of this practice id.
    LoadFaq(String),
    /// Send the update, then carry on with `then` if it succeeds.
    Save {
        /// Id of the loaded client.
        client_id: String,
        /// Changed fields only.
        update: ClientUpdate,
        /// Where to go once the save succeeds.
        then: Option<Continuation>,
    },
    /// Edits were discarded; carry on.
    Continue(Continuation),
}

/// Focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SearchFocus {
    Mode,
    Query,
    Results,
    Field(FormField),
    EmailChoice,
    PhoneChoice,
    Patients,
    Practice,
    Faq,
}

enum Popup {
    Outcome { patient_id: String, list: SelectList },
    OptOut { patient_id: String, list: SelectList },
    Comment { patient_id: String, input: TextInput },
    Unsaved { then: Continuation, save: bool },
}

/// Client lookup, editing and the practice FAQ.
pub struct SearchClientScreen {
    mode: SearchMode,
    text_query: TextInput,
    phone_query: TextInput,
    results: Vec<ClientSummary>,
    results_list: SelectList,
    editor: ClientEditor,
    form_inputs: [TextInput; 4],
    email_list: SelectList,
    phone_list: SelectList,
    patient_row: usize,
    patient_column: PatientColumn,
    outcomes: Vec<String>,
    practice_list: SelectList,
    selected_practice: Option<String>,
    faq: Vec<FaqEntry>,
    faq_list: SelectList,
    faq_loading: bool,
    focus: SearchFocus,
    popup: Option<Popup>,
    loading: bool,
}

impl SearchClientScreen {
    /// Creates the screen with an empty form.
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            mode: SearchMode::Text,
            text_query: TextInput::new(" Search ").placeholder(SearchMode::Text.label()),
            phone_query: TextInput::new(" Search ").placeholder(SearchMode::Phone.label()),
            results: Vec::new(),
            results_list: SelectList::new("Results")
                .filterable()
                .empty_text("Search for a client to begin"),
            editor: ClientEditor::new(),
            form_inputs: FORM_FIELDS.map(|f| TextInput::new(format!(" {} ", f.label()))),
            email_list: SelectList::new("Emails"),
            phone_list: SelectList::new("Phone numbers"),
            patient_row: 0,
            patient_column: PatientColumn::Outcome,
            outcomes: Vec::new(),
            practice_list: SelectList::new("Practice"),
            selected_practice: None,
            faq: Vec::new(),
            faq_list: SelectList::new("Questions"),
            faq_loading: false,
            focus: SearchFocus::Query,
            popup: None,
            loading: false,
        };
        screen.apply_focus();
        screen
    }

    /// Current search mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Focused control.
    #[must_use]
    pub const fn focus(&self) -> SearchFocus {
        self.focus
    }

    /// Editor of the loaded client.
    #[must_use]
    pub const fn editor(&self) -> &ClientEditor {
        &self.editor
    }

    /// Whether a search, load or save is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sets the in-flight flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Matches waiting for a choice.
    #[must_use]
    pub fn results(&self) -> &[ClientSummary] {
        &self.results
    }

    /// FAQ of the selected practice.
    #[must_use]
    pub fn faq(&self) -> &[FaqEntry] {
        &self.faq
    }

    /// Whether the unsaved-changes prompt is open.
    #[must_use]
    pub fn has_unsaved_prompt(&self) -> bool {
        matches!(self.popup, Some(Popup::Unsaved { .. }))
    }

    /// Holds `then` behind the unsaved-changes prompt when the form is dirty.
    /// Returns `false` when there is nothing to lose or a request is in flight.
    pub fn guard_leave(&mut self, then: Continuation) -> bool {
        if self.loading || !self.editor.is_dirty() {
            return false;
        }
        debug!(?then, "Unsaved edits, asking before leaving");
        self.popup = Some(Popup::Unsaved { then, save: true });
        true
    }

    fn query(&self) -> &TextInput {
        match self.mode {
            SearchMode::Text => &self.text_query,
            SearchMode::Phone => &self.phone_query,
        }
    }

    fn query_mut(&mut self) -> &mut TextInput {
        match self.mode {
            SearchMode::Text => &mut self.text_query,
            SearchMode::Phone => &mut self.phone_query,
        }
    }

    /// Switching mode empties both inputs.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.mode != mode {
            self.mode = mode;
            self.text_query.clear();
            self.phone_query.clear();
            self.apply_focus();
        }
    }

    /// Choices of the outcome picker.
    pub fn set_outcomes(&mut self, outcomes: Vec<String>) {
        self.outcomes = outcomes;
    }

    fn field_index(field: FormField) -> usize {
        FORM_FIELDS.iter().position(|f| *f == field).unwrap_or(0)
    }

    fn focus_order(&self) -> Vec<SearchFocus> {
        let mut order = vec![SearchFocus::Mode, SearchFocus::Query];
        if !self.results.is_empty() {
            order.push(SearchFocus::Results);
        }
        if self.editor.is_loaded() {
            order.extend(FORM_FIELDS.map(SearchFocus::Field));
            if !self.email_list.is_empty() {
                order.push(SearchFocus::EmailChoice);
            }
            if !self.phone_list.is_empty() {
                order.push(SearchFocus::PhoneChoice);
            }
            if !self.editor.working().patients.is_empty() {
                order.push(SearchFocus::Patients);
            }
            if !self.practice_list.is_empty() {
                order.push(SearchFocus::Practice);
            }
            if !self.faq.is_empty() {
                order.push(SearchFocus::Faq);
            }
        }
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = order[next];
        self.apply_focus();
    }

    fn set_focus(&mut self, focus: SearchFocus) {
        self.focus = focus;
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        self.text_query
            .set_focused(focus == SearchFocus::Query && self.mode == SearchMode::Text);
        self.phone_query
            .set_focused(focus == SearchFocus::Query && self.mode == SearchMode::Phone);
        self.results_list.set_focused(focus == SearchFocus::Results);
        for (input, field) in self.form_inputs.iter_mut().zip(FORM_FIELDS) {
            input.set_focused(focus == SearchFocus::Field(field));
        }
        self.email_list.set_focused(focus == SearchFocus::EmailChoice);
        self.phone_list.set_focused(focus == SearchFocus::PhoneChoice);
        self.practice_list.set_focused(focus == SearchFocus::Practice);
        self.faq_list.set_focused(focus == SearchFocus::Faq);
    }

    fn sync_form(&mut self) {
        for (input, field) in self.form_inputs.iter_mut().zip(FORM_FIELDS) {
            input.set_value(self.editor.field(field));
        }
    }

    fn clear_client(&mut self) {
        self.editor.clear();
        self.sync_form();
        self.email_list.clear();
        self.phone_list.clear();
        self.practice_list.clear();
        self.selected_practice = None;
        self.faq.clear();
        self.faq_list.clear();
        self.faq_loading = false;
        self.patient_row = 0;
        self.patient_column = PatientColumn::Outcome;
    }

    /// Applies a finished search.
    pub fn apply_search(&mut self, outcome: SearchOutcome) -> SearchAction {
        self.loading = false;
        match outcome {
            SearchOutcome::NoResults => {
                self.results.clear();
                self.results_list.clear();
                self.clear_client();
                self.set_focus(SearchFocus::Query);
                SearchAction::Notify(NotificationLevel::Warn, NO_RESULTS_MESSAGE.to_string())
            }
            SearchOutcome::Single(record) => {
                self.results.clear();
                self.results_list.clear();
                self.apply_client(&record)
            }
            SearchOutcome::Multiple(results) => {
                self.clear_client();
                self.results_list
                    .set_items(results.iter().map(ClientSummary::label).collect());
                self.results = results;
                self.set_focus(SearchFocus::Results);
                SearchAction::None
            }
        }
    }

    /// Loads a client into the form. A single practice is selected at once.
    pub fn apply_client(&mut self, record: &ClientRecord) -> SearchAction {
        self.loading = false;
        self.clear_client();
        self.editor.load(record);
        self.sync_form();

        let name = record.display_name();
        let emails = self.editor.email_choices();
        if !emails.is_empty() {
            self.email_list.set_title(format!(
                "It looks like we have {} emails for {name}",
                emails.len()
            ));
            let items = emails.iter().map(|e| e.address.clone()).collect();
            self.email_list.set_items(items);
        }
        let phones = self.editor.phone_choices();
        if !phones.is_empty() {
            self.phone_list.set_title(format!(
                "It looks like we have {} phone numbers for {name}",
                phones.len()
            ));
            let items = phones.iter().map(|p| p.formatted()).collect();
            self.phone_list.set_items(items);
        }

        let practices: Vec<String> = self
            .editor
            .practices()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        self.practice_list.set_items(practices);
        self.set_focus(SearchFocus::Field(FormField::FirstName));

        match self.editor.practices() {
            [only] => {
                let id = only.odu_id.clone();
                self.begin_faq(id.clone());
                SearchAction::LoadFaq(id)
            }
            _ => SearchAction::None,
        }
    }

    fn begin_faq(&mut self, practice_id: String) {
        self.selected_practice = Some(practice_id);
        self.faq.clear();
        self.faq_list.clear();
        self.faq_loading = true;
    }

    /// Shows the FAQ if `practice_id` is still the selected practice.
    pub fn apply_faq(&mut self, practice_id: &str, entries: Vec<FaqEntry>) {
        if self.selected_practice.as_deref() != Some(practice_id) {
            debug!(practice_id, "Dropping FAQ for deselected practice");
            return;
        }
        self.faq_loading = false;
        self.faq_list
            .set_items(entries.iter().map(|e| e.question.clone()).collect());
        self.faq = entries;
    }

    /// Ends the FAQ spinner after a failed load.
    pub fn faq_failed(&mut self) {
        self.faq_loading = false;
    }

    /// Promotes the edits after the backend accepted them.
    pub fn apply_saved(&mut self) {
        self.loading = false;
        self.editor.commit();
    }

    fn faq_placeholder(&self) -> Option<&'static str> {
        if !self.editor.is_loaded() {
            Some(NO_CLIENT_PLACEHOLDER)
        } else if self.selected_practice.is_none() {
            Some(NO_PRACTICE_PLACEHOLDER)
        } else if self.faq_loading {
            Some("Loading...")
        } else if self.faq.is_empty() {
            Some(EMPTY_FAQ_PLACEHOLDER)
        } else {
            None
        }
    }

    fn submit_search(&mut self) -> SearchAction {
        let pending = PendingSearch {
            mode: self.mode,
            input: self.query().value().trim().to_string(),
        };
        if let Err(e) = build_search(pending.mode, &pending.input) {
            return SearchAction::Notify(NotificationLevel::Warn, e.to_string());
        }
        if self.guard_leave(Continuation::Search(pending.clone())) {
            return SearchAction::None;
        }
        self.loading = true;
        SearchAction::Search(pending)
    }

    fn save(&mut self, then: Option<Continuation>) -> SearchAction {
        if !self.editor.is_loaded() {
            return SearchAction::None;
        }
        match self.editor.build_update() {
            Ok(update) => {
                self.loading = true;
                SearchAction::Save {
                    client_id: self.editor.working().odu_id.clone(),
                    update,
                    then,
                }
            }
            Err(e) => SearchAction::Notify(NotificationLevel::Warn, e.to_string()),
        }
    }

    fn cancel_edits(&mut self) {
        self.editor.cancel();
        self.sync_form();
    }

    fn selected_patient_id(&self) -> Option<String> {
        self.editor
            .working()
            .patients
            .get(self.patient_row)
            .map(|p| p.odu_id.clone())
    }

    fn open_patient_popup(&mut self) {
        let Some(patient) = self.editor.working().patients.get(self.patient_row) else {
            return;
        };
        let patient_id = patient.odu_id.clone();
        let popup = match self.patient_column {
            PatientColumn::Outcome => {
                let mut list = SelectList::new(format!("Outcome for {}", patient.name)).filterable();
                let mut items = vec![NO_OUTCOME_LABEL.to_string()];
                items.extend(self.outcomes.iter().cloned());
                list.set_items(items);
                if let Some(current) = patient
                    .outcome
                    .as_ref()
                    .and_then(|o| self.outcomes.iter().position(|x| x == o))
                {
                    list.select(current + 1);
                }
                list.set_focused(true);
                Popup::Outcome { patient_id, list }
            }
            PatientColumn::OptOut => {
                let mut list = SelectList::new(format!("Opt out {}", patient.name));
                list.set_items(vec!["Yes".to_string(), "No".to_string()]);
                if patient.opt_out == Some(false) {
                    list.select(1);
                }
                list.set_focused(true);
                Popup::OptOut { patient_id, list }
            }
            PatientColumn::Comment => {
                let mut input = TextInput::new(format!(" Comment for {} ", patient.name));
                input.set_value(patient.comment.clone().unwrap_or_default());
                input.set_focused(true);
                Popup::Comment { patient_id, input }
            }
        };
        self.popup = Some(popup);
    }

    fn handle_popup_key(&mut self, popup: Popup, key: KeyEvent) -> SearchAction {
        match popup {
            Popup::Outcome {
                patient_id,
                mut list,
            } => match list.handle_key(key) {
                SelectEvent::Chosen(index) => {
                    let outcome = index
                        .checked_sub(1)
                        .and_then(|i| self.outcomes.get(i).cloned());
                    self.editor.set_outcome(&patient_id, outcome, Utc::now());
                }
                SelectEvent::Cancelled => {}
                SelectEvent::Moved | SelectEvent::Ignored => {
                    self.popup = Some(Popup::Outcome { patient_id, list });
                }
            },
            Popup::OptOut {
                patient_id,
                mut list,
            } => match list.handle_key(key) {
                SelectEvent::Chosen(index) => {
                    self.editor.set_opt_out(&patient_id, Some(index == 0));
                }
                SelectEvent::Cancelled => {}
                SelectEvent::Moved | SelectEvent::Ignored => {
                    self.popup = Some(Popup::OptOut { patient_id, list });
                }
            },
            Popup::Comment {
                patient_id,
                mut input,
            } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    if let Err(e) = self.editor.set_comment(&patient_id, input.value()) {
                        self.popup = Some(Popup::Comment { patient_id, input });
                        return SearchAction::Notify(NotificationLevel::Warn, e.to_string());
                    }
                }
                _ => {
                    input.handle_key(key);
                    self.popup = Some(Popup::Comment { patient_id, input });
                }
            },
            Popup::Unsaved { then, save } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => return self.resolve_unsaved(then, save),
                KeyCode::Char('y' | 'Y') => return self.resolve_unsaved(then, true),
                KeyCode::Char('n' | 'N') => return self.resolve_unsaved(then, false),
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Tab
                | KeyCode::BackTab => {
                    self.popup = Some(Popup::Unsaved { then, save: !save });
                }
                _ => {
                    self.popup = Some(Popup::Unsaved { then, save });
                }
            },
        }
        SearchAction::None
    }

    fn resolve_unsaved(&mut self, then: Continuation, save: bool) -> SearchAction {
        if save {
            return self.save(Some(then));
        }
        self.cancel_edits();
        match then {
            Continuation::Search(pending) => {
                self.loading = true;
                SearchAction::Search(pending)
            }
            other => SearchAction::Continue(other),
        }
    }

    fn handle_field_key(&mut self, field: FormField, key: KeyEvent) -> SearchAction {
        let index = Self::field_index(field);
        let input = &mut self.form_inputs[index];
        if !input.handle_key(key) {
            return SearchAction::None;
        }
        let value = input.value().to_string();
        match self.editor.set_field(field, &value) {
            Ok(()) => {
                let masked = self.editor.field(field).to_string();
                if masked != value {
                    self.form_inputs[index].set_value(masked);
                }
                SearchAction::None
            }
            Err(e) => {
                self.form_inputs[index].set_value(self.editor.field(field));
                SearchAction::Notify(NotificationLevel::Warn, e.to_string())
            }
        }
    }

    fn handle_patients_key(&mut self, key: KeyEvent) {
        let count = self.editor.working().patients.len();
        match key.code {
            KeyCode::Up => self.patient_row = self.patient_row.saturating_sub(1),
            KeyCode::Down if self.patient_row + 1 < count => self.patient_row += 1,
            KeyCode::Left => self.patient_column = self.patient_column.previous(),
            KeyCode::Right => self.patient_column = self.patient_column.next(),
            KeyCode::Enter => self.open_patient_popup(),
            KeyCode::Delete if self.patient_column == PatientColumn::Comment => {
                if let Some(id) = self.selected_patient_id() {
                    let _ = self.editor.set_comment(&id, "");
                }
            }
            _ => {}
        }
    }

    /// Handles a key press. Open popups take every key.
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchAction {
        if self.loading {
            return SearchAction::None;
        }
        if let Some(popup) = self.popup.take() {
            return self.handle_popup_key(popup, key);
        }
        if EventHandler::is_alt(&key, 's') {
            return self.save(None);
        }
        if EventHandler::is_alt(&key, 'c') {
            self.cancel_edits();
            return SearchAction::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return SearchAction::None;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return SearchAction::None;
            }
            _ => {}
        }

        match self.focus {
            SearchFocus::Mode => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.set_mode(self.mode.toggled());
                }
                KeyCode::Enter => self.set_focus(SearchFocus::Query),
                _ => {}
            },
            SearchFocus::Query => {
                if EventHandler::is_submit_event(&key) {
                    return self.submit_search();
                }
                self.query_mut().handle_key(key);
            }
            SearchFocus::Results => match self.results_list.handle_key(key) {
                SelectEvent::Chosen(index) => {
                    if let Some(summary) = self.results.get(index) {
                        self.loading = true;
                        return SearchAction::LoadClient(summary.odu_id.clone());
                    }
                }
                SelectEvent::Cancelled => self.set_focus(SearchFocus::Query),
                SelectEvent::Moved | SelectEvent::Ignored => {}
            },
            SearchFocus::Field(field) => return self.handle_field_key(field, key),
            SearchFocus::EmailChoice => {
                if let SelectEvent::Chosen(index) = self.email_list.handle_key(key) {
                    self.editor.choose_email(index);
                    self.sync_form();
                }
            }
            SearchFocus::PhoneChoice => {
                if let SelectEvent::Chosen(index) = self.phone_list.handle_key(key) {
                    self.editor.choose_phone(index);
                    self.sync_form();
                }
            }
            SearchFocus::Patients => self.handle_patients_key(key),
            SearchFocus::Practice => {
                if let SelectEvent::Chosen(index) = self.practice_list.handle_key(key)
                    && let Some(practice) = self.editor.practices().get(index)
                {
                    let id = practice.odu_id.clone();
                    self.begin_faq(id.clone());
                    return SearchAction::LoadFaq(id);
                }
            }
            SearchFocus::Faq => {
                self.faq_list.handle_key(key);
            }
        }
        SearchAction::None
    }

    /// Key hints for the focused control.
    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        let bar = StatusBar::new().hint("Tab", "Next");
        match self.focus {
            SearchFocus::Mode => bar.hint("Space", "Switch mode"),
            SearchFocus::Query => bar.hint("Enter", "Search"),
            SearchFocus::Patients => bar
                .hint("←/→", "Column")
                .hint("Enter", "Edit")
                .hint("Alt+S", "Save")
                .hint("Alt+C", "Cancel"),
            _ if self.editor.is_loaded() => bar.hint("Alt+S", "Save").hint("Alt+C", "Cancel"),
            _ => bar,
        }
    }

    fn render_search_bar(&self, area: Rect, buf: &mut Buffer) {
        let [mode_area, query_area] =
            Layout::horizontal([Constraint::Length(44), Constraint::Fill(1)]).areas(area);

        let mode_style = if self.focus == SearchFocus::Mode {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = Toggle::radio("Name, ID or email", self.mode == SearchMode::Text)
            .focused(self.focus == SearchFocus::Mode)
            .spans();
        spans.push(Span::raw("   "));
        spans.extend(
            Toggle::radio("Phone", self.mode == SearchMode::Phone)
                .focused(self.focus == SearchFocus::Mode)
                .spans(),
        );
        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(mode_style)
                    .title(" Search by "),
            )
            .render(mode_area, buf);

        self.query().render(query_area, buf);
    }

    fn render_client(&mut self, area: Rect, buf: &mut Buffer) {
        let title = if self.editor.is_loaded() {
            let dirty = if self.editor.is_dirty() { " *" } else { "" };
            format!(" Client: {}{dirty} ", self.editor.working().full_name)
        } else {
            " Client ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if !self.editor.is_loaded() {
            Paragraph::new("Select a client to edit contact details")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let [names, contact, choices] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(inner);
        let [first, last] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(names);
        let [phone, email] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(contact);
        for (input, rect) in self.form_inputs.iter().zip([first, last, phone, email]) {
            input.render(rect, buf);
        }

        match (self.email_list.is_empty(), self.phone_list.is_empty()) {
            (true, true) => {}
            (false, true) => (&mut self.email_list).render(choices, buf),
            (true, false) => (&mut self.phone_list).render(choices, buf),
            (false, false) => {
                let [top, bottom] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(choices);
                (&mut self.phone_list).render(top, buf);
                (&mut self.email_list).render(bottom, buf);
            }
        }
    }

    fn render_faq(&mut self, area: Rect, buf: &mut Buffer) {
        if let Some(placeholder) = self.faq_placeholder() {
            if self.practice_list.is_empty() {
                Paragraph::new(placeholder)
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::Gray))
                            .title(" Practice FAQ "),
                    )
                    .render(area, buf);
                return;
            }
            let [practice_area, rest] =
                Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(area);
            (&mut self.practice_list).render(practice_area, buf);
            Paragraph::new(placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Practice FAQ "))
                .render(rest, buf);
            return;
        }

        let [practice_area, questions_area, answer_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        (&mut self.practice_list).render(practice_area, buf);
        (&mut self.faq_list).render(questions_area, buf);

        let answer = self
            .faq_list
            .selected()
            .and_then(|i| self.faq.get(i))
            .map(|e| e.answer.as_str())
            .unwrap_or_default();
        Paragraph::new(answer)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray))
                    .title(" Answer "),
            )
            .render(answer_area, buf);
    }

    fn render_popup(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match popup {
            Popup::Outcome { list, .. } | Popup::OptOut { list, .. } => {
                let rect = centered_rect(40, 50, area);
                Clear.render(rect, buf);
                list.render(rect, buf);
            }
            Popup::Comment { input, .. } => {
                let rect = centered_fixed(70, 3, area);
                Clear.render(rect, buf);
                (&*input).render(rect, buf);
            }
            Popup::Unsaved { save, .. } => {
                let rect = centered_fixed(48, 6, area);
                Clear.render(rect, buf);
                let option = |label: &'static str, active: bool| {
                    let style = if active {
                        Style::default()
                            .bg(Color::Cyan)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!(" {label} "), style)).centered()
                };
                Paragraph::new(vec![
                    Line::from(""),
                    option("Yes, save changes", *save),
                    option("No, don't save changes", !*save),
                ])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(" Your changes have not been saved "),
                )
                .render(rect, buf);
            }
        }
    }
}

impl Default for SearchClientScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &mut SearchClientScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [search_area, middle, patients_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(14),
            Constraint::Percentage(40),
        ])
        .areas(area);
        self.render_search_bar(search_area, buf);

        let [results_area, client_area, faq_area] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .areas(middle);
        (&mut self.results_list).render(results_area, buf);
        self.render_client(client_area, buf);
        self.render_faq(faq_area, buf);

        PatientsTable::new(&self.editor.working().patients)
            .selected(self.patient_row, self.patient_column)
            .focused(self.focus == SearchFocus::Patients)
            .render(patients_area, buf);

        self.render_popup(area, buf);
        if self.loading {
            render_loading(area, buf, "Loading...");
        }
    }
}
