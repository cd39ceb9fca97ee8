//! Filter state of the contacted log and the query it composes.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::persisted_slice::PersistedSlice;
use crate::domain::entities::PracticeOption;
use crate::domain::ports::{ContactedQuery, SessionStorePort};

/// Rows per page offered by the pager.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];
/// Page size used until the operator picks another.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Name filters this short are not sent.
const MIN_NAME_FILTER_LENGTH: usize = 3;

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Follow-up status options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum FollowStatus {
    #[serde(rename = "Followed Up")]
    FollowedUp,
    #[serde(rename = "Not followed Up")]
    NotFollowedUp,
}

impl FollowStatus {
    /// Both statuses in display order.
    pub const ALL: [Self; 2] = [Self::FollowedUp, Self::NotFollowedUp];

    /// Text shown in the status picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FollowedUp => "Followed Up",
            Self::NotFollowedUp => "Not followed Up",
        }
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive range of SMS send dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    /// Last day.
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
}

impl DateRange {
    /// Orders the bounds.
    #[must_use]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// `DD Mon YYYY - DD Mon YYYY`
    #[must_use]
    pub fn display_text(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(DISPLAY_DATE_FORMAT),
            self.end.format(DISPLAY_DATE_FORMAT)
        )
    }

    /// Parses the display form, or two ISO dates joined by ` - `.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (a, b) = text.split_once(" - ")?;
        let parse_one = |s: &str| {
            let s = s.trim();
            NaiveDate::parse_from_str(s, DISPLAY_DATE_FORMAT)
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .ok()
        };
        Some(Self::new(parse_one(a)?, parse_one(b)?))
    }
}

/// In-memory filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Client name filter as typed.
    pub name: String,
    /// Selected follow-up statuses.
    pub statuses: Vec<FollowStatus>,
    /// Parsed date range, if the field holds a valid one.
    pub date_range: Option<DateRange>,
    /// Text of the date range field as typed.
    pub range_text: String,
    /// Selected groups and practices, groups before their members.
    pub practices: Vec<PracticeOption>,
    /// Zero based page index.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            name: String::new(),
            statuses: vec![FollowStatus::NotFollowedUp],
            date_range: None,
            range_text: String::new(),
            practices: Vec::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// `Some` only when exactly one status is selected.
    #[must_use]
    pub fn followed(&self) -> Option<bool> {
        let followed = self.statuses.contains(&FollowStatus::FollowedUp);
        let not_followed = self.statuses.contains(&FollowStatus::NotFollowedUp);
        match (followed, not_followed) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }

    /// Union of selected option ids, first occurrence order.
    #[must_use]
    pub fn practice_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.practices
            .iter()
            .flat_map(|option| option.ids.iter())
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Query for the current page.
    #[must_use]
    pub fn query(&self) -> ContactedQuery {
        ContactedQuery {
            limit: self.page_size,
            offset: self.page.saturating_mul(self.page_size),
            name: (self.name.chars().count() >= MIN_NAME_FILTER_LENGTH).then(|| self.name.clone()),
            followed: self.followed(),
            sent_after: self.date_range.map(|r| r.start),
            sent_before: self.date_range.map(|r| r.end),
            practice: self.practice_ids(),
        }
    }

    /// Whether an option with the same label and kind is selected.
    #[must_use]
    pub fn is_selected(&self, option: &PracticeOption) -> bool {
        self.practices.iter().any(|p| p.same_as(option))
    }

    /// Selects a group together with its member practices, or appends a practice.
    pub fn select_practice(&mut self, option: &PracticeOption, catalog: &[PracticeOption]) {
        if self.is_selected(option) {
            return;
        }
        if option.is_group() {
            let members: Vec<PracticeOption> = catalog
                .iter()
                .filter(|candidate| {
                    candidate
                        .practice_id()
                        .is_some_and(|id| option.ids.iter().any(|member| member == id))
                })
                .filter(|candidate| !self.is_selected(candidate))
                .cloned()
                .collect();
            let mut selection = Vec::with_capacity(1 + members.len() + self.practices.len());
            selection.push(option.clone());
            selection.extend(members);
            selection.append(&mut self.practices);
            self.practices = selection;
        } else {
            self.practices.push(option.clone());
        }
    }

    /// Removing a group drops its members; removing a practice drops the groups holding it.
    pub fn remove_practice(&mut self, option: &PracticeOption) {
        if option.is_group() {
            self.practices.retain(|p| {
                !p.same_as(option)
                    && p.practice_id()
                        .is_none_or(|id| !option.ids.iter().any(|member| member == id))
            });
        } else if let Some(removed_id) = option.practice_id() {
            let removed_id = removed_id.to_string();
            self.practices.retain(|p| {
                if p.is_group() {
                    !p.ids.contains(&removed_id)
                } else {
                    !p.same_as(option)
                }
            });
        }
    }

    /// Adds or removes a status.
    pub fn toggle_status(&mut self, status: FollowStatus) {
        if let Some(index) = self.statuses.iter().position(|s| *s == status) {
            self.statuses.remove(index);
        } else {
            self.statuses.push(status);
        }
    }
}

/// Filter state mirrored into the session-scoped store.
pub struct ContactedFilter {
    state: FilterState,
    store: Arc<dyn SessionStorePort>,
}

const NAME: PersistedSlice<String> = PersistedSlice::new("nameFilter");
const STATUS: PersistedSlice<Vec<FollowStatus>> = PersistedSlice::new("status");
const DATE_RANGE: PersistedSlice<DateRange> = PersistedSlice::new("dateRange");
const RANGE_TEXT: PersistedSlice<String> = PersistedSlice::new("rangeFieldValue");
const PRACTICES: PersistedSlice<Vec<PracticeOption>> = PersistedSlice::new("practiceFilter");

impl ContactedFilter {
    /// Restores state from the store, defaulting missing values.
    #[must_use]
    pub fn restore(store: Arc<dyn SessionStorePort>) -> Self {
        let defaults = FilterState::default();
        let state = FilterState {
            name: NAME.load(store.as_ref()).unwrap_or(defaults.name),
            statuses: STATUS.load(store.as_ref()).unwrap_or(defaults.statuses),
            date_range: DATE_RANGE.load(store.as_ref()),
            range_text: RANGE_TEXT.load(store.as_ref()).unwrap_or(defaults.range_text),
            practices: PRACTICES.load(store.as_ref()).unwrap_or(defaults.practices),
            page: 0,
            page_size: defaults.page_size,
        };
        debug!(?state, "Contacted filter restored");
        Self { state, store }
    }

    /// Current filter values.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// Edits the name without persisting; see [`Self::commit_name`].
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.name = name.into();
    }

    /// Persists the name, as when leaving the field.
    pub fn commit_name(&self) {
        NAME.save(self.store.as_ref(), &self.state.name);
    }

    /// Adds or removes a status and persists the selection.
    pub fn toggle_status(&mut self, status: FollowStatus) {
        self.state.toggle_status(status);
        STATUS.save(self.store.as_ref(), &self.state.statuses);
    }

    /// Sets or clears the date range together with the field text.
    pub fn set_date_range(&mut self, range: Option<DateRange>, text: impl Into<String>) {
        self.state.date_range = range;
        self.state.range_text = text.into();
        match &self.state.date_range {
            Some(range) => DATE_RANGE.save(self.store.as_ref(), range),
            None => DATE_RANGE.clear(self.store.as_ref()),
        }
        RANGE_TEXT.save(self.store.as_ref(), &self.state.range_text);
    }

    /// Selects a practice or group and persists the selection.
    pub fn select_practice(&mut self, option: &PracticeOption, catalog: &[PracticeOption]) {
        self.state.select_practice(option, catalog);
        PRACTICES.save(self.store.as_ref(), &self.state.practices);
    }

    /// Removes a practice or group and persists the selection.
    pub fn remove_practice(&mut self, option: &PracticeOption) {
        self.state.remove_practice(option);
        PRACTICES.save(self.store.as_ref(), &self.state.practices);
    }

    /// Selects or removes depending on the current selection.
    pub fn toggle_practice(&mut self, option: &PracticeOption, catalog: &[PracticeOption]) {
        if self.state.is_selected(option) {
            self.remove_practice(option);
        } else {
            self.select_practice(option, catalog);
        }
    }

    /// Drops every practice selection.
    pub fn clear_practices(&mut self) {
        self.state.practices.clear();
        PRACTICES.clear(self.store.as_ref());
    }

    /// Clears every filter and the store. Status becomes `Followed Up`.
    pub fn reset(&mut self) {
        self.state = FilterState {
            statuses: vec![FollowStatus::FollowedUp],
            page_size: self.state.page_size,
            ..FilterState::default()
        };
        for key in [
            STATUS.key(),
            NAME.key(),
            RANGE_TEXT.key(),
            DATE_RANGE.key(),
            PRACTICES.key(),
        ] {
            self.store.remove(key);
        }
    }

    /// Query for a new search, starting from the first page.
    pub fn search(&mut self) -> ContactedQuery {
        self.state.page = 0;
        self.state.query()
    }

    /// Query for `page` with the current filters.
    pub fn go_to_page(&mut self, page: u32) -> ContactedQuery {
        self.state.page = page;
        self.state.query()
    }

    /// Changes the page size and returns to the first page. Unknown sizes are ignored.
    pub fn set_page_size(&mut self, size: u32) -> ContactedQuery {
        if PAGE_SIZES.contains(&size) {
            self.state.page_size = size;
        }
        self.state.page = 0;
        self.state.query()
    }

    /// Number of pages for `count` rows.
    #[must_use]
    pub fn page_count(&self, count: u64) -> u32 {
        let size = u64::from(self.state.page_size.max(1));
        u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX)
    }
}
