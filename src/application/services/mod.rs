//! Application services.

mod call_center_api;
mod client_editor;
mod contacted_filter;
mod notification_manager;
mod patient_diff;
mod persisted_slice;
mod session_guard;

pub use call_center_api::CallCenterApi;
pub use client_editor::{ClientEditor, ClientForm, FormField, MAX_FIELD_LENGTH};
pub use contacted_filter::{
    ContactedFilter, DEFAULT_PAGE_SIZE, DateRange, FilterState, FollowStatus, PAGE_SIZES,
};
pub use notification_manager::NotificationManager;
pub use patient_diff::diff_patients;
pub use persisted_slice::PersistedSlice;
pub use session_guard::{GuardOutcome, SessionGuard};
