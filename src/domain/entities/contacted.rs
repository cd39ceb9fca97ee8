//! Outreach log ("contacted") entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::{Email, Phone};
use crate::domain::phone;

/// Patient name reference inside a contacted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PatientName {
    pub odu_id: String,
    pub name: String,
}

/// One outbound SMS contact and its follow-up status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)]
pub struct ContactedEntry {
    pub client_id: String,
    #[serde(default, deserialize_with = "crate::domain::serde_utils::null_as_default")]
    pub emails: Vec<Email>,
    #[serde(default, deserialize_with = "crate::domain::serde_utils::null_as_default")]
    pub phones: Vec<Phone>,
    #[serde(default, deserialize_with = "crate::domain::serde_utils::null_as_default")]
    pub patients: Vec<PatientName>,
    pub full_name: String,
    pub is_followed: bool,
    #[serde(default)]
    pub practice_id: Option<String>,
    #[serde(default)]
    pub practice_name: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    pub sms_history_id: Uuid,
}

impl ContactedEntry {
    /// First email address, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.address.as_str())
    }

    /// First phone number, formatted when possible.
    #[must_use]
    pub fn primary_phone(&self) -> Option<String> {
        self.phones
            .first()
            .and_then(|p| phone::format(&p.app_number))
    }

    /// Comma separated pet names.
    #[must_use]
    pub fn pet_names(&self) -> String {
        self.patients
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// SMS date as `YYYY-MM-DD`, or `-`.
    #[must_use]
    pub fn sent_date_label(&self) -> String {
        self.sent_at.map_or_else(
            || "-".to_string(),
            |at| at.format("%Y-%m-%d").to_string(),
        )
    }
}

/// One page of the contacted log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactedPage {
    /// Total number of entries matching the query.
    pub count: u64,
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Entries of this page.
    #[serde(default)]
    pub results: Vec<ContactedEntry>,
}

/// Result of toggling the follow-up flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FollowSwitch {
    /// Follow-up flag after the toggle.
    pub is_followed: bool,
    /// SMS history id the toggle applied to.
    pub uuid: Uuid,
}
