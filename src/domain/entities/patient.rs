//! Patient (animal) records nested under a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest comment the backend accepts.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Reminder due for a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Due date as sent by the backend (`YYYY-MM-DD`).
    pub date_due: String,
    /// Reminder description.
    pub description: String,
    /// SMS delivery status for the reminder.
    #[serde(default)]
    pub sms_status: Option<String>,
}

/// Appointment date as formatted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Formatted date, absent when no appointment exists.
    #[serde(default)]
    pub date: Option<String>,
}

/// Patient sub-record. Only `outcome`, `opt_out` and `comment` are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Patient {
    pub odu_id: String,
    #[serde(default)]
    pub species_description: Option<String>,
    #[serde(default)]
    pub breed_description: Option<String>,
    #[serde(default)]
    pub gender_description: Option<String>,
    pub name: String,
    #[serde(default)]
    pub patient_age: Option<u32>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::domain::serde_utils::optional_flag::deserialize"
    )]
    pub opt_out: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub outcome_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub last_appointment: Option<Appointment>,
    #[serde(default)]
    pub next_appointments: Vec<Appointment>,
}

impl Patient {
    /// Creates a patient with only identity fields set.
    #[must_use]
    pub fn new(odu_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            odu_id: odu_id.into(),
            species_description: None,
            breed_description: None,
            gender_description: None,
            name: name.into(),
            patient_age: None,
            outcome: None,
            opt_out: None,
            comment: None,
            outcome_at: None,
            reminders: Vec::new(),
            last_appointment: None,
            next_appointments: Vec::new(),
        }
    }

    /// Human readable age.
    #[must_use]
    pub fn age_label(&self) -> Option<String> {
        self.patient_age.map(|age| match age {
            0 => "< 1 year old".to_string(),
            1 => "1 year old".to_string(),
            n => format!("{n} years old"),
        })
    }

    /// Reminders as `description - due date` lines.
    #[must_use]
    pub fn reminder_lines(&self) -> Vec<String> {
        self.reminders
            .iter()
            .map(|r| format!("{} - due {}", r.description, r.date_due))
            .collect()
    }

    /// Last appointment date or placeholder.
    #[must_use]
    pub fn last_appointment_label(&self) -> String {
        self.last_appointment
            .as_ref()
            .and_then(|a| a.date.clone())
            .unwrap_or_else(|| "Not scheduled".to_string())
    }

    /// Next appointment dates, or a single placeholder.
    #[must_use]
    pub fn next_appointment_lines(&self) -> Vec<String> {
        let dates: Vec<String> = self
            .next_appointments
            .iter()
            .filter_map(|a| a.date.clone())
            .collect();
        if dates.is_empty() {
            vec!["Not scheduled".to_string()]
        } else {
            dates
        }
    }

    /// Opt-out selection label.
    #[must_use]
    pub const fn opt_out_label(&self) -> &'static str {
        match self.opt_out {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "-",
        }
    }
}
