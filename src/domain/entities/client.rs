//! Client entities returned by search and detail endpoints.

use serde::{Deserialize, Serialize};

use super::patient::Patient;
use crate::domain::phone;

/// Email address attached to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Email {
    pub odu_id: String,
    pub address: String,
}

/// Phone number attached to a client, stored as bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Phone {
    pub odu_id: String,
    pub app_number: String,
}

impl Phone {
    /// Returns the `(xxx) xxx-xxxx` form, or the raw number when it is not
    /// a ten digit number.
    #[must_use]
    pub fn formatted(&self) -> String {
        phone::format(&self.app_number).unwrap_or_else(|| self.app_number.clone())
    }
}

/// Practice the client belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PracticeRef {
    pub odu_id: String,
    pub name: String,
}

/// Row of the client search result list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)]
pub struct ClientSummary {
    pub odu_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub full_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl ClientSummary {
    /// Label shown in the disambiguation list.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = format!("[{}] - {}", self.odu_id, self.full_name);
        if let Some(email) = self.email_address.as_deref().filter(|e| !e.is_empty()) {
            label.push_str(" - ");
            label.push_str(email);
        }
        if let Some(formatted) = self.phone_number.as_deref().and_then(phone::format) {
            label.push_str(" - ");
            label.push_str(&formatted);
        }
        label
    }
}

/// Full client record loaded on selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientRecord {
    /// Client id.
    pub odu_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Display name computed by the backend.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Addresses, primary first.
    #[serde(default)]
    pub emails: Vec<Email>,
    /// Numbers, primary first.
    #[serde(default)]
    pub phones: Vec<Phone>,
    /// Practices the client is registered with. `null` reads as empty.
    #[serde(default, deserialize_with = "crate::domain::serde_utils::null_as_default")]
    pub practices: Vec<PracticeRef>,
    /// Patients owned by the client.
    #[serde(default)]
    pub patients: Vec<Patient>,
}

impl ClientRecord {
    /// Full name, falling back to first and last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{} {}", self.first_name, self.last_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(email: Option<&str>, phone: Option<&str>) -> ClientSummary {
        ClientSummary {
            odu_id: "C42".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            full_name: "Ann Smith".to_string(),
            email_address: email.map(ToString::to_string),
            phone_number: phone.map(ToString::to_string),
        }
    }

    #[test]
    fn test_summary_label_full() {
        let label = summary(Some("ann@example.com"), Some("5551234567")).label();
        assert_eq!(label, "[C42] - Ann Smith - ann@example.com - (555) 123-4567");
    }

    #[test]
    fn test_summary_label_without_contacts() {
        assert_eq!(summary(None, None).label(), "[C42] - Ann Smith");
    }

    #[test]
    fn test_record_tolerates_null_practices() {
        let record: ClientRecord = serde_json::from_str(
            r#"{"odu_id": "C1", "first_name": "A", "last_name": "B", "practices": null}"#,
        )
        .unwrap();

        assert!(record.practices.is_empty());
        assert_eq!(record.display_name(), "A B");
    }
}
