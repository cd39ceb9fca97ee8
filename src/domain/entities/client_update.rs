//! Partial update payload for `PATCH call-center/clients/{id}`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Email change. Which fields are present selects the backend action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct EmailPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odu_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_is_primary: Option<bool>,
}

impl EmailPatch {
    /// Marks an existing address as primary.
    #[must_use]
    pub fn promote(odu_id: impl Into<String>) -> Self {
        Self {
            address: None,
            odu_id: Some(odu_id.into()),
            set_is_primary: Some(true),
        }
    }

    /// Rewrites the address of an existing record and marks it primary.
    #[must_use]
    pub fn replace(address: impl Into<String>, odu_id: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            odu_id: Some(odu_id.into()),
            set_is_primary: Some(true),
        }
    }

    /// Adds a new address.
    #[must_use]
    pub fn create(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            odu_id: None,
            set_is_primary: None,
        }
    }
}

/// Phone change, mirroring [`EmailPatch`] with bare digits in `app_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct PhonePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odu_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_is_primary: Option<bool>,
}

impl PhonePatch {
    /// Marks an existing number as primary.
    #[must_use]
    pub fn promote(odu_id: impl Into<String>) -> Self {
        Self {
            app_number: None,
            odu_id: Some(odu_id.into()),
            set_is_primary: Some(true),
        }
    }

    /// Rewrites the digits of an existing record and marks it primary.
    #[must_use]
    pub fn replace(app_number: impl Into<String>, odu_id: impl Into<String>) -> Self {
        Self {
            app_number: Some(app_number.into()),
            odu_id: Some(odu_id.into()),
            set_is_primary: Some(true),
        }
    }

    /// Adds a new number.
    #[must_use]
    pub fn create(app_number: impl Into<String>) -> Self {
        Self {
            app_number: Some(app_number.into()),
            odu_id: None,
            set_is_primary: None,
        }
    }
}

/// Changed fields of one patient, keyed by the patient id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientPatch {
    /// Patient id.
    pub odu_id: String,
    /// Changed patient fields, flattened into the patch object.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of a client update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientUpdate {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Primary email change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailPatch>,
    /// Primary phone change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhonePatch>,
    /// Patient changes. Always sent, possibly empty.
    pub patients: Vec<PatientPatch>,
}
