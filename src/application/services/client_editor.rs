//! Working/original copies of the loaded client and the update they imply.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::patient_diff::diff_patients;
use crate::domain::entities::{
    ClientRecord, ClientUpdate, Email, EmailPatch, MAX_COMMENT_LENGTH, Patient, Phone, PhonePatch,
    PracticeRef,
};
use crate::domain::errors::ValidationError;
use crate::domain::phone;

/// Text fields must stay below this many characters.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Editable fields of the client form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FormField {
    FirstName,
    LastName,
    Phone,
    Email,
}

impl FormField {
    /// Label used in validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

/// Values shown in the client form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    /// Client id.
    pub odu_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Display name, not editable.
    pub full_name: String,
    /// Primary address, empty when the client has several or none.
    pub email_address: String,
    /// Id of the record behind `email_address`.
    pub email_id: Option<String>,
    /// Formatted as `(xxx) xxx-xxxx` once complete.
    pub phone_number: String,
    /// Id of the record behind `phone_number`.
    pub phone_id: Option<String>,
    /// Practice names joined for display.
    pub practice_name: String,
    /// Patients with their pending outcome edits.
    pub patients: Vec<Patient>,
}

impl ClientForm {
    /// Pre-fills email and phone only when the client has exactly one.
    #[must_use]
    pub fn from_record(record: &ClientRecord) -> Self {
        let single_email = match record.emails.as_slice() {
            [email] => Some(email),
            _ => None,
        };
        let single_phone = match record.phones.as_slice() {
            [phone] => Some(phone),
            _ => None,
        };

        Self {
            odu_id: record.odu_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            full_name: record.display_name(),
            email_address: single_email.map(|e| e.address.clone()).unwrap_or_default(),
            email_id: single_email.map(|e| e.odu_id.clone()),
            phone_number: single_phone.map(Phone::formatted).unwrap_or_default(),
            phone_id: single_phone.map(|p| p.odu_id.clone()),
            practice_name: record
                .practices
                .first()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            patients: record.patients.clone(),
        }
    }
}

/// Holds the loaded client. The original is only replaced by [`ClientEditor::commit`].
#[derive(Debug, Clone, Default)]
pub struct ClientEditor {
    original: ClientForm,
    working: ClientForm,
    emails: Vec<Email>,
    phones: Vec<Phone>,
    practices: Vec<PracticeRef>,
}

impl ClientEditor {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both copies with the given record.
    pub fn load(&mut self, record: &ClientRecord) {
        let form = ClientForm::from_record(record);
        debug!(client_id = %form.odu_id, patients = form.patients.len(), "Client loaded into editor");
        self.original = form.clone();
        self.working = form;
        self.emails = record.emails.clone();
        self.phones = record.phones.clone();
        self.practices = record.practices.clone();
    }

    /// Forgets the loaded client.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a client has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.original.odu_id.is_empty()
    }

    /// True when the working copy differs from the original.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    /// Copy being edited.
    #[must_use]
    pub const fn working(&self) -> &ClientForm {
        &self.working
    }

    /// Copy as last loaded or saved.
    #[must_use]
    pub const fn original(&self) -> &ClientForm {
        &self.original
    }

    /// Practices of the loaded client.
    #[must_use]
    pub fn practices(&self) -> &[PracticeRef] {
        &self.practices
    }

    /// Emails offered in the chooser; empty unless there is more than one.
    #[must_use]
    pub fn email_choices(&self) -> &[Email] {
        if self.emails.len() > 1 { &self.emails[..] } else { &[] }
    }

    /// Phones offered in the chooser; empty unless there is more than one.
    #[must_use]
    pub fn phone_choices(&self) -> &[Phone] {
        if self.phones.len() > 1 { &self.phones[..] } else { &[] }
    }

    /// Current text of a form field.
    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.working.first_name,
            FormField::LastName => &self.working.last_name,
            FormField::Phone => &self.working.phone_number,
            FormField::Email => &self.working.email_address,
        }
    }

    /// Sets a form field. Phone input is masked as it is typed.
    ///
    /// # Errors
    /// Returns error if the value reaches [`MAX_FIELD_LENGTH`]; the field is unchanged.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), ValidationError> {
        if value.chars().count() >= MAX_FIELD_LENGTH {
            return Err(ValidationError::TooLong {
                field: field.label(),
                max: MAX_FIELD_LENGTH,
            });
        }
        let value = value.to_string();
        match field {
            FormField::FirstName => self.working.first_name = value,
            FormField::LastName => self.working.last_name = value,
            FormField::Email => self.working.email_address = value,
            FormField::Phone => self.working.phone_number = phone::mask_partial(&value),
        }
        Ok(())
    }

    /// Picks one of several emails.
    pub fn choose_email(&mut self, index: usize) {
        if let Some(email) = self.email_choices().get(index).cloned() {
            self.working.email_address = email.address;
            self.working.email_id = Some(email.odu_id);
        }
    }

    /// Picks one of several phones.
    pub fn choose_phone(&mut self, index: usize) {
        if let Some(phone) = self.phone_choices().get(index).cloned() {
            self.working.phone_number = phone.formatted();
            self.working.phone_id = Some(phone.odu_id);
        }
    }

    fn patient_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        self.working
            .patients
            .iter_mut()
            .find(|p| p.odu_id == patient_id)
    }

    /// Sets the outcome and stamps `outcome_at`.
    pub fn set_outcome(&mut self, patient_id: &str, outcome: Option<String>, now: DateTime<Utc>) {
        if let Some(patient) = self.patient_mut(patient_id) {
            patient.outcome = outcome;
            patient.outcome_at = Some(now);
        }
    }

    /// Sets the opt-out choice. `None` clears it.
    pub fn set_opt_out(&mut self, patient_id: &str, opt_out: Option<bool>) {
        if let Some(patient) = self.patient_mut(patient_id) {
            patient.opt_out = opt_out;
        }
    }

    /// # Errors
    /// Returns error if the comment exceeds [`MAX_COMMENT_LENGTH`]; the patient is unchanged.
    pub fn set_comment(&mut self, patient_id: &str, comment: &str) -> Result<(), ValidationError> {
        if comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ValidationError::TooLong {
                field: "Comment",
                max: MAX_COMMENT_LENGTH,
            });
        }
        if let Some(patient) = self.patient_mut(patient_id) {
            patient.comment = Some(comment.to_string());
        }
        Ok(())
    }

    /// Restores the working copy from the original.
    pub fn cancel(&mut self) {
        self.working = self.original.clone();
    }

    /// Promotes the working copy after a successful save.
    pub fn commit(&mut self) {
        self.original = self.working.clone();
    }

    fn check_required(&self) -> Result<(), ValidationError> {
        let w = &self.working;
        let mut missing = Vec::new();
        if w.first_name.is_empty() {
            missing.push(FormField::FirstName.label());
        }
        if w.last_name.is_empty() {
            missing.push(FormField::LastName.label());
        }
        if !phone::is_complete(&w.phone_number) {
            missing.push(FormField::Phone.label());
        }
        if w.email_address.is_empty() && !self.original.email_address.is_empty() {
            missing.push(FormField::Email.label());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::RequiredFields(missing.join(", ")))
        }
    }

    fn email_patch(&self) -> Option<EmailPatch> {
        let w = &self.working;
        if w.email_address == self.original.email_address || w.email_address.is_empty() {
            return None;
        }
        Some(match &w.email_id {
            Some(id) if self.emails.iter().any(|e| e.address == w.email_address) => {
                EmailPatch::promote(id.clone())
            }
            Some(id) => EmailPatch::replace(w.email_address.clone(), id.clone()),
            None => EmailPatch::create(w.email_address.clone()),
        })
    }

    fn phone_patch(&self) -> Option<PhonePatch> {
        let w = &self.working;
        if w.phone_number == self.original.phone_number {
            return None;
        }
        let digits = phone::strip(&w.phone_number);
        Some(match &w.phone_id {
            Some(id) if self.phones.iter().any(|p| p.app_number == digits) => {
                PhonePatch::promote(id.clone())
            }
            Some(id) => PhonePatch::replace(digits, id.clone()),
            None => PhonePatch::create(digits),
        })
    }

    /// Validates the form and builds the minimal update.
    ///
    /// # Errors
    /// Returns [`ValidationError::RequiredFields`] naming the fields to fill in.
    pub fn build_update(&self) -> Result<ClientUpdate, ValidationError> {
        self.check_required()?;
        let w = &self.working;
        let o = &self.original;

        Ok(ClientUpdate {
            first_name: (w.first_name != o.first_name).then(|| w.first_name.clone()),
            last_name: (w.last_name != o.last_name).then(|| w.last_name.clone()),
            email: self.email_patch(),
            phone: self.phone_patch(),
            patients: diff_patients(&o.patients, &w.patients),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn email(id: &str, address: &str) -> Email {
        Email {
            odu_id: id.into(),
            address: address.into(),
        }
    }

    fn phone_rec(id: &str, number: &str) -> Phone {
        Phone {
            odu_id: id.into(),
            app_number: number.into(),
        }
    }

    fn record(emails: Vec<Email>, phones: Vec<Phone>) -> ClientRecord {
        ClientRecord {
            odu_id: "C1".into(),
            first_name: "Ann".into(),
            last_name: "Smith".into(),
            full_name: Some("Ann Smith".into()),
            emails,
            phones,
            practices: vec![PracticeRef {
                odu_id: "PR1".into(),
                name: "North Clinic".into(),
            }],
            patients: vec![Patient::new("A1", "Rex")],
        }
    }

    fn loaded(emails: Vec<Email>, phones: Vec<Phone>) -> ClientEditor {
        let mut editor = ClientEditor::new();
        editor.load(&record(emails, phones));
        editor
    }

    #[test]
    fn test_single_contacts_prefill() {
        let editor = loaded(
            vec![email("E1", "ann@example.com")],
            vec![phone_rec("P1", "5551234567")],
        );
        let form = editor.working();

        assert_eq!(form.email_address, "ann@example.com");
        assert_eq!(form.email_id.as_deref(), Some("E1"));
        assert_eq!(form.phone_number, "(555) 123-4567");
        assert_eq!(form.practice_name, "North Clinic");
        assert!(editor.email_choices().is_empty());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_multiple_contacts_leave_fields_empty() {
        let editor = loaded(
            vec![email("E1", "a@x.com"), email("E2", "b@x.com")],
            vec![phone_rec("P1", "5551234567"), phone_rec("P2", "5559876543")],
        );

        assert!(editor.working().email_address.is_empty());
        assert!(editor.working().phone_id.is_none());
        assert_eq!(editor.email_choices().len(), 2);
        assert_eq!(editor.phone_choices().len(), 2);
    }

    #[test]
    fn test_unchanged_form_sends_only_patients() {
        let editor = loaded(vec![], vec![phone_rec("P1", "5551234567")]);

        let update = editor.build_update().unwrap();

        assert_eq!(serde_json::to_value(update).unwrap(), json!({"patients": []}));
    }

    #[test]
    fn test_chosen_known_email_is_promoted() {
        let mut editor = loaded(
            vec![email("E1", "a@x.com"), email("E2", "b@x.com")],
            vec![phone_rec("P1", "5551234567")],
        );
        editor.choose_email(1);

        let update = editor.build_update().unwrap();

        assert_eq!(update.email, Some(EmailPatch::promote("E2")));
    }

    #[test]
    fn test_edited_email_with_id_is_replaced() {
        let mut editor = loaded(
            vec![email("E1", "a@x.com")],
            vec![phone_rec("P1", "5551234567")],
        );
        editor.set_field(FormField::Email, "new@x.com").unwrap();

        let update = editor.build_update().unwrap();

        assert_eq!(update.email, Some(EmailPatch::replace("new@x.com", "E1")));
    }

    #[test]
    fn test_new_email_without_id_is_created() {
        let mut editor = loaded(vec![], vec![phone_rec("P1", "5551234567")]);
        editor.set_field(FormField::Email, "new@x.com").unwrap();

        let update = editor.build_update().unwrap();

        assert_eq!(update.email, Some(EmailPatch::create("new@x.com")));
    }

    #[test]
    fn test_new_phone_is_sent_as_digits() {
        let mut editor = loaded(vec![], vec![]);
        editor.set_field(FormField::Phone, "5550001111").unwrap();

        let update = editor.build_update().unwrap();

        assert_eq!(editor.working().phone_number, "(555) 000-1111");
        assert_eq!(update.phone, Some(PhonePatch::create("5550001111")));
    }

    #[test]
    fn test_chosen_known_phone_is_promoted() {
        let mut editor = loaded(
            vec![],
            vec![phone_rec("P1", "5551234567"), phone_rec("P2", "5559876543")],
        );
        editor.choose_phone(0);

        let update = editor.build_update().unwrap();

        assert_eq!(update.phone, Some(PhonePatch::promote("P1")));
    }

    #[test]
    fn test_required_fields_are_reported() {
        let mut editor = loaded(
            vec![email("E1", "a@x.com")],
            vec![phone_rec("P1", "5551234567")],
        );
        editor.set_field(FormField::FirstName, "").unwrap();
        editor.set_field(FormField::Email, "").unwrap();
        editor.set_field(FormField::Phone, "555").unwrap();

        let err = editor.build_update().unwrap_err();

        assert_eq!(err.to_string(), "Please fill in First Name, Phone, Email");
    }

    #[test]
    fn test_empty_email_allowed_when_original_had_none() {
        let editor = loaded(vec![], vec![phone_rec("P1", "5551234567")]);
        assert!(editor.build_update().is_ok());
    }

    #[test]
    fn test_overlong_field_rejected() {
        let mut editor = loaded(vec![], vec![]);
        let long = "x".repeat(MAX_FIELD_LENGTH);

        assert!(editor.set_field(FormField::LastName, &long).is_err());
        assert_eq!(editor.working().last_name, "Smith");
    }

    #[test]
    fn test_comment_limit() {
        let mut editor = loaded(vec![], vec![]);

        assert!(editor.set_comment("A1", &"c".repeat(MAX_COMMENT_LENGTH)).is_ok());
        assert!(editor.set_comment("A1", &"c".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_cancel_and_commit() {
        let mut editor = loaded(vec![], vec![phone_rec("P1", "5551234567")]);
        editor.set_outcome("A1", Some("Booked".into()), Utc::now());
        assert!(editor.is_dirty());

        editor.cancel();
        assert!(!editor.is_dirty());
        assert_eq!(editor.working().patients[0].outcome, None);

        editor.set_opt_out("A1", Some(true));
        let update = editor.build_update().unwrap();
        assert_eq!(update.patients.len(), 1);

        editor.commit();
        assert!(!editor.is_dirty());
        assert_eq!(editor.original().patients[0].opt_out, Some(true));
        assert!(editor.build_update().unwrap().patients.is_empty());
    }
}
