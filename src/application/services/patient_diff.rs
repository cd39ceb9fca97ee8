//! Minimal patch between original and edited patient lists.

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::entities::{Patient, PatientPatch};

fn to_map(patient: &Patient) -> Option<Map<String, Value>> {
    match serde_json::to_value(patient) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            warn!(patient = %patient.odu_id, error = %e, "Could not serialize patient");
            None
        }
    }
}

/// Empty strings are sent as `null`.
fn normalize(value: Value) -> Value {
    match value {
        Value::String(s) if s.is_empty() => Value::Null,
        other => other,
    }
}

/// Builds one patch per edited record that differs from its original.
///
/// Records are matched by `odu_id`; edited records without an original are
/// skipped. Neither list is modified.
#[must_use]
pub fn diff_patients(original: &[Patient], edited: &[Patient]) -> Vec<PatientPatch> {
    edited
        .iter()
        .filter_map(|updated| {
            let source = original.iter().find(|p| p.odu_id == updated.odu_id)?;
            if source == updated {
                return None;
            }
            let before = to_map(source)?;
            let after = to_map(updated)?;

            let fields: Map<String, Value> = after
                .into_iter()
                .filter(|(key, value)| key != "odu_id" && before.get(key) != Some(value))
                .map(|(key, value)| (key, normalize(value)))
                .collect();

            (!fields.is_empty()).then(|| PatientPatch {
                odu_id: updated.odu_id.clone(),
                fields,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn patients() -> Vec<Patient> {
        let mut rex = Patient::new("A1", "Rex");
        rex.outcome = Some("Booked".into());
        rex.comment = Some("call after 5".into());
        let tom = Patient::new("A2", "Tom");
        vec![rex, tom]
    }

    #[test]
    fn test_identical_lists_produce_no_patch() {
        let list = patients();
        assert!(diff_patients(&list, &list.clone()).is_empty());
    }

    #[test]
    fn test_only_changed_record_is_reported() {
        let original = patients();
        let mut edited = original.clone();
        edited[1].opt_out = Some(true);

        let patches = diff_patients(&original, &edited);

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].odu_id, "A2");
        assert_eq!(
            serde_json::to_value(&patches[0]).unwrap(),
            json!({"odu_id": "A2", "opt_out": true})
        );
    }

    #[test]
    fn test_cleared_text_becomes_null() {
        let original = patients();
        let mut edited = original.clone();
        edited[0].comment = Some(String::new());

        let patches = diff_patients(&original, &edited);

        assert_eq!(patches[0].fields.get("comment"), Some(&Value::Null));
    }

    #[test]
    fn test_outcome_change_carries_timestamp() {
        let original = patients();
        let mut edited = original.clone();
        edited[0].outcome = Some("Declined".into());
        edited[0].outcome_at = Some(Utc::now());

        let patches = diff_patients(&original, &edited);

        let fields = &patches[0].fields;
        assert_eq!(fields.get("outcome"), Some(&json!("Declined")));
        assert!(fields.get("outcome_at").is_some_and(Value::is_string));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_unknown_record_is_skipped() {
        let original = patients();
        let mut edited = original.clone();
        edited.push(Patient::new("A9", "New"));

        assert!(diff_patients(&original, &edited).is_empty());
    }

    #[test]
    fn test_original_is_not_mutated() {
        let original = patients();
        let snapshot = original.clone();
        let mut edited = original.clone();
        edited[0].comment = None;

        let _ = diff_patients(&original, &edited);

        assert_eq!(original, snapshot);
    }
}
