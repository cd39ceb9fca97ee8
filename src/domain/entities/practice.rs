//! Practice catalog and the filter options derived from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Veterinary practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Practice {
    pub odu_id: String,
    pub name: String,
    #[serde(default)]
    pub scheduler: Option<String>,
}

/// Practices plus named groups of practice ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PracticeCatalog {
    /// Group label to member practice ids.
    #[serde(default)]
    pub mapping: BTreeMap<String, Vec<String>>,
    /// Single practices.
    #[serde(default)]
    pub practices: Vec<Practice>,
}

/// Whether a filter option stands for a group or a single practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeOptionKind {
    /// Named group of practices.
    Group,
    /// One practice.
    Practice,
}

/// Selectable entry of the practice filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeOption {
    /// Text shown in the picker.
    pub label: String,
    /// Member ids for a group, a single id for a practice.
    pub ids: Vec<String>,
    /// Group or single practice.
    pub kind: PracticeOptionKind,
}

impl PracticeOption {
    /// Creates a group option.
    #[must_use]
    pub fn group(label: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            label: label.into(),
            ids,
            kind: PracticeOptionKind::Group,
        }
    }

    /// Creates a single practice option.
    #[must_use]
    pub fn practice(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ids: vec![id.into()],
            kind: PracticeOptionKind::Practice,
        }
    }

    /// Whether the option stands for a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == PracticeOptionKind::Group
    }

    /// The practice id of a single practice option.
    #[must_use]
    pub fn practice_id(&self) -> Option<&str> {
        match self.kind {
            PracticeOptionKind::Practice => self.ids.first().map(String::as_str),
            PracticeOptionKind::Group => None,
        }
    }

    /// Options are identified by label and kind.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.kind == other.kind && self.label == other.label
    }
}

impl PracticeCatalog {
    /// Groups first, then single practices.
    #[must_use]
    pub fn options(&self) -> Vec<PracticeOption> {
        let groups = self
            .mapping
            .iter()
            .map(|(label, ids)| PracticeOption::group(label.clone(), ids.clone()));
        let practices = self
            .practices
            .iter()
            .map(|p| PracticeOption::practice(p.name.clone(), p.odu_id.clone()));
        groups.chain(practices).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_order() {
        let catalog: PracticeCatalog = serde_json::from_str(
            r#"{
                "mapping": {"West": ["P1", "P2"]},
                "practices": [
                    {"odu_id": "P1", "name": "Alpha", "scheduler": "vetstoria"},
                    {"odu_id": "P2", "name": "Beta", "scheduler": null}
                ]
            }"#,
        )
        .unwrap();

        let options = catalog.options();
        assert_eq!(options.len(), 3);
        assert!(options[0].is_group());
        assert_eq!(options[0].ids, vec!["P1", "P2"]);
        assert_eq!(options[1].practice_id(), Some("P1"));
        assert_eq!(options[2].label, "Beta");
    }

    #[test]
    fn test_same_as_ignores_ids() {
        let a = PracticeOption::group("West", vec!["P1".into()]);
        let b = PracticeOption::group("West", vec![]);
        let c = PracticeOption::practice("West", "P1");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }
}
