//! The ordered, immutable catalogue of decisions.

use std::collections::HashMap;

use crate::decision::Decision;
use crate::error::ValidationError;

/// Ordered list of decisions with an id index.
///
/// Order is presentation order: it is the order rows are shown, snapshots are
/// exported, and link-restore diagnostics are reported.
#[derive(Debug, Clone)]
pub struct Catalogue {
    decisions: Vec<Decision>,
    by_id: HashMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue.
    ///
    /// # Errors
    /// - `DuplicateDecision` if two decisions share an id.
    pub fn new(decisions: Vec<Decision>) -> Result<Self, ValidationError> {
        let mut by_id = HashMap::with_capacity(decisions.len());
        for (index, decision) in decisions.iter().enumerate() {
            if by_id.insert(decision.id().to_string(), index).is_some() {
                return Err(ValidationError::DuplicateDecision {
                    id: decision.id().to_string(),
                });
            }
        }
        Ok(Self { decisions, by_id })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Decision> {
        self.by_id.get(id).map(|&i| &self.decisions[i])
    }

    /// Position of a decision in catalogue order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Decision at a catalogue position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Decision> {
        self.decisions.get(index)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// True when `id` names a domain-bearing (editable) decision.
    #[must_use]
    pub fn is_tweakable(&self, id: &str) -> bool {
        self.get(id).is_some_and(|d| !d.is_fact())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter()
    }

    /// Domain-bearing decisions, in order.
    pub fn tweakables(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter().filter(|d| !d.is_fact())
    }

    /// Facts, in order.
    pub fn facts(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter().filter(|d| d.is_fact())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_rejects_duplicate_ids() {
        let err = Catalogue::new(vec![
            Decision::fact("a", true),
            Decision::tweakable("a", [true, false], true).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateDecision { id: "a".to_string() });
    }

    #[test]
    fn test_catalogue_preserves_order_and_splits_kinds() {
        let catalogue = Catalogue::new(vec![
            Decision::fact("f", 1.to_string()),
            Decision::tweakable("t1", ["x", "y"], "y").unwrap(),
            Decision::tweakable("t2", [false, true], true).unwrap(),
        ])
        .unwrap();

        let ids: Vec<&str> = catalogue.tweakables().map(Decision::id).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(catalogue.facts().count(), 1);
        assert_eq!(catalogue.position("t2"), Some(2));
        assert!(catalogue.is_tweakable("t1"));
        assert!(!catalogue.is_tweakable("f"));
        assert!(!catalogue.is_tweakable("missing"));
    }
}
