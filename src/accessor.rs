//! Dependency-reading accessor.
//!
//! Availability predicates and concern functions never see the store
//! directly. They receive an [`Accessor`], which is either bound to the live
//! selection or to a search-time preset assignment. The mode is an explicit
//! value passed into every call, so nested evaluations cannot observe each
//! other's mode.

use std::cell::Cell;
use std::collections::HashMap;

use crate::catalogue::Catalogue;
use crate::decision::Domain;
use crate::store::SelectionStore;
use crate::value::Value;

/// Partial assignment used while exploring a decision's outcomes.
#[derive(Debug, Clone, Default)]
pub struct PresetSet {
    values: HashMap<String, Value>,
}

impl PresetSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, value: Value) {
        self.values.insert(id.into(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.values.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Single-slot register holding the first unresolved decision read during
/// one search-mode evaluation.
#[derive(Debug, Default)]
pub struct DiscoveredSlot(Cell<Option<usize>>);

impl DiscoveredSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue position of the captured decision, if any.
    #[must_use]
    pub fn get(&self) -> Option<usize> {
        self.0.get()
    }

    fn record(&self, index: usize) {
        if self.0.get().is_none() {
            self.0.set(Some(index));
        }
    }
}

/// Read channel handed to predicates.
#[derive(Debug, Clone, Copy)]
pub enum Accessor<'a> {
    /// Reads the current selection.
    Live { store: &'a SelectionStore },
    /// Reads presets, resolving anything unset to the first domain value and
    /// capturing the first such read in `discovered`.
    Search {
        catalogue: &'a Catalogue,
        presets: &'a PresetSet,
        discovered: &'a DiscoveredSlot,
    },
}

impl<'a> Accessor<'a> {
    #[must_use]
    pub const fn live(store: &'a SelectionStore) -> Self {
        Self::Live { store }
    }

    #[must_use]
    pub const fn search(
        catalogue: &'a Catalogue,
        presets: &'a PresetSet,
        discovered: &'a DiscoveredSlot,
    ) -> Self {
        Self::Search {
            catalogue,
            presets,
            discovered,
        }
    }

    /// The catalogue this accessor resolves ids against.
    #[must_use]
    pub fn catalogue(&self) -> &'a Catalogue {
        match *self {
            Self::Live { store } => store.catalogue(),
            Self::Search { catalogue, .. } => catalogue,
        }
    }

    /// Read a decision's value in this mode.
    ///
    /// Facts always read as their fixed value and are never captured as
    /// discovered. Unknown ids read as `None`.
    #[must_use]
    pub fn read(&self, id: &str) -> Option<&'a Value> {
        match *self {
            Self::Live { store } => {
                let decision = store.catalogue().get(id)?;
                decision.fact_value().or_else(|| store.read(id))
            }
            Self::Search {
                catalogue,
                presets,
                discovered,
            } => {
                let index = catalogue.position(id)?;
                let decision = catalogue.at(index)?;
                if let Some(value) = decision.fact_value() {
                    return Some(value);
                }
                if let Some(value) = presets.get(id) {
                    return Some(value);
                }
                discovered.record(index);
                decision.domain().map(Domain::first)
            }
        }
    }

    /// True when `id` currently reads as boolean `true`.
    #[must_use]
    pub fn is_true(&self, id: &str) -> bool {
        self.read(id).is_some_and(Value::is_true)
    }

    /// True when `id` currently reads as the text `text`.
    #[must_use]
    pub fn equals(&self, id: &str, text: &str) -> bool {
        self.read(id).is_some_and(|v| v.is_text(text))
    }

    /// True when both ids read as the same value.
    #[must_use]
    pub fn same(&self, a: &str, b: &str) -> bool {
        let left = self.read(a);
        left.is_some() && left == self.read(b)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::LabConfig;
    use crate::decision::Decision;

    fn catalogue() -> Catalogue {
        Catalogue::new(vec![
            Decision::fact("given", "object"),
            Decision::tweakable("a", [true, false], false).unwrap(),
            Decision::tweakable("b", ["box", "object", "undefined"], "undefined").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_live_reads_store_and_facts() {
        let store = SelectionStore::new(Arc::new(catalogue()), &LabConfig::default());
        let accessor = Accessor::live(&store);

        assert_eq!(accessor.read("a"), Some(&Value::Bool(false)));
        assert!(accessor.equals("b", "undefined"));
        assert!(accessor.equals("given", "object"));
        assert_eq!(accessor.read("missing"), None);
        assert!(!accessor.same("a", "b"));
        assert!(!accessor.same("missing", "also missing"));
    }

    #[test]
    fn test_search_prefers_presets_then_first_domain_value() {
        let catalogue = catalogue();
        let mut presets = PresetSet::new();
        presets.set("b", Value::text("object"));
        let slot = DiscoveredSlot::new();
        let accessor = Accessor::search(&catalogue, &presets, &slot);

        assert!(accessor.equals("b", "object"));
        assert_eq!(slot.get(), None);

        // Unset: first domain element, not the declared default (false).
        assert!(accessor.is_true("a"));
        assert_eq!(slot.get(), catalogue.position("a"));
    }

    #[test]
    fn test_search_records_only_the_first_unresolved_read() {
        let catalogue = catalogue();
        let presets = PresetSet::new();
        let slot = DiscoveredSlot::new();
        let accessor = Accessor::search(&catalogue, &presets, &slot);

        assert!(accessor.equals("given", "object"));
        assert_eq!(slot.get(), None);

        assert!(accessor.equals("b", "box"));
        assert!(accessor.is_true("a"));
        assert_eq!(slot.get(), catalogue.position("b"));
    }

    #[test]
    fn test_search_reads_unknown_ids_as_absent_without_recording() {
        let catalogue = catalogue();
        let presets = PresetSet::new();
        let slot = DiscoveredSlot::new();
        let accessor = Accessor::search(&catalogue, &presets, &slot);

        assert_eq!(accessor.read("missing"), None);
        assert!(!accessor.is_true("missing"));
        assert_eq!(slot.get(), None);
    }
}
