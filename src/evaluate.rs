//! Availability and concern evaluation on the live path.
//!
//! The presentation layer renders one row per decision. `live_view` computes
//! those rows from the current selection: an unavailable decision shows its
//! reason and its concern is never evaluated.

use serde::{Deserialize, Serialize};

use crate::accessor::Accessor;
use crate::decision::{Availability, Concern, Decision};
use crate::store::SelectionStore;
use crate::value::Value;

/// Availability of `decision` against the live selection.
#[must_use]
pub fn availability(decision: &Decision, store: &SelectionStore) -> Availability {
    decision.availability(&Accessor::live(store))
}

/// Concern for `decision` evaluated with `accessor`, using the decision's own
/// value as read through that accessor.
#[must_use]
pub fn concern_with(decision: &Decision, accessor: &Accessor<'_>) -> Option<Concern> {
    let own = accessor.read(decision.id())?;
    decision.concern(own, accessor)
}

/// Live concern for `id`, or `None` if the decision is unknown, a fact, or
/// currently unavailable.
#[must_use]
pub fn live_concern(store: &SelectionStore, id: &str) -> Option<Concern> {
    let decision = store.catalogue().get(id)?;
    if decision.is_fact() || !availability(decision, store).is_available() {
        return None;
    }
    concern_with(decision, &Accessor::live(store))
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub id: String,
    /// Current value (the fixed value for a fact).
    pub value: Option<Value>,
    /// Selectable values; `None` for a fact.
    pub choices: Option<Vec<Value>>,
    /// True when the decision may be offered for editing.
    pub editable: bool,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concern: Option<Concern>,
}

/// Rows for every decision, in catalogue order.
#[must_use]
pub fn live_view(store: &SelectionStore) -> Vec<DecisionView> {
    let accessor = Accessor::live(store);
    store
        .catalogue()
        .iter()
        .map(|decision| {
            let availability = decision.availability(&accessor);
            let concern = if decision.is_fact() || !availability.is_available() {
                None
            } else {
                concern_with(decision, &accessor)
            };
            DecisionView {
                id: decision.id().to_string(),
                value: accessor.read(decision.id()).cloned(),
                choices: decision.domain().map(|d| d.values().to_vec()),
                editable: !decision.is_fact() && availability.is_available(),
                availability,
                concern,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::catalogue::Catalogue;
    use crate::config::LabConfig;

    #[test]
    fn test_unavailable_concern_is_not_evaluated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let catalogue = Catalogue::new(vec![
            Decision::tweakable("gate", [true, false], false).unwrap(),
            Decision::tweakable("gated", [true, false], true)
                .unwrap()
                .with_availability(|a| (!a.is_true("gate")).then(|| "gate is closed".to_string()))
                .with_concern(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(Concern::new("k", "s", "d"))
                }),
        ])
        .unwrap();
        let mut store = SelectionStore::new(Arc::new(catalogue), &LabConfig::default());

        let rows = live_view(&store);
        assert_eq!(rows[1].availability.reason(), Some("gate is closed"));
        assert!(!rows[1].editable);
        assert!(rows[1].concern.is_none());
        assert!(live_concern(&store, "gated").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.write("gate", Value::Bool(true));
        let rows = live_view(&store);
        assert!(rows[1].editable);
        assert_eq!(rows[1].concern.as_ref().map(|c| c.key.as_str()), Some("k"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_facts_render_their_fixed_value() {
        let catalogue = Catalogue::new(vec![Decision::fact("typeof []", "object")]).unwrap();
        let store = SelectionStore::new(Arc::new(catalogue), &LabConfig::default());

        let rows = live_view(&store);
        assert_eq!(rows[0].value, Some(Value::text("object")));
        assert!(rows[0].choices.is_none());
        assert!(!rows[0].editable);
    }
}
