//! The validated selection store.
//!
//! Holds the current value of every tweakable. The only way to change a
//! value is [`SelectionStore::write`], which silently ignores unknown ids,
//! facts, values outside the domain and redundant writes. Each applied write
//! publishes exactly one change event.

pub mod stream;

use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalogue::Catalogue;
use crate::config::LabConfig;
use crate::value::Value;

pub use stream::{ChangeEvent, ChangeStream, SubscriptionId};

use stream::ChangeNotifier;

/// What a write did. Informational only; rejected writes are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The value was replaced and a change event published.
    Applied,
    /// No decision has this id.
    UnknownDecision,
    /// The decision is a fact.
    NotEditable,
    /// The value is not in the decision's domain.
    OutOfDomain,
    /// The value equals the stored value.
    Unchanged,
}

impl WriteOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Current selection for a catalogue.
#[derive(Debug)]
pub struct SelectionStore {
    catalogue: Arc<Catalogue>,
    values: HashMap<String, Value>,
    notifier: ChangeNotifier,
}

impl SelectionStore {
    /// Create a store populated with every tweakable's default.
    #[must_use]
    pub fn new(catalogue: Arc<Catalogue>, config: &LabConfig) -> Self {
        let mut store = Self {
            values: HashMap::with_capacity(catalogue.len()),
            catalogue,
            notifier: ChangeNotifier::new(config.notification_capacity),
        };
        store.reset_to_defaults();
        store
    }

    #[must_use]
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Shared handle to the catalogue.
    #[must_use]
    pub fn catalogue_arc(&self) -> Arc<Catalogue> {
        Arc::clone(&self.catalogue)
    }

    /// Current value of a tweakable. Facts and unknown ids read as `None`.
    #[must_use]
    pub fn read(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    /// Validated write.
    pub fn write(&mut self, id: &str, value: Value) -> WriteOutcome {
        let Some(decision) = self.catalogue.get(id) else {
            tracing::debug!(decision = id, "write ignored: unknown decision");
            return WriteOutcome::UnknownDecision;
        };
        let Some(domain) = decision.domain() else {
            tracing::debug!(decision = id, "write ignored: fact is not editable");
            return WriteOutcome::NotEditable;
        };
        if !domain.contains(&value) {
            tracing::debug!(decision = id, %value, "write ignored: value outside domain");
            return WriteOutcome::OutOfDomain;
        }
        if self.values.get(id) == Some(&value) {
            return WriteOutcome::Unchanged;
        }

        let previous = self.values.insert(id.to_string(), value.clone());
        self.notifier.publish(id, previous, value);
        WriteOutcome::Applied
    }

    /// Write every tweakable's default. Returns how many values changed.
    pub fn reset_to_defaults(&mut self) -> usize {
        let catalogue = Arc::clone(&self.catalogue);
        let mut changed = 0;
        for decision in catalogue.tweakables() {
            let Some(default) = decision.default_value() else {
                continue;
            };
            if self.write(decision.id(), default.clone()).is_applied() {
                changed += 1;
            }
        }
        changed
    }

    /// Write a uniformly random domain member to every tweakable.
    ///
    /// Availability is not consulted: unavailable decisions are randomized
    /// like any other. Returns how many values changed.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let catalogue = Arc::clone(&self.catalogue);
        let mut changed = 0;
        for decision in catalogue.tweakables() {
            let Some(domain) = decision.domain() else {
                continue;
            };
            let Some(value) = domain.values().choose(rng) else {
                continue;
            };
            if self.write(decision.id(), value.clone()).is_applied() {
                changed += 1;
            }
        }
        changed
    }

    /// Every stored value in catalogue order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(&str, &Value)> {
        self.catalogue
            .tweakables()
            .filter_map(|d| self.values.get(d.id()).map(|v| (d.id(), v)))
            .collect()
    }

    /// Subscribe to change events.
    pub fn subscribe(&mut self) -> ChangeStream {
        self.notifier.subscribe()
    }

    /// Detach a subscription. Returns false if it was not attached.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of applied writes since creation, including initial defaults.
    #[must_use]
    pub const fn change_count(&self) -> u64 {
        self.notifier.sequence()
    }

    /// Events dropped because a subscriber's buffer was full.
    #[must_use]
    pub const fn dropped_events(&self) -> u64 {
        self.notifier.dropped_events()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::decision::Decision;

    fn store() -> SelectionStore {
        let catalogue = Catalogue::new(vec![
            Decision::fact("given", true),
            Decision::tweakable("flag", [true, false], true).unwrap(),
            Decision::tweakable("kind", ["box", "object", "undefined"], "undefined").unwrap(),
        ])
        .unwrap();
        SelectionStore::new(Arc::new(catalogue), &LabConfig::default())
    }

    #[test]
    fn test_defaults_are_applied_once_at_creation() {
        let store = store();
        assert_eq!(store.read("flag"), Some(&Value::Bool(true)));
        assert_eq!(store.read("kind"), Some(&Value::text("undefined")));
        assert_eq!(store.read("given"), None);
        assert_eq!(store.change_count(), 2);
    }

    #[test]
    fn test_rejected_writes_do_not_notify() {
        let mut store = store();
        let stream = store.subscribe();

        assert_eq!(store.write("nope", Value::Bool(true)), WriteOutcome::UnknownDecision);
        assert_eq!(store.write("given", Value::Bool(false)), WriteOutcome::NotEditable);
        assert_eq!(store.write("kind", Value::text("tuple")), WriteOutcome::OutOfDomain);
        assert_eq!(store.write("flag", Value::text("true")), WriteOutcome::OutOfDomain);
        assert_eq!(store.write("flag", Value::Bool(true)), WriteOutcome::Unchanged);

        assert!(stream.try_recv().is_none());
        assert_eq!(store.read("kind"), Some(&Value::text("undefined")));
    }

    #[test]
    fn test_applied_write_notifies_exactly_once() {
        let mut store = store();
        let stream = store.subscribe();

        assert_eq!(store.write("kind", Value::text("object")), WriteOutcome::Applied);
        assert_eq!(store.read("kind"), Some(&Value::text("object")));

        let events = stream.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "kind");
        assert_eq!(events[0].previous, Some(Value::text("undefined")));
        assert_eq!(events[0].current, Value::text("object"));
    }

    #[test]
    fn test_reset_restores_defaults_and_counts_changes() {
        let mut store = store();
        store.write("flag", Value::Bool(false));
        store.write("kind", Value::text("box"));

        assert_eq!(store.reset_to_defaults(), 2);
        assert_eq!(store.reset_to_defaults(), 0);
        assert_eq!(store.read("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_shuffle_stays_in_domain() {
        let mut store = store();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            store.shuffle_with(&mut rng);
            for (id, value) in store.snapshot() {
                let domain = store.catalogue().get(id).and_then(|d| d.domain()).unwrap();
                assert!(domain.contains(value));
            }
        }
    }
}
