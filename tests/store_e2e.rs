use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tweaklab::laboratory::{self, STORE_NEGATIVE_ZERO, TYPEOF_BOX, TYPEOF_TUPLE_WITH_BOX};
use tweaklab::{live_concern, live_view, Catalogue, Decision, LabConfig, SelectionStore, Value, WriteOutcome};

fn lab_store() -> SelectionStore {
    SelectionStore::new(Arc::new(laboratory::catalogue().unwrap()), &LabConfig::default())
}

#[test]
fn test_every_tweakable_starts_at_its_default() {
    let store = lab_store();
    for decision in store.catalogue().tweakables() {
        assert_eq!(store.read(decision.id()), decision.default_value(), "{}", decision.id());
    }
    for decision in store.catalogue().facts() {
        assert_eq!(store.read(decision.id()), None);
    }
}

#[test]
fn test_rejected_writes_leave_the_store_untouched() {
    let mut store = lab_store();
    let before: Vec<(String, Value)> = store.snapshot().into_iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    let changes = store.change_count();

    assert_eq!(store.write("no such decision", Value::Bool(true)), WriteOutcome::UnknownDecision);
    assert_eq!(store.write("typeof []", Value::text("array")), WriteOutcome::NotEditable);
    assert_eq!(store.write(TYPEOF_BOX, Value::text("function")), WriteOutcome::OutOfDomain);
    assert_eq!(store.write(TYPEOF_BOX, Value::Bool(true)), WriteOutcome::OutOfDomain);
    assert_eq!(store.write(TYPEOF_BOX, Value::text("undefined")), WriteOutcome::Unchanged);

    let after: Vec<(String, Value)> = store.snapshot().into_iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    assert_eq!(before, after);
    assert_eq!(store.change_count(), changes);
}

#[test]
fn test_applied_write_notifies_subscribers_once() {
    let mut store = lab_store();
    let stream = store.subscribe();

    assert!(store.write(STORE_NEGATIVE_ZERO, Value::Bool(false)).is_applied());
    assert!(!store.write(STORE_NEGATIVE_ZERO, Value::Bool(false)).is_applied());

    let event = stream.recv_timeout(Duration::from_millis(100)).expect("change event");
    assert_eq!(event.id, STORE_NEGATIVE_ZERO);
    assert_eq!(event.previous, Some(Value::Bool(true)));
    assert_eq!(event.current, Value::Bool(false));
    assert!(stream.try_recv().is_none());
}

#[test]
fn test_no_negative_zero_surfaces_without_touching_other_values() {
    let mut store = lab_store();
    let before: Vec<(String, Value)> = store.snapshot().into_iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    store.write(STORE_NEGATIVE_ZERO, Value::Bool(false));
    let concern = live_concern(&store, STORE_NEGATIVE_ZERO).expect("concern");
    assert_eq!(concern.key, "no_negative_zero");
    assert_eq!(concern.to_string(), "⚠ no negative zero");

    for (id, value) in before {
        if id != STORE_NEGATIVE_ZERO {
            assert_eq!(store.read(&id), Some(&value), "{id}");
        }
    }
}

#[test]
fn test_box_gated_row_is_unavailable_at_default() {
    let store = lab_store();
    let rows = live_view(&store);
    let row = rows.iter().find(|r| r.id == TYPEOF_TUPLE_WITH_BOX).unwrap();

    assert_eq!(row.availability.reason(), Some("typeof Box === 'undefined'"));
    assert!(!row.editable);
    assert!(row.concern.is_none());
    assert_eq!(rows.len(), store.catalogue().len());
}

#[test]
fn test_shuffle_stays_inside_every_domain() {
    let mut store = lab_store();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..32 {
        store.shuffle_with(&mut rng);
        for decision in store.catalogue().tweakables() {
            let value = store.read(decision.id()).unwrap();
            assert!(decision.domain().unwrap().contains(value), "{}", decision.id());
        }
    }
}

#[test]
fn test_reset_restores_defaults_after_shuffle() {
    let mut store = lab_store();
    store.shuffle_with(&mut StdRng::seed_from_u64(3));
    store.reset_to_defaults();
    for decision in store.catalogue().tweakables() {
        assert_eq!(store.read(decision.id()), decision.default_value());
    }
}

#[test]
fn test_full_subscriber_buffer_drops_instead_of_blocking() {
    let catalogue = Catalogue::new(vec![Decision::tweakable("t", ["a", "b", "c"], "a").unwrap()]).unwrap();
    let config = LabConfig {
        notification_capacity: 1,
        ..LabConfig::default()
    };
    let mut store = SelectionStore::new(Arc::new(catalogue), &config);
    let stream = store.subscribe();

    store.write("t", Value::text("b"));
    store.write("t", Value::text("c"));
    store.write("t", Value::text("a"));

    assert_eq!(stream.drain().len(), 1);
    assert_eq!(store.dropped_events(), 2);
    assert_eq!(store.read("t"), Some(&Value::text("a")));
}
