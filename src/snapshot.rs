//! Snapshot export and free-text import.
//!
//! The exported form is a JSON object mapping decision id to value, holding
//! only tweakables that are currently available, in catalogue order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::accessor::Accessor;
use crate::error::SnapshotError;
use crate::store::{SelectionStore, WriteOutcome};
use crate::value::Value;

/// Ordered mapping of decision id to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(String, Value)>,
}

impl Snapshot {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_json_value(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(k, v)| {
                let json = match v {
                    Value::Bool(b) => serde_json::Value::Bool(*b),
                    Value::Text(s) => serde_json::Value::String(s.clone()),
                };
                (k.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// Compact JSON, as stored in a link fragment.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Two-space indented JSON, as displayed for copying.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        format!("{:#}", self.to_json_value())
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Snapshot of every available tweakable's current value.
#[must_use]
pub fn export(store: &SelectionStore) -> Snapshot {
    let accessor = Accessor::live(store);
    let entries = store
        .catalogue()
        .tweakables()
        .filter(|d| d.availability(&accessor).is_available())
        .filter_map(|d| store.read(d.id()).map(|v| (d.id().to_string(), v.clone())))
        .collect();
    Snapshot { entries }
}

/// Entries of an imported JSON object, in document order.
///
/// Values are kept as raw JSON; anything that is not a boolean or a string is
/// later passed to the store as out-of-domain and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSnapshot {
    entries: Vec<(String, serde_json::Value)>,
}

impl ParsedSnapshot {
    /// Parse exported text.
    ///
    /// # Errors
    /// - `Parse` if the text is not JSON.
    /// - `NotAnObject` if the JSON is not an object.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(SnapshotError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Enumerate any JSON value the way a link reader does: object members,
    /// array or string positions as keys, and no entries for numbers and
    /// booleans.
    ///
    /// # Errors
    /// - `NotAnObject` for `null`, which has nothing to enumerate.
    pub(crate) fn from_link_json(value: serde_json::Value) -> Result<Self, SnapshotError> {
        let entries = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            serde_json::Value::String(text) => text
                .chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), serde_json::Value::String(c.to_string())))
                .collect(),
            serde_json::Value::Bool(_) | serde_json::Value::Number(_) => Vec::new(),
            serde_json::Value::Null => return Err(SnapshotError::NotAnObject { found: "null" }),
        };
        Ok(Self { entries })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry through the validated write, in document order.
    ///
    /// Returns the keys that do not name a tweakable, in document order.
    pub fn apply(&self, store: &mut SelectionStore) -> ApplySummary {
        let mut summary = ApplySummary::default();
        for (key, raw) in &self.entries {
            if !store.catalogue().is_tweakable(key) {
                summary.unknown.push(key.clone());
                continue;
            }
            let outcome = match Value::from_json(raw) {
                Some(value) => store.write(key, value),
                None => WriteOutcome::OutOfDomain,
            };
            if outcome.is_applied() {
                summary.applied += 1;
            }
        }
        summary
    }
}

/// Result of applying a parsed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Entries that changed the store.
    pub applied: usize,
    /// Keys that are not tweakables of the catalogue.
    pub unknown: Vec<String>,
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Apply free text pasted by the user.
///
/// Blank text is ignored. Unparseable text is logged and nothing is applied.
/// Returns the number of entries that changed the store.
pub fn import_text(store: &mut SelectionStore, text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    match ParsedSnapshot::parse(text) {
        Ok(parsed) => parsed.apply(store).applied,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring snapshot text that could not be parsed");
            0
        }
    }
}
