//! Exhaustive concern discovery.
//!
//! For a target decision, enumerate every distinct concern its concern
//! function can produce. Dependencies are not declared: each evaluation runs
//! in search mode, and the first decision the function reads without a
//! preset becomes the next one to branch on.
//!
//! Only the first unresolved read of an evaluation is branched on. Later
//! unresolved reads in the same evaluation see their first domain value and
//! are only varied if they are discovered again one level deeper, so the
//! result can under-approximate the reachable set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accessor::{Accessor, DiscoveredSlot, PresetSet};
use crate::catalogue::Catalogue;
use crate::decision::{Concern, Decision};

/// One reachable outcome of a concern function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// No concern for this combination.
    Clear,
    Concern(Concern),
}

impl Outcome {
    #[must_use]
    pub const fn concern(&self) -> Option<&Concern> {
        match self {
            Self::Clear => None,
            Self::Concern(c) => Some(c),
        }
    }
}

impl From<Option<Concern>> for Outcome {
    fn from(value: Option<Concern>) -> Self {
        value.map_or(Self::Clear, Self::Concern)
    }
}

struct Explorer<'a> {
    catalogue: &'a Catalogue,
    target: &'a Decision,
    presets: PresetSet,
    outcomes: Vec<Outcome>,
    evaluations: usize,
}

impl<'a> Explorer<'a> {
    fn new(catalogue: &'a Catalogue, target: &'a Decision) -> Self {
        Self {
            catalogue,
            target,
            presets: PresetSet::new(),
            outcomes: Vec::new(),
            evaluations: 0,
        }
    }

    fn explore(&mut self, changing: usize) {
        let catalogue = self.catalogue;
        let Some(decision) = catalogue.at(changing) else {
            return;
        };
        let Some(domain) = decision.domain() else {
            return;
        };

        for value in domain.values() {
            self.presets.set(decision.id(), value.clone());

            let slot = DiscoveredSlot::new();
            let outcome = self.evaluate(&slot);
            if !self.outcomes.contains(&outcome) {
                self.outcomes.push(outcome);
            }

            if let Some(next) = slot.get().filter(|&i| self.should_branch(i)) {
                self.explore(next);
            }

            self.presets.remove(decision.id());
        }
    }

    fn evaluate(&mut self, slot: &DiscoveredSlot) -> Outcome {
        self.evaluations += 1;
        let Some(own) = self.presets.get(self.target.id()) else {
            return Outcome::Clear;
        };
        let accessor = Accessor::search(self.catalogue, &self.presets, slot);
        self.target.concern(own, &accessor).into()
    }

    /// A discovered decision is branched on only if it is still unset and
    /// available under the current presets.
    fn should_branch(&self, index: usize) -> bool {
        let Some(decision) = self.catalogue.at(index) else {
            return false;
        };
        if self.presets.contains(decision.id()) {
            return false;
        }
        let scratch = DiscoveredSlot::new();
        let accessor = Accessor::search(self.catalogue, &self.presets, &scratch);
        decision.availability(&accessor).is_available()
    }

    fn finish(mut self) -> Vec<Outcome> {
        if self.outcomes.iter().any(|o| o.concern().is_some()) {
            self.outcomes.retain(|o| o.concern().is_some());
        }
        tracing::debug!(
            target_decision = self.target.id(),
            evaluations = self.evaluations,
            outcomes = self.outcomes.len(),
            "concern discovery finished"
        );
        self.outcomes
    }
}

/// Every distinct outcome reachable for the decision `target`.
///
/// Returns an empty list for unknown ids, facts, and decisions without a
/// concern function. "Clear" is only reported when no concern is reachable.
#[must_use]
pub fn explore(catalogue: &Catalogue, target: &str) -> Vec<Outcome> {
    let Some(index) = catalogue.position(target) else {
        return Vec::new();
    };
    let Some(decision) = catalogue.at(index) else {
        return Vec::new();
    };
    if decision.is_fact() || !decision.has_concern() {
        return Vec::new();
    }

    let mut explorer = Explorer::new(catalogue, decision);
    explorer.explore(index);
    explorer.finish()
}

/// Discovered outcomes for one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub outcomes: Vec<Outcome>,
}

/// Discovered outcomes for every tweakable of a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl DiagnosticReport {
    /// Outcomes for `id`, if it is part of the report.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[Outcome]> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.outcomes.as_slice())
    }

    /// Distinct concern keys across the whole report, in first-seen order.
    #[must_use]
    pub fn concern_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for concern in self.entries.iter().flat_map(|e| e.outcomes.iter().filter_map(Outcome::concern)) {
            if !keys.contains(&concern.key.as_str()) {
                keys.push(&concern.key);
            }
        }
        keys
    }
}

/// Run discovery for every tweakable, in catalogue order.
#[must_use]
pub fn discover_all(catalogue: &Catalogue) -> DiagnosticReport {
    let entries = catalogue
        .tweakables()
        .map(|d| ReportEntry {
            id: d.id().to_string(),
            outcomes: explore(catalogue, d.id()),
        })
        .collect();

    DiagnosticReport {
        generated_at: Utc::now(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn concern(key: &str) -> Concern {
        Concern::new(key, key, "")
    }

    #[test]
    fn test_self_only_concern_branches_on_own_domain() {
        let catalogue = Catalogue::new(vec![Decision::tweakable("t", [true, false], true)
            .unwrap()
            .with_concern(|own, _| (!own.is_true()).then(|| concern("off")))])
        .unwrap();

        assert_eq!(explore(&catalogue, "t"), vec![Outcome::Concern(concern("off"))]);
    }

    #[test]
    fn test_clear_is_kept_when_nothing_else_is_reachable() {
        let catalogue = Catalogue::new(vec![Decision::tweakable("t", [true, false], true)
            .unwrap()
            .with_concern(|_, _| None)])
        .unwrap();

        assert_eq!(explore(&catalogue, "t"), vec![Outcome::Clear]);
    }

    #[test]
    fn test_discovered_dependency_is_explored_per_value() {
        let catalogue = Catalogue::new(vec![
            Decision::tweakable("dep", ["a", "b", "c"], "c").unwrap(),
            Decision::tweakable("t", [true], true)
                .unwrap()
                .with_concern(|_, a| a.read("dep").and_then(Value::as_text).map(concern)),
        ])
        .unwrap();

        let outcomes = explore(&catalogue, "t");
        let keys: Vec<&str> = outcomes.iter().filter_map(|o| o.concern()).map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_transitive_dependencies_are_followed_one_at_a_time() {
        let catalogue = Catalogue::new(vec![
            Decision::tweakable("x", [false, true], false).unwrap(),
            Decision::tweakable("y", [false, true], false).unwrap(),
            Decision::tweakable("t", [true], true)
                .unwrap()
                .with_concern(|_, a| {
                    if !a.is_true("x") {
                        return None;
                    }
                    a.is_true("y").then(|| concern("x_and_y"))
                }),
        ])
        .unwrap();

        assert_eq!(explore(&catalogue, "t"), vec![Outcome::Concern(concern("x_and_y"))]);
    }

    #[test]
    fn test_second_unresolved_read_is_varied_one_level_deeper() {
        // "y" is read while "x" is still unset, so it is not captured there;
        // it is captured again once "x" has a preset.
        let catalogue = Catalogue::new(vec![
            Decision::tweakable("x", [false, true], false).unwrap(),
            Decision::tweakable("y", [false, true], false).unwrap(),
            Decision::tweakable("t", [true], true)
                .unwrap()
                .with_concern(|_, a| {
                    let x = a.is_true("x");
                    let y = a.is_true("y");
                    (x && y).then(|| concern("both"))
                }),
        ])
        .unwrap();

        assert_eq!(explore(&catalogue, "t"), vec![Outcome::Concern(concern("both"))]);
    }

    #[test]
    fn test_unavailable_dependency_is_not_branched() {
        let catalogue = Catalogue::new(vec![
            Decision::tweakable("dep", [false, true], false)
                .unwrap()
                .with_availability(|_| Some("never applies".to_string())),
            Decision::tweakable("t", [true], true)
                .unwrap()
                .with_concern(|_, a| a.is_true("dep").then(|| concern("dep_on"))),
        ])
        .unwrap();

        assert_eq!(explore(&catalogue, "t"), vec![Outcome::Clear]);
    }

    #[test]
    fn test_report_covers_tweakables_only() {
        let catalogue = Catalogue::new(vec![
            Decision::fact("f", true),
            Decision::tweakable("t", [true, false], true)
                .unwrap()
                .with_concern(|own, _| own.is_true().then(|| concern("on"))),
            Decision::tweakable("quiet", [true, false], true).unwrap(),
        ])
        .unwrap();

        let report = discover_all(&catalogue);
        assert_eq!(report.entries.len(), 2);
        assert!(report.get("f").is_none());
        assert_eq!(report.get("quiet"), Some(&[][..]));
        assert_eq!(report.concern_keys(), vec!["on"]);
    }
}
