//! Session: what a presentation layer holds for one open laboratory.
//!
//! A session owns the selection store, the current link fragment, the
//! repaint scheduler and the diagnostics of the link it was opened from.
//! Bootstrap writes (defaults and link restore) happen before the session is
//! marked loaded, so they neither clear the fragment nor schedule repaints.

use std::sync::Arc;

use rand::Rng;

use crate::catalogue::Catalogue;
use crate::config::LabConfig;
use crate::discovery::{discover_all, DiagnosticReport};
use crate::error::LabResult;
use crate::evaluate::{live_view, DecisionView};
use crate::laboratory;
use crate::link::{self, RestoreIssue};
use crate::repaint::RepaintScheduler;
use crate::snapshot::{self, ApplySummary, ParsedSnapshot, Snapshot};
use crate::store::{ChangeStream, SelectionStore, WriteOutcome};
use crate::value::Value;

/// One open laboratory.
#[derive(Debug)]
pub struct Session {
    store: SelectionStore,
    fragment: String,
    repaint: RepaintScheduler,
    restore_issues: Vec<RestoreIssue>,
}

impl Session {
    /// Open the built-in laboratory, optionally restoring a link fragment.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn open(config: &LabConfig, fragment: Option<&str>) -> LabResult<Self> {
        let catalogue = laboratory::catalogue()?;
        Self::with_catalogue(Arc::new(catalogue), config, fragment)
    }

    /// Open a session over any catalogue.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn with_catalogue(catalogue: Arc<Catalogue>, config: &LabConfig, fragment: Option<&str>) -> LabResult<Self> {
        config.validate()?;

        let mut store = SelectionStore::new(catalogue, config);
        let fragment = fragment.unwrap_or_default().to_string();
        let restore_issues = link::restore(&mut store, &fragment);
        if config.log_restore_issues {
            for issue in &restore_issues {
                tracing::info!(%issue, "link restore");
            }
        }

        let mut repaint = RepaintScheduler::new();
        repaint.mark_loaded();

        tracing::info!(
            decisions = store.catalogue().len(),
            restored = !fragment.is_empty(),
            issues = restore_issues.len(),
            "session opened"
        );

        Ok(Self {
            store,
            fragment,
            repaint,
            restore_issues,
        })
    }

    /// Interactive edit of one decision.
    pub fn select(&mut self, id: &str, value: impl Into<Value>) -> WriteOutcome {
        let outcome = self.store.write(id, value.into());
        if outcome.is_applied() {
            self.touched();
        }
        outcome
    }

    /// Randomize every tweakable.
    pub fn shuffle(&mut self) -> usize {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Randomize every tweakable with the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let changed = self.store.shuffle_with(rng);
        self.touched();
        changed
    }

    /// Apply pasted snapshot text. Returns the number of applied entries.
    pub fn import_text(&mut self, text: &str) -> usize {
        let applied = snapshot::import_text(&mut self.store, text);
        if applied > 0 {
            self.touched();
        }
        applied
    }

    /// Apply snapshot text, failing instead of logging when it cannot be
    /// parsed.
    ///
    /// # Errors
    /// Returns a snapshot error if `text` is not a JSON object.
    pub fn try_import(&mut self, text: &str) -> LabResult<ApplySummary> {
        let summary = ParsedSnapshot::parse(text)?.apply(&mut self.store);
        if summary.applied > 0 {
            self.touched();
        }
        Ok(summary)
    }

    /// Encode the current selection as the link fragment and return it.
    pub fn save_link(&mut self) -> String {
        self.fragment = link::encode_fragment(&self.export());
        self.fragment.clone()
    }

    /// Current link fragment; empty after any live edit.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    #[must_use]
    pub fn export(&self) -> Snapshot {
        snapshot::export(&self.store)
    }

    /// Rows for rendering.
    #[must_use]
    pub fn view(&self) -> Vec<DecisionView> {
        live_view(&self.store)
    }

    #[must_use]
    pub fn report(&self) -> DiagnosticReport {
        discover_all(self.store.catalogue())
    }

    /// Diagnostics collected while restoring the opening link.
    #[must_use]
    pub fn restore_issues(&self) -> &[RestoreIssue] {
        &self.restore_issues
    }

    /// Consume the pending repaint. Called once per turn of the event loop.
    pub fn take_repaint(&mut self) -> bool {
        self.repaint.take()
    }

    #[must_use]
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn subscribe(&mut self) -> ChangeStream {
        self.store.subscribe()
    }

    fn touched(&mut self) {
        self.fragment.clear();
        self.repaint.schedule();
    }
}
