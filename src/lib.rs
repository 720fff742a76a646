//! # tweaklab - an interactive design-space laboratory
//!
//! tweaklab models a set of language-design decisions, each with a finite
//! domain of possible outcomes, and warns when the selected combination
//! creates a known design tension. It ships with the Record & Tuple
//! laboratory, but any catalogue of decisions can be explored.
//!
//! ## Core Concepts
//!
//! - **Decision**: an editable design choice (tweakable) or a fixed fact
//! - **Availability**: whether a decision applies given the others
//! - **Concern**: a warning raised by a combination of values
//! - **Discovery**: exhaustive search for every concern a decision can raise
//! - **Snapshot / link**: the shareable form of a selection
//!
//! ## Usage
//!
//! ```rust
//! use tweaklab::{laboratory, LabConfig, Session};
//!
//! let mut session = Session::open(&LabConfig::default(), None)?;
//! session.select(laboratory::STORE_NEGATIVE_ZERO, false);
//!
//! let concern = tweaklab::live_concern(session.store(), laboratory::STORE_NEGATIVE_ZERO);
//! assert_eq!(concern.map(|c| c.key).as_deref(), Some("no_negative_zero"));
//!
//! let link = session.save_link();
//! assert!(!link.is_empty());
//! # Ok::<(), tweaklab::LabError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod accessor;
pub mod catalogue;
pub mod config;
pub mod decision;
pub mod discovery;
pub mod error;
pub mod evaluate;
pub mod laboratory;
pub mod link;
pub mod repaint;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod value;

pub use accessor::{Accessor, DiscoveredSlot, PresetSet};
pub use catalogue::Catalogue;
pub use config::LabConfig;
pub use decision::{Availability, Concern, Decision, DecisionKind, Domain};
pub use discovery::{discover_all, explore, DiagnosticReport, Outcome, ReportEntry};
pub use error::{LabError, LabResult, SnapshotError, ValidationError};
pub use evaluate::{live_concern, live_view, DecisionView};
pub use link::{decode_fragment, encode_fragment, restore, RestoreIssue};
pub use repaint::RepaintScheduler;
pub use session::Session;
pub use snapshot::{export, import_text, ApplySummary, ParsedSnapshot, Snapshot};
pub use store::{ChangeEvent, ChangeStream, SelectionStore, SubscriptionId, WriteOutcome};
pub use value::Value;
