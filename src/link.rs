//! Shareable links.
//!
//! A link carries the exported snapshot as a percent-encoded location
//! fragment. Restoring a link applies it to a freshly initialized store and
//! collects diagnostics for the presentation layer instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::accessor::Accessor;
use crate::error::SnapshotError;
use crate::snapshot::{ParsedSnapshot, Snapshot};
use crate::store::SelectionStore;

/// Characters a URI keeps literal even though `urlencoding` escapes them.
const URI_LITERALS: [(&str, &str); 16] = [
    ("%3B", ";"),
    ("%2C", ","),
    ("%2F", "/"),
    ("%3F", "?"),
    ("%3A", ":"),
    ("%40", "@"),
    ("%26", "&"),
    ("%3D", "="),
    ("%2B", "+"),
    ("%24", "$"),
    ("%23", "#"),
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// Percent-encode a snapshot for use as a location fragment (without `#`).
///
/// URI punctuation is left literal, so the fragment reads back with a
/// whole-URI decoder as well as with [`decode_fragment`].
#[must_use]
pub fn encode_fragment(snapshot: &Snapshot) -> String {
    let mut encoded = urlencoding::encode(&snapshot.to_json()).into_owned();
    for (escape, literal) in URI_LITERALS {
        encoded = encoded.replace(escape, literal);
    }
    encoded
}

fn decode_text(fragment: &str) -> Result<String, SnapshotError> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| SnapshotError::Decode {
            message: err.to_string(),
        })
}

/// Decode a location fragment. A leading `#` is ignored.
///
/// # Errors
/// - `Decode` if the fragment is not valid percent-encoded UTF-8.
/// - `Parse` / `NotAnObject` if the decoded text is not a JSON object.
pub fn decode_fragment(fragment: &str) -> Result<ParsedSnapshot, SnapshotError> {
    ParsedSnapshot::parse(&decode_text(fragment)?)
}

/// Decode a fragment for restore. Any JSON except `null` is accepted and
/// enumerated; see [`ParsedSnapshot`] for how non-objects yield keys.
fn decode_for_restore(fragment: &str) -> Result<ParsedSnapshot, SnapshotError> {
    let json: serde_json::Value = serde_json::from_str(&decode_text(fragment)?)?;
    ParsedSnapshot::from_link_json(json)
}

/// A problem noticed while restoring a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum RestoreIssue {
    /// The link names something that is not a tweakable.
    UnknownItem(String),
    /// An available tweakable was missing from the link and kept its default.
    NotSetByLink(String),
}

impl fmt::Display for RestoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem(key) => write!(f, "Unknown item in url: '{key}'"),
            Self::NotSetByLink(id) => write!(f, "'{id}' was not set by the URL"),
        }
    }
}

/// Apply a link fragment to `store`.
///
/// An empty fragment does nothing. A fragment that cannot be decoded, or
/// that decodes to `null`, is logged and leaves the store untouched. Arrays
/// and strings contribute their positions as (unknown) keys; numbers and
/// booleans contribute nothing. Otherwise every entry goes through
/// the validated write, then each available tweakable the link did not
/// mention is reported.
pub fn restore(store: &mut SelectionStore, fragment: &str) -> Vec<RestoreIssue> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return Vec::new();
    }

    let parsed = match decode_for_restore(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!(error = %err, "could not restore selection from link");
            return Vec::new();
        }
    };

    let summary = parsed.apply(store);
    let mut issues: Vec<RestoreIssue> = summary.unknown.into_iter().map(RestoreIssue::UnknownItem).collect();

    let accessor = Accessor::live(store);
    for decision in store.catalogue().tweakables() {
        if parsed.keys().any(|k| k == decision.id()) {
            continue;
        }
        if !decision.availability(&accessor).is_available() {
            continue;
        }
        issues.push(RestoreIssue::NotSetByLink(decision.id().to_string()));
    }

    tracing::debug!(applied = summary.applied, issues = issues.len(), "restored selection from link");
    issues
}
