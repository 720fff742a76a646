//! Decision records: facts ("givens") and tweakables.
//!
//! A decision names a question (a snippet of code whose result is being
//! designed) and either fixes its answer (a fact) or offers a domain of
//! admissible answers with a default. Tweakables may carry an availability
//! predicate and a concern function; both only ever observe other
//! decisions through an [`Accessor`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::accessor::Accessor;
use crate::error::ValidationError;
use crate::value::Value;

/// Predicate deciding whether a decision currently applies.
///
/// Returns `None` when available, or the reason it is unavailable.
pub type AvailabilityFn = Arc<dyn Fn(&Accessor<'_>) -> Option<String> + Send + Sync>;

/// Function inferring a design tension from a decision's own value and the
/// values of the decisions it reads.
pub type ConcernFn = Arc<dyn Fn(&Value, &Accessor<'_>) -> Option<Concern> + Send + Sync>;

/// A non-empty, order-preserving, deduplicated list of admissible values.
///
/// - Empty lists are rejected.
/// - Duplicate values are ignored (first occurrence wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Domain(Vec<Value>);

impl Domain {
    /// Construct a validated domain for the decision `id`.
    pub fn new(id: &str, values: Vec<Value>) -> Result<Self, ValidationError> {
        let mut deduped: Vec<Value> = Vec::with_capacity(values.len());
        for v in values {
            if !deduped.contains(&v) {
                deduped.push(v);
            }
        }

        if deduped.is_empty() {
            return Err(ValidationError::EmptyDomain { id: id.to_string() });
        }
        Ok(Self(deduped))
    }

    /// Returns the values as a slice, in declaration order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// The first admissible value. Search mode resolves unset decisions to it.
    #[must_use]
    pub fn first(&self) -> &Value {
        &self.0[0]
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A human-readable explanation of a design tension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concern {
    /// Stable machine key, e.g. `no_negative_zero`.
    pub key: String,
    /// One-line heading.
    pub summary: String,
    /// Plain-text explanation.
    pub detail: String,
    /// Related discussion links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl Concern {
    /// Creates a concern without references.
    #[must_use]
    pub fn new(key: impl Into<String>, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            detail: detail.into(),
            references: Vec::new(),
        }
    }

    /// Adds a reference link.
    #[must_use]
    pub fn with_reference(mut self, url: impl Into<String>) -> Self {
        self.references.push(url.into());
        self
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⚠ {}", self.summary)
    }
}

/// Whether a decision currently applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable { reason: String },
}

impl Availability {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

/// Fact or tweakable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionKind {
    /// A fixed, non-editable answer shown for context.
    Fact { value: Value },
    /// An editable answer chosen from `domain`.
    Tweakable { domain: Domain, default: Value },
}

/// A single design decision.
#[derive(Clone)]
pub struct Decision {
    id: String,
    kind: DecisionKind,
    availability: Option<AvailabilityFn>,
    concern: Option<ConcernFn>,
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("has_availability", &self.availability.is_some())
            .field("has_concern", &self.concern.is_some())
            .finish()
    }
}

impl Decision {
    /// Creates a fact: a decision with exactly one fixed value.
    #[must_use]
    pub fn fact(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            kind: DecisionKind::Fact { value: value.into() },
            availability: None,
            concern: None,
        }
    }

    /// Creates a tweakable.
    ///
    /// # Validation
    /// - The domain must be non-empty (duplicates are dropped).
    /// - The default must be a member of the domain.
    pub fn tweakable<V, I>(
        id: impl Into<String>,
        domain: I,
        default: impl Into<Value>,
    ) -> Result<Self, ValidationError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let id = id.into();
        let domain = Domain::new(&id, domain.into_iter().map(Into::into).collect())?;
        let default = default.into();
        if !domain.contains(&default) {
            return Err(ValidationError::DefaultNotInDomain {
                id,
                default: default.to_string(),
            });
        }

        Ok(Self {
            id,
            kind: DecisionKind::Tweakable { domain, default },
            availability: None,
            concern: None,
        })
    }

    /// Attaches an availability predicate.
    #[must_use]
    pub fn with_availability<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Accessor<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.availability = Some(Arc::new(predicate));
        self
    }

    /// Attaches a concern function.
    #[must_use]
    pub fn with_concern<F>(mut self, concern: F) -> Self
    where
        F: Fn(&Value, &Accessor<'_>) -> Option<Concern> + Send + Sync + 'static,
    {
        self.concern = Some(Arc::new(concern));
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> &DecisionKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_fact(&self) -> bool {
        matches!(self.kind, DecisionKind::Fact { .. })
    }

    /// The admissible values, or `None` for a fact.
    #[must_use]
    pub const fn domain(&self) -> Option<&Domain> {
        match &self.kind {
            DecisionKind::Tweakable { domain, .. } => Some(domain),
            DecisionKind::Fact { .. } => None,
        }
    }

    /// The default value, or `None` for a fact.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        match &self.kind {
            DecisionKind::Tweakable { default, .. } => Some(default),
            DecisionKind::Fact { .. } => None,
        }
    }

    /// The fixed value of a fact.
    #[must_use]
    pub const fn fact_value(&self) -> Option<&Value> {
        match &self.kind {
            DecisionKind::Fact { value } => Some(value),
            DecisionKind::Tweakable { .. } => None,
        }
    }

    #[must_use]
    pub fn has_concern(&self) -> bool {
        self.concern.is_some()
    }

    /// Runs the availability predicate. An empty reason counts as available.
    #[must_use]
    pub fn availability(&self, accessor: &Accessor<'_>) -> Availability {
        match self.availability.as_ref().and_then(|f| f(accessor)) {
            Some(reason) if !reason.is_empty() => Availability::Unavailable { reason },
            _ => Availability::Available,
        }
    }

    /// Runs the concern function against `own`, the decision's value in the
    /// caller's evaluation mode.
    #[must_use]
    pub fn concern(&self, own: &Value, accessor: &Accessor<'_>) -> Option<Concern> {
        self.concern.as_ref().and_then(|f| f(own, accessor))
    }
}
