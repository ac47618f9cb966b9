//! Per-pass identifier generation.
//!
//! A [`ReferenceGenerator`] is explicit state owned by whoever runs an
//! encode. It remembers every identifier it issued since the last
//! [`reset`](ReferenceGenerator::reset) plus a set of reserved values that
//! must never be produced (permanent references already in the graph).
//!
//! # Invariants
//!
//! - Output is `prefix + 20 hex digits + 2 decimal digits`, 24 characters.
//! - The same `(prefix, context)` twice yields suffixes `01` then `02`.
//! - After `reset`, the same call sequence yields the same identifiers,
//!   provided the same values are reserved.

use std::collections::{HashMap, HashSet};

use pbx_types::ObjectKind;
use tracing::debug;

use crate::error::{RefError, RefResult};
use crate::hasher::IdentifierHasher;
use crate::prefix::reference_prefix;

const MAX_SUFFIX: u8 = 99;

/// Deterministic reference generator.
pub struct ReferenceGenerator {
    hasher: IdentifierHasher,
    issued: HashSet<String>,
    reserved: HashSet<String>,
    next_suffix: HashMap<String, u8>,
}

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self {
            hasher: IdentifierHasher::REFERENCE,
            issued: HashSet::new(),
            reserved: HashSet::new(),
            next_suffix: HashMap::new(),
        }
    }

    /// Clear all per-pass state, reservations included.
    pub fn reset(&mut self) {
        self.issued.clear();
        self.reserved.clear();
        self.next_suffix.clear();
    }

    /// Mark a value as taken so it is never generated.
    pub fn reserve(&mut self, value: impl Into<String>) {
        self.reserved.insert(value.into());
    }

    /// Reserve every value from an iterator.
    pub fn reserve_all<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(values.into_iter().map(Into::into));
    }

    /// Number of identifiers issued since the last reset.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Generate the identifier for an object of `kind` described by
    /// `context`.
    pub fn generate(&mut self, kind: ObjectKind, context: &str) -> RefResult<String> {
        self.generate_with_prefix(reference_prefix(kind), context)
    }

    /// Generate with an explicit prefix.
    pub fn generate_with_prefix(&mut self, prefix: &str, context: &str) -> RefResult<String> {
        let body = self.hasher.body(prefix, context);
        let stem = format!("{prefix}{body}");
        let start = self.next_suffix.get(&stem).copied().unwrap_or(1);

        for suffix in start..=MAX_SUFFIX {
            let candidate = format!("{stem}{suffix:02}");
            if self.issued.contains(&candidate) || self.reserved.contains(&candidate) {
                continue;
            }
            self.next_suffix.insert(stem, suffix + 1);
            self.issued.insert(candidate.clone());
            debug!(reference = %candidate, context, "generated reference");
            return Ok(candidate);
        }

        Err(RefError::SuffixExhausted {
            prefix: prefix.to_string(),
            body,
        })
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReferenceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceGenerator")
            .field("issued", &self.issued.len())
            .field("reserved", &self.reserved.len())
            .finish()
    }
}
