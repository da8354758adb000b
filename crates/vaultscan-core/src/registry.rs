//! # Deferred Registry
//!
//! Per-rule buffer of matched paths awaiting the post-scan pass. Populated
//! during the streaming import phase, drained exactly once after the tree
//! is materialized. Keyed by path with last-write-wins overwrite semantics;
//! insertion order is preserved for first-seen paths and an overwrite does
//! not move a path in the order.
//!
//! One registry is exclusively owned by one rule instance; the lifecycle is
//! strictly populate → drain per scan, which is what makes rule instances
//! reusable across scans.

use std::collections::HashMap;

use crate::package::PackageId;

/// Insertion-ordered path → package buffer for one rule instance.
#[derive(Debug, Default)]
pub struct DeferredRegistry {
    order: Vec<String>,
    entries: HashMap<String, PackageId>,
}

impl DeferredRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matched path for the given package. A duplicate path
    /// overwrites the package without duplicating or reordering the entry.
    pub fn record(&mut self, path: impl Into<String>, package: &PackageId) {
        let path = path.into();
        tracing::debug!(%path, package = %package, "deferred for post-scan");
        if self.entries.insert(path.clone(), package.clone()).is_none() {
            self.order.push(path);
        }
    }

    /// The package currently recorded for a path, if any.
    pub fn get(&self, path: &str) -> Option<&PackageId> {
        self.entries.get(path)
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drain all entries as a lazy, one-shot sequence in insertion order.
    /// The registry is empty once the call returns, whether or not the
    /// iterator is fully consumed.
    pub fn drain_all(&mut self) -> impl Iterator<Item = (String, PackageId)> {
        let order = std::mem::take(&mut self.order);
        let mut entries = std::mem::take(&mut self.entries);
        order.into_iter().filter_map(move |path| {
            let package = entries.remove(&path)?;
            Some((path, package))
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
