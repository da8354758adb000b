//! # Rule Interface and Path Matching
//!
//! [`ProgressCheck`] is the contract every validation rule implements; the
//! engine drives it through the observe phase (once per imported path) and
//! the post-scan phase (exactly once per scan). [`PathMatcher`] is the pure
//! predicate most rules use to decide whether an imported path belongs to
//! their domain.

use crate::error::ScanResult;
use crate::package::{PackageId, PathAction};
use crate::report::ViolationReporter;
use crate::tree::{ContentTree, NodeRef};

/// A content-package validation rule.
///
/// Implementations own whatever deferred state they need (typically a
/// [`crate::registry::DeferredRegistry`]); after
/// [`after_scan_package`](Self::after_scan_package) returns, the instance
/// must be ready for the next scan with no residue from this one.
pub trait ProgressCheck {
    /// Stable name of this rule, used in scan logging.
    fn name(&self) -> &'static str;

    /// Observe one imported path. Called once per path during the
    /// streaming import; must not block. May append violations for
    /// problems visible from the node alone.
    fn imported_path(
        &mut self,
        package: &PackageId,
        path: &str,
        node: NodeRef<'_>,
        action: PathAction,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()>;

    /// Run the post-scan pass against the fully materialized tree.
    /// Called exactly once after the import completes; drains deferred
    /// state and may append violations.
    fn after_scan_package(
        &mut self,
        scan_package: &PackageId,
        tree: &ContentTree,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()>;
}

/// Pure prefix + exact-node-type predicate over imported paths.
///
/// Matches iff the path starts with the configured prefix, optionally
/// contains a configured infix, and the node's qualified type equals the
/// configured type name. No side effects; independent matcher instances
/// share nothing.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    prefix: String,
    infix: Option<String>,
    node_type: String,
}

impl PathMatcher {
    /// Match paths under `prefix` whose node type equals `node_type`.
    pub fn new(prefix: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            infix: None,
            node_type: node_type.into(),
        }
    }

    /// Additionally require the path to contain the given fragment.
    pub fn containing(mut self, infix: impl Into<String>) -> Self {
        self.infix = Some(infix.into());
        self
    }

    /// The configured path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decide whether an imported path/node belongs to this domain.
    pub fn matches(&self, path: &str, node: NodeRef<'_>) -> bool {
        path.starts_with(&self.prefix)
            && self
                .infix
                .as_deref()
                .map_or(true, |fragment| path.contains(fragment))
            && node.is_node_type(&self.node_type)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
