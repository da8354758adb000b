//! # Scan Driver
//!
//! Fans the import-event stream out to a set of registered rules and runs
//! every rule's post-scan pass once the tree is materialized. The scanner
//! owns the reporter; rules stay ignorant of each other and of how events
//! are produced.
//!
//! The driver is strictly single-threaded and two-phase per scan: all
//! `imported_path` observations first, then exactly one
//! `after_scan_package` per rule. A tree-access failure from any rule
//! aborts the scan immediately.

use crate::check::ProgressCheck;
use crate::error::ScanResult;
use crate::package::{PackageId, PathAction};
use crate::report::{Violation, ViolationReporter};
use crate::tree::{ContentTree, NodeRef};

/// Drives registered rules through the observe and post-scan phases.
#[derive(Default)]
pub struct Scanner {
    checks: Vec<Box<dyn ProgressCheck>>,
    reporter: ViolationReporter,
}

impl Scanner {
    /// Create a scanner with no rules registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Registration order is dispatch order.
    pub fn register(&mut self, check: Box<dyn ProgressCheck>) {
        tracing::debug!(check = check.name(), "registered progress check");
        self.checks.push(check);
    }

    /// Deliver one import event to every registered rule.
    pub fn imported_path(
        &mut self,
        package: &PackageId,
        path: &str,
        node: NodeRef<'_>,
        action: PathAction,
    ) -> ScanResult<()> {
        for check in &mut self.checks {
            check.imported_path(package, path, node, action, &mut self.reporter)?;
        }
        Ok(())
    }

    /// Run every rule's post-scan pass against the materialized tree.
    pub fn after_scan_package(
        &mut self,
        scan_package: &PackageId,
        tree: &ContentTree,
    ) -> ScanResult<()> {
        for check in &mut self.checks {
            tracing::debug!(check = check.name(), package = %scan_package, "post-scan pass");
            check.after_scan_package(scan_package, tree, &mut self.reporter)?;
        }
        Ok(())
    }

    /// Replay a materialized tree as a stream of `Added` import events, in
    /// depth-first pre-order. Stands in for the package-import mechanism
    /// during simulation and tests.
    pub fn import_tree(&mut self, package: &PackageId, tree: &ContentTree) -> ScanResult<()> {
        tracing::debug!(package = %package, nodes = tree.len(), "replaying import");
        tree.root().walk(&mut |node| {
            for check in &mut self.checks {
                check.imported_path(
                    package,
                    node.path(),
                    node,
                    PathAction::Added,
                    &mut self.reporter,
                )?;
            }
            Ok(())
        })
    }

    /// Full simulated scan of one package: replay the tree as import
    /// events, then run the post-scan passes.
    pub fn scan_package(&mut self, package: &PackageId, tree: &ContentTree) -> ScanResult<()> {
        self.import_tree(package, tree)?;
        self.after_scan_package(package, tree)
    }

    /// The violations accumulated so far, in detection order.
    pub fn violations(&self) -> &[Violation] {
        self.reporter.violations()
    }

    /// Consume the scanner, yielding the accumulated violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.reporter.into_violations()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NT_UNSTRUCTURED;
    use crate::registry::DeferredRegistry;

    /// Rule that records every path under a prefix and reports each one
    /// during post-scan.
    struct RecordUnderPrefix {
        prefix: &'static str,
        registry: DeferredRegistry,
    }

    impl ProgressCheck for RecordUnderPrefix {
        fn name(&self) -> &'static str {
            "record-under-prefix"
        }

        fn imported_path(
            &mut self,
            package: &PackageId,
            path: &str,
            _node: NodeRef<'_>,
            _action: PathAction,
            _reporter: &mut ViolationReporter,
        ) -> ScanResult<()> {
            if path.starts_with(self.prefix) {
                self.registry.record(path, package);
            }
            Ok(())
        }

        fn after_scan_package(
            &mut self,
            _scan_package: &PackageId,
            _tree: &ContentTree,
            reporter: &mut ViolationReporter,
        ) -> ScanResult<()> {
            for (path, package) in self.registry.drain_all() {
                reporter.minor(&package, format!("{path}: seen"));
            }
            Ok(())
        }
    }

    fn pkg() -> PackageId {
        PackageId::new("com.example", "all", "0.1.0")
    }

    #[test]
    fn test_scan_replays_then_drains() {
        let mut tree = ContentTree::new();
        tree.put_node("/apps/app/a", NT_UNSTRUCTURED);
        tree.put_node("/apps/app/b", NT_UNSTRUCTURED);
        tree.put_node("/content/ignored", NT_UNSTRUCTURED);

        let mut scanner = Scanner::new();
        scanner.register(Box::new(RecordUnderPrefix {
            prefix: "/apps/",
            registry: DeferredRegistry::new(),
        }));
        scanner.scan_package(&pkg(), &tree).unwrap();

        let descriptions: Vec<_> = scanner
            .violations()
            .iter()
            .map(|v| v.description.as_str())
            .collect();
        assert_eq!(descriptions, ["/apps/app/a: seen", "/apps/app/b: seen"]);
    }

    #[test]
    fn test_post_scan_is_idempotent_after_drain() {
        let mut tree = ContentTree::new();
        tree.put_node("/apps/app/a", NT_UNSTRUCTURED);

        let mut scanner = Scanner::new();
        scanner.register(Box::new(RecordUnderPrefix {
            prefix: "/apps/",
            registry: DeferredRegistry::new(),
        }));
        scanner.scan_package(&pkg(), &tree).unwrap();
        let after_first = scanner.violations().len();
        scanner.after_scan_package(&pkg(), &tree).unwrap();
        assert_eq!(scanner.violations().len(), after_first);
    }
}
