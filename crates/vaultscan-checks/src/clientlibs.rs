//! # Client Library Conventions
//!
//! Client library folders must set a boolean `allowProxy` so their content
//! is served through the proxy servlet, and any library shipping
//! JavaScript must pin a processor configuration that either skips
//! minification or runs the closure compiler in ECMASCRIPT6 mode.
//!
//! The `allowProxy` check runs at import time (it needs nothing but the
//! node itself); the `jsProcessor` check is deferred to the post-scan pass
//! because `js.txt` may be imported after its folder.

use vaultscan_core::names::CQ_CLIENT_LIBRARY_FOLDER;
use vaultscan_core::tree::PropertyValue;
use vaultscan_core::{
    ContentTree, DeferredRegistry, NodeRef, PackageId, PathAction, PathMatcher, ProgressCheck,
    ScanResult, Violation, ViolationReporter,
};

/// Boolean property opting a clientlib into the proxy servlet.
pub const PROP_ALLOW_PROXY: &str = "allowProxy";
/// Multi-valued string property configuring JavaScript processing.
pub const PROP_JS_PROCESSOR: &str = "jsProcessor";

const JS_SOURCE_LIST: &str = "js.txt";
const MIN_PREFIX: &str = "min:";
const MIN_GCC_PREFIX: &str = "min:gcc";
const ES6_FLAG: &str = ";languageIn=ECMASCRIPT6";

const DEFAULT_CLIENTLIBS_ROOT: &str = "/apps/classic-app/clientlibs/";

/// Validates client library folders under a configured root.
#[derive(Debug)]
pub struct Clientlibs {
    matcher: PathMatcher,
    registry: DeferredRegistry,
}

impl Default for Clientlibs {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENTLIBS_ROOT)
    }
}

impl Clientlibs {
    /// Validate client library folders under the given root prefix.
    pub fn new(clientlibs_root: impl Into<String>) -> Self {
        Self {
            matcher: PathMatcher::new(clientlibs_root, CQ_CLIENT_LIBRARY_FOLDER),
            registry: DeferredRegistry::new(),
        }
    }

    fn validate_js_processor(
        package: &PackageId,
        path: &str,
        values: &[String],
        reporter: &mut ViolationReporter,
    ) {
        let mut min_specified = false;
        for value in values {
            if value.starts_with(MIN_PREFIX) {
                min_specified = true;
                if value.starts_with(MIN_GCC_PREFIX) && !value.contains(ES6_FLAG) {
                    reporter.report(Violation::new(
                        package.clone(),
                        format!(
                            "{path}: jsProcessor must specify [min:none] or [min:gcc{ES6_FLAG}]"
                        ),
                    ));
                }
            }
        }
        if !min_specified {
            reporter.report(Violation::new(
                package.clone(),
                format!("{path}: jsProcessor must specify [min:none] or [min:gcc{ES6_FLAG}]"),
            ));
        }
    }
}

impl ProgressCheck for Clientlibs {
    fn name(&self) -> &'static str {
        "clientlibs"
    }

    fn imported_path(
        &mut self,
        package: &PackageId,
        path: &str,
        node: NodeRef<'_>,
        _action: PathAction,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        if !self.matcher.matches(path, node) {
            return Ok(());
        }
        self.registry.record(path, package);
        let proxied = matches!(
            node.get_property(PROP_ALLOW_PROXY),
            Some(PropertyValue::Boolean(_))
        );
        if !proxied {
            reporter.report(Violation::new(
                package.clone(),
                format!("{path}: clientlib does not set allowProxy"),
            ));
        }
        Ok(())
    }

    fn after_scan_package(
        &mut self,
        _scan_package: &PackageId,
        tree: &ContentTree,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        for (path, package) in self.registry.drain_all() {
            let Some(node) = tree.get(&path) else {
                continue;
            };
            if !node.has_node(JS_SOURCE_LIST) {
                continue;
            }
            match node.get_property(PROP_JS_PROCESSOR) {
                Some(PropertyValue::Strings(values)) => {
                    Self::validate_js_processor(&package, &path, values, reporter);
                }
                _ => {
                    reporter.report(Violation::new(
                        package.clone(),
                        format!("{path}: clientlib does not specify a String[] jsProcessor property"),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vaultscan_core::names::NT_UNSTRUCTURED;

    const LIB: &str = "/apps/classic-app/clientlibs/site";

    fn pkg() -> PackageId {
        PackageId::new("com.example", "ui.apps", "1.0.0")
    }

    fn clientlib_tree() -> ContentTree {
        let mut tree = ContentTree::new();
        tree.put_node(LIB, CQ_CLIENT_LIBRARY_FOLDER);
        tree
    }

    fn run_scan(tree: &ContentTree) -> Vec<Violation> {
        let mut check = Clientlibs::default();
        let mut reporter = ViolationReporter::new();
        tree.root()
            .walk(&mut |node| {
                check.imported_path(
                    &pkg(),
                    node.path(),
                    node,
                    PathAction::Added,
                    &mut reporter,
                )
            })
            .unwrap();
        check
            .after_scan_package(&pkg(), tree, &mut reporter)
            .unwrap();
        reporter.into_violations()
    }

    #[test]
    fn test_missing_allow_proxy_is_reported_once() {
        let tree = clientlib_tree();
        let violations = run_scan(&tree);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].description.contains("does not set allowProxy"));
        assert_eq!(violations[0].description, format!("{LIB}: clientlib does not set allowProxy"));
    }

    #[test]
    fn test_non_boolean_allow_proxy_is_reported() {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::String("true".to_string()))
            .unwrap();
        let violations = run_scan(&tree);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].description.contains("does not set allowProxy"));
    }

    #[test]
    fn test_boolean_allow_proxy_passes() {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::Boolean(true))
            .unwrap();
        assert!(run_scan(&tree).is_empty());
    }

    #[test]
    fn test_folder_outside_root_is_ignored() {
        let mut tree = ContentTree::new();
        tree.put_node("/libs/other/clientlibs/site", CQ_CLIENT_LIBRARY_FOLDER);
        assert!(run_scan(&tree).is_empty());
    }

    #[test]
    fn test_wrong_node_type_is_ignored() {
        let mut tree = ContentTree::new();
        tree.put_node(LIB, NT_UNSTRUCTURED);
        assert!(run_scan(&tree).is_empty());
    }

    fn js_clientlib(values: &[&str]) -> ContentTree {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::Boolean(true))
            .unwrap();
        tree.put_node(&format!("{LIB}/js.txt"), NT_UNSTRUCTURED);
        tree.put_property(
            LIB,
            PROP_JS_PROCESSOR,
            PropertyValue::Strings(values.iter().map(|s| s.to_string()).collect()),
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_gcc_without_es6_is_reported_once() {
        let violations = run_scan(&js_clientlib(&["min:gcc"]));
        assert_eq!(violations.len(), 1);
        assert!(violations[0]
            .description
            .contains("must specify [min:none] or [min:gcc;languageIn=ECMASCRIPT6]"));
    }

    #[test]
    fn test_gcc_with_es6_passes() {
        assert!(run_scan(&js_clientlib(&["min:gcc;languageIn=ECMASCRIPT6"])).is_empty());
    }

    #[test]
    fn test_min_none_passes() {
        assert!(run_scan(&js_clientlib(&["min:none"])).is_empty());
    }

    #[test]
    fn test_no_min_value_at_all_is_reported() {
        let violations = run_scan(&js_clientlib(&["pre:something"]));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].description.contains("must specify [min:none]"));
    }

    #[test]
    fn test_missing_js_processor_property() {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::Boolean(true))
            .unwrap();
        tree.put_node(&format!("{LIB}/js.txt"), NT_UNSTRUCTURED);
        let violations = run_scan(&tree);
        assert_eq!(violations.len(), 1);
        assert!(violations[0]
            .description
            .contains("does not specify a String[] jsProcessor property"));
    }

    #[test]
    fn test_single_valued_js_processor_is_rejected() {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::Boolean(true))
            .unwrap();
        tree.put_node(&format!("{LIB}/js.txt"), NT_UNSTRUCTURED);
        tree.put_property(
            LIB,
            PROP_JS_PROCESSOR,
            PropertyValue::String("min:none".to_string()),
        )
        .unwrap();
        let violations = run_scan(&tree);
        assert_eq!(violations.len(), 1);
        assert!(violations[0]
            .description
            .contains("does not specify a String[] jsProcessor property"));
    }

    #[test]
    fn test_clientlib_without_js_source_skips_processor_check() {
        let mut tree = clientlib_tree();
        tree.put_property(LIB, PROP_ALLOW_PROXY, PropertyValue::Boolean(true))
            .unwrap();
        assert!(run_scan(&tree).is_empty());
    }

    #[test]
    fn test_registry_is_reusable_after_post_scan() {
        let tree = js_clientlib(&["min:gcc"]);
        let mut check = Clientlibs::default();
        let mut reporter = ViolationReporter::new();
        tree.root()
            .walk(&mut |node| {
                check.imported_path(&pkg(), node.path(), node, PathAction::Added, &mut reporter)
            })
            .unwrap();
        check.after_scan_package(&pkg(), &tree, &mut reporter).unwrap();
        let after_first = reporter.len();
        // Second post-scan with no new imports must add nothing.
        check.after_scan_package(&pkg(), &tree, &mut reporter).unwrap();
        assert_eq!(reporter.len(), after_first);
    }
}
