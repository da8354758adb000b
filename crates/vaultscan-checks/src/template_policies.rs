//! # Template-to-Policy Mapping Consistency
//!
//! Editable templates live under `<conf-root>/settings/wcm/templates` and
//! reference policies kept in the sibling `…/settings/wcm/policies` page.
//! The consistency a package must preserve is cross-node, so the whole
//! rule defers: templates are only collected during import, and the deep
//! validation runs once the tree is materialized:
//!
//! 1. every `cq:policy` reference anywhere under the template's
//!    `policies/jcr:content` mapping page must resolve;
//! 2. in the `initial` and `structure` pages, every empty layout container
//!    must be mapped to a resolvable policy that declares its allowed
//!    components.

use vaultscan_core::names::CQ_TEMPLATE;
use vaultscan_core::walker::{check_empty_containers, check_policy_references};
use vaultscan_core::{
    path, ContentTree, DeferredRegistry, NodeRef, PackageId, PathAction, PathMatcher,
    ProgressCheck, ScanResult, ViolationReporter,
};

/// Segment run marking the wcm settings base inside a conf tree.
const SETTINGS_WCM: [&str; 2] = ["settings", "wcm"];
const SETTINGS_WCM_INFIX: &str = "/settings/wcm";

const POLICIES_PAGE: &str = "policies/jcr:content";
const INITIAL_PAGE: &str = "initial/jcr:content";
const STRUCTURE_PAGE: &str = "structure/jcr:content";
const POLICIES_NODE: &str = "policies";

const DEFAULT_CONF_ROOT: &str = "/conf/classic-app";

/// Validates template-to-policy mapping consistency under a conf root.
#[derive(Debug)]
pub struct TemplatePolicies {
    matcher: PathMatcher,
    registry: DeferredRegistry,
}

impl Default for TemplatePolicies {
    fn default() -> Self {
        Self::new(DEFAULT_CONF_ROOT)
    }
}

impl TemplatePolicies {
    /// Validate templates imported under the given conf root.
    pub fn new(conf_root: impl Into<String>) -> Self {
        Self {
            matcher: PathMatcher::new(conf_root, CQ_TEMPLATE).containing(SETTINGS_WCM_INFIX),
            registry: DeferredRegistry::new(),
        }
    }

    fn validate_template(
        package: &PackageId,
        template_path: &str,
        tree: &ContentTree,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        tracing::debug!(template = template_path, "validating template policies");
        let template = tree.node(template_path)?;
        let Some(mappings_page) = template.get_node(POLICIES_PAGE) else {
            return Ok(());
        };
        // The matcher guarantees the settings/wcm run is present.
        let Some(wcm_base) = path::prefix_through(template_path, &SETTINGS_WCM) else {
            return Ok(());
        };
        let policies_base = path::join(&wcm_base, POLICIES_NODE);
        if !tree.node_exists(&policies_base) {
            reporter.minor(
                package,
                format!(
                    "{template_path}: failed to find policies page in settings {policies_base}"
                ),
            );
        } else {
            check_policy_references(package, &policies_base, mappings_page, reporter)?;
        }
        for page_rel in [INITIAL_PAGE, STRUCTURE_PAGE] {
            if let Some(template_page) = template.get_node(page_rel) {
                check_empty_containers(
                    package,
                    template_page,
                    mappings_page,
                    &policies_base,
                    reporter,
                )?;
            }
        }
        Ok(())
    }
}

impl ProgressCheck for TemplatePolicies {
    fn name(&self) -> &'static str {
        "template-policies"
    }

    fn imported_path(
        &mut self,
        package: &PackageId,
        path: &str,
        node: NodeRef<'_>,
        _action: PathAction,
        _reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        if self.matcher.matches(path, node) {
            self.registry.record(path, package);
        }
        Ok(())
    }

    fn after_scan_package(
        &mut self,
        _scan_package: &PackageId,
        tree: &ContentTree,
        reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        for (template_path, package) in self.registry.drain_all() {
            Self::validate_template(&package, &template_path, tree, reporter)?;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
