//! # Component Group Hygiene
//!
//! Every authorable component must declare a `componentGroup`, and the
//! group must come from the configured allow-list. Components under the
//! form subtree use a stricter list so form widgets cannot leak into the
//! general content groups. Purely an import-time rule — nothing to defer.

use std::collections::BTreeSet;

use vaultscan_core::names::CQ_COMPONENT;
use vaultscan_core::{
    ContentTree, NodeRef, PackageId, PathAction, PathMatcher, ProgressCheck, ScanResult,
    Violation, ViolationReporter,
};

/// Property naming the group a component is authored under.
pub const PROP_COMPONENT_GROUP: &str = "componentGroup";

const DEFAULT_COMPONENTS_ROOT: &str = "/apps/classic-app/components/";
const DEFAULT_FORM_ROOT: &str = "/apps/classic-app/components/form/";
const DEFAULT_SCOPE: &str = "classic-app";

/// Validates component group membership under a configured root.
#[derive(Debug)]
pub struct ComponentGroups {
    matcher: PathMatcher,
    form_root: String,
    scope: String,
    form_groups: BTreeSet<String>,
    valid_groups: BTreeSet<String>,
}

impl Default for ComponentGroups {
    fn default() -> Self {
        let hidden = ".hidden".to_string();
        let form = "AEM Classic App - Form".to_string();
        let form_groups = BTreeSet::from([hidden.clone(), form.clone()]);
        let valid_groups = BTreeSet::from([
            hidden,
            "AEM Classic App - Content".to_string(),
            "AEM Classic App - Structure".to_string(),
            form,
        ]);
        Self::new(
            DEFAULT_COMPONENTS_ROOT,
            DEFAULT_FORM_ROOT,
            DEFAULT_SCOPE,
            form_groups,
            valid_groups,
        )
    }
}

impl ComponentGroups {
    /// Validate components under `components_root`; components under
    /// `form_root` must use a group from `form_groups`, all others one
    /// from `valid_groups`. `scope` names the rule set in messages.
    pub fn new(
        components_root: impl Into<String>,
        form_root: impl Into<String>,
        scope: impl Into<String>,
        form_groups: BTreeSet<String>,
        valid_groups: BTreeSet<String>,
    ) -> Self {
        Self {
            matcher: PathMatcher::new(components_root, CQ_COMPONENT),
            form_root: form_root.into(),
            scope: scope.into(),
            form_groups,
            valid_groups,
        }
    }

    fn format_groups(groups: &BTreeSet<String>) -> String {
        let joined = groups.iter().cloned().collect::<Vec<_>>().join(", ");
        format!("[{joined}]")
    }
}

impl ProgressCheck for ComponentGroups {
    fn name(&self) -> &'static str {
        "component-groups"
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
        let Some(value) = node.get_property(PROP_COMPONENT_GROUP) else {
            reporter.report(Violation::new(
                package.clone(),
                format!("{path}: component missing componentGroup property"),
            ));
            return Ok(());
        };
        let group = value.string()?;
        if path.starts_with(&self.form_root) && !self.form_groups.contains(&group) {
            reporter.report(Violation::new(
                package.clone(),
                format!(
                    "{path}: invalid group '{group}' for form component ({})",
                    Self::format_groups(&self.form_groups)
                ),
            ));
        } else if !self.valid_groups.contains(&group) {
            reporter.report(Violation::new(
                package.clone(),
                format!(
                    "{path}: invalid group '{group}' for {} component ({})",
                    self.scope,
                    Self::format_groups(&self.valid_groups)
                ),
            ));
        }
        Ok(())
    }

    fn after_scan_package(
        &mut self,
        _scan_package: &PackageId,
        _tree: &ContentTree,
        _reporter: &mut ViolationReporter,
    ) -> ScanResult<()> {
        // Import-time rule; nothing deferred.
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
