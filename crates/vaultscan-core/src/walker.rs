//! # Recursive Consistency Walkers
//!
//! Depth-first validation passes over a subtree. Both walkers follow the
//! accumulate-all policy: a failed resolution is reported and the walk
//! continues — a single broken reference must never mask the next one.
//! Only tree-access failures abort.
//!
//! Two variants:
//!
//! - [`check_policy_references`] resolves the policy reference declared at
//!   every node of the subtree and reports each one that points nowhere.
//! - [`check_empty_containers`] classifies nodes by resolved resource type
//!   and, for container nodes with no children, requires a policy mapping
//!   at the node's root-relative path, a resolvable policy behind it, and
//!   an allowed-components property on the policy.

use crate::error::ScanResult;
use crate::names::{CQ_IS_CONTAINER, CQ_POLICY};
use crate::package::PackageId;
use crate::path;
use crate::report::ViolationReporter;
use crate::resolve::{resolve_policy, resolve_reference, resolve_resource_type};
use crate::tree::NodeRef;

/// Property naming the components a policy allows.
pub const PROP_ALLOWED_COMPONENTS: &str = "components";

/// Walk the subtree under `root` and report every policy reference that
/// fails to resolve against `policies_base`, as a minor violation naming
/// the declaring node's own path and the raw reference string.
pub fn check_policy_references(
    package: &PackageId,
    policies_base: &str,
    root: NodeRef<'_>,
    reporter: &mut ViolationReporter,
) -> ScanResult<()> {
    root.walk(&mut |node| {
        if node.has_property(CQ_POLICY) {
            let reference = node.property(CQ_POLICY)?.string()?;
            if resolve_reference(node.tree(), policies_base, &reference).is_none() {
                reporter.minor(
                    package,
                    format!(
                        "{}: failed to resolve cq:policy path {reference}",
                        node.path()
                    ),
                );
            }
        }
        Ok(())
    })
}

/// Whether a resolved resource-type node declares itself a container.
///
/// True for a boolean `true` as well as the literal string `"true"`.
fn is_container(resource_type: NodeRef<'_>) -> ScanResult<bool> {
    match resource_type.get_property(CQ_IS_CONTAINER) {
        Some(value) => value.boolean(),
        None => Ok(false),
    }
}

/// Walk the subtree under `template_page` and validate every empty
/// container against the sibling `mappings_page` structure.
///
/// For each visited node whose resolved resource type is a container and
/// which currently has zero children, the node's path relative to
/// `template_page` (segment-wise; the page itself relativizes to the
/// mappings page itself) must name a node under `mappings_page`, that
/// mapping's policy reference must resolve under `policies_base`, and the
/// resolved policy must declare [`PROP_ALLOWED_COMPONENTS`]. Each failure
/// point yields one minor violation; the walk always continues to the
/// remaining nodes.
pub fn check_empty_containers(
    package: &PackageId,
    template_page: NodeRef<'_>,
    mappings_page: NodeRef<'_>,
    policies_base: &str,
    reporter: &mut ViolationReporter,
) -> ScanResult<()> {
    let template_path = template_page.path();
    template_page.walk(&mut |node| {
        let Some(resource_type) = resolve_resource_type(node)? else {
            return Ok(());
        };
        if !is_container(resource_type)? || node.has_children() {
            return Ok(());
        }
        // Inside the walk the node is always under the page, so the
        // relativization cannot fail.
        let Some(rel_path) = path::relative_to(template_path, node.path()) else {
            return Ok(());
        };
        match mappings_page.get_node(&rel_path) {
            None => reporter.minor(
                package,
                format!(
                    "{template_path}: failed to find policy mapping for empty container in template {rel_path}"
                ),
            ),
            Some(mapping) => match resolve_policy(mapping, policies_base)? {
                None => reporter.minor(
                    package,
                    format!(
                        "{template_path} missing policy for empty container in template {rel_path}"
                    ),
                ),
                Some(policy) => {
                    if !policy.has_property(PROP_ALLOWED_COMPONENTS) {
                        reporter.minor(
                            package,
                            format!(
                                "{template_path}: Allowed Components missing in policy for empty container in template {rel_path}"
                            ),
                        );
                    }
                }
            },
        }
        Ok(())
    })
}

// ─── Tests ───────────────────────────────────────────────────────────
