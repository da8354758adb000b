//! # Cross-Reference Resolution
//!
//! Resolves indirect references stored as path strings — policy links and
//! resource types — against the content tree. Absence is never an error
//! here: a reference that points nowhere resolves to `None`, and deciding
//! whether that is a violation belongs to the caller. Only malformed
//! property reads escalate, as fatal tree-access failures.

use crate::error::ScanResult;
use crate::names::{CQ_POLICY, SLING_RESOURCE_TYPE};
use crate::path;
use crate::tree::{ContentTree, NodeRef};

/// Root under which relative resource-type references are resolved.
pub const APPS_ROOT: &str = "/apps";

/// Resolve a reference string against a base path.
///
/// Empty references and references to missing nodes resolve to `None`.
/// A reference starting with `/` is tree-absolute; anything else is joined
/// under `base`.
pub fn resolve_reference<'t>(
    tree: &'t ContentTree,
    base: &str,
    reference: &str,
) -> Option<NodeRef<'t>> {
    if reference.is_empty() {
        return None;
    }
    let abs = if path::is_absolute(reference) {
        path::normalize(reference)
    } else {
        path::join(base, reference)
    };
    tree.get(&abs)
}

/// Resolve the policy reference declared on a mapping node, if any.
///
/// Reads the node's `cq:policy` property and resolves it under
/// `policies_base`. A node without the property, or a reference that
/// points nowhere, yields `None`.
pub fn resolve_policy<'t>(
    mapping: NodeRef<'t>,
    policies_base: &str,
) -> ScanResult<Option<NodeRef<'t>>> {
    if !mapping.has_property(CQ_POLICY) {
        return Ok(None);
    }
    let reference = mapping.property(CQ_POLICY)?.string()?;
    Ok(resolve_reference(mapping.tree(), policies_base, &reference))
}

/// Resolve the resource type declared on a node, if any.
///
/// Relative resource types are rooted under [`APPS_ROOT`]; absolute ones
/// are taken as-is. Missing property or missing target yields `None`.
pub fn resolve_resource_type(node: NodeRef<'_>) -> ScanResult<Option<NodeRef<'_>>> {
    if !node.has_property(SLING_RESOURCE_TYPE) {
        return Ok(None);
    }
    let resource_type = node.property(SLING_RESOURCE_TYPE)?.string()?;
    Ok(resolve_reference(node.tree(), APPS_ROOT, &resource_type))
}

// ─── Tests ───────────────────────────────────────────────────────────
