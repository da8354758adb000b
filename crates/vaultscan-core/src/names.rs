//! # Qualified Type and Property Names
//!
//! Node types and namespaced properties use the expanded-form convention
//! `{namespace-uri}LocalName`. The well-known names the rules depend on are
//! collected here as a single constant table instead of being inlined as
//! string literals at every use site; a test validates each constant parses
//! as a well-formed [`QName`].

use crate::error::{ScanError, ScanResult};

/// The `cq` namespace URI.
pub const NS_CQ: &str = "http://www.day.com/jcr/cq/1.0";
/// The `sling` namespace URI.
pub const NS_SLING: &str = "http://sling.apache.org/jcr/sling/1.0";
/// The `nt` (built-in node type) namespace URI.
pub const NS_NT: &str = "http://www.jcp.org/jcr/nt/1.0";

/// Node type of editable templates.
pub const CQ_TEMPLATE: &str = "{http://www.day.com/jcr/cq/1.0}Template";
/// Node type of authorable components.
pub const CQ_COMPONENT: &str = "{http://www.day.com/jcr/cq/1.0}Component";
/// Node type of client library folders.
pub const CQ_CLIENT_LIBRARY_FOLDER: &str = "{http://www.day.com/jcr/cq/1.0}ClientLibraryFolder";
/// Property holding a policy reference path on a mapping node.
pub const CQ_POLICY: &str = "{http://www.day.com/jcr/cq/1.0}policy";
/// Property marking a resource type as a layout container.
pub const CQ_IS_CONTAINER: &str = "{http://www.day.com/jcr/cq/1.0}isContainer";
/// Property holding a node's resolved resource type.
pub const SLING_RESOURCE_TYPE: &str = "{http://sling.apache.org/jcr/sling/1.0}resourceType";
/// Default type for structural nodes.
pub const NT_UNSTRUCTURED: &str = "{http://www.jcp.org/jcr/nt/1.0}unstructured";

/// A parsed `{namespace-uri}LocalName` qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    uri: String,
    local: String,
}

impl QName {
    /// Build a qualified name from its parts.
    pub fn new(uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            local: local.into(),
        }
    }

    /// The namespace URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The local name.
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl std::str::FromStr for QName {
    type Err = ScanError;

    fn from_str(s: &str) -> ScanResult<Self> {
        let rest = s
            .strip_prefix('{')
            .ok_or_else(|| ScanError::InvalidName(s.to_string()))?;
        let (uri, local) = rest
            .split_once('}')
            .ok_or_else(|| ScanError::InvalidName(s.to_string()))?;
        if uri.is_empty() || local.is_empty() || local.contains(['{', '}']) {
            return Err(ScanError::InvalidName(s.to_string()));
        }
        Ok(Self::new(uri, local))
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.uri, self.local)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_KNOWN: &[&str] = &[
        CQ_TEMPLATE,
        CQ_COMPONENT,
        CQ_CLIENT_LIBRARY_FOLDER,
        CQ_POLICY,
        CQ_IS_CONTAINER,
        SLING_RESOURCE_TYPE,
        NT_UNSTRUCTURED,
    ];

    #[test]
    fn test_well_known_names_parse() {
        for name in WELL_KNOWN {
            let parsed: QName = name.parse().unwrap();
            assert_eq!(&parsed.to_string(), name);
        }
    }

    #[test]
    fn test_well_known_namespaces() {
        let template: QName = CQ_TEMPLATE.parse().unwrap();
        assert_eq!(template.uri(), NS_CQ);
        assert_eq!(template.local(), "Template");
        let resource_type: QName = SLING_RESOURCE_TYPE.parse().unwrap();
        assert_eq!(resource_type.uri(), NS_SLING);
    }

    #[test]
    fn test_malformed_names_rejected() {
        for bad in ["Template", "{}Template", "{uri}", "{uri", "{a}{b}c", ""] {
            assert!(bad.parse::<QName>().is_err(), "accepted {bad:?}");
        }
    }
}
