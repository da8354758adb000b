//! # Package Identity and Import Actions
//!
//! A content package is identified by `group:name:version`; every import
//! event and every violation carries the identifier of the package that
//! produced it.

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Identifier of a content package under scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId {
    /// Package group (organizational namespace).
    pub group: String,
    /// Package name.
    pub name: String,
    /// Package version string.
    pub version: String,
}

impl PackageId {
    /// Build a package identifier from its parts.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl std::str::FromStr for PackageId {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, name] if !group.is_empty() && !name.is_empty() => {
                Ok(Self::new(*group, *name, ""))
            }
            [group, name, version] if !group.is_empty() && !name.is_empty() => {
                Ok(Self::new(*group, *name, *version))
            }
            _ => Err(ScanError::InvalidPackageId(s.to_string())),
        }
    }
}

/// What the simulated import did at a given path.
///
/// Carried on every import event; the engine itself does not interpret it,
/// individual rules may.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAction {
    /// The path was created by this package.
    Added,
    /// The path existed and its content changed.
    Modified,
    /// The path was deleted and recreated.
    Replaced,
    /// The path was deleted.
    Deleted,
    /// The path was imported without effect.
    Noop,
}

// ─── Tests ───────────────────────────────────────────────────────────
