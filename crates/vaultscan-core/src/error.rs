//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! Only *tree-access* failures live here: a direct node fetch that finds
//! nothing, a direct property fetch that finds nothing, or a property read
//! with the wrong value shape. These indicate the simulated repository is
//! unusable and abort the scan. Content-policy findings are not errors —
//! they are accumulated as [`crate::report::Violation`] values and never
//! interrupt processing.

use thiserror::Error;

/// Convenience result alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Fatal tree-access failure.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A direct node fetch found no node at the given absolute path.
    #[error("no node exists at {path}")]
    NodeNotFound {
        /// The absolute path that was requested.
        path: String,
    },

    /// A direct property fetch found no property with the given name.
    #[error("{path}: no property named {name}")]
    PropertyNotFound {
        /// Path of the node that was inspected.
        path: String,
        /// Name of the missing property.
        name: String,
    },

    /// A property value was read with the wrong shape, e.g. a single-value
    /// read of a multi-valued property.
    #[error("value format error: expected {expected} value, found {found}")]
    ValueFormat {
        /// The shape the caller asked for.
        expected: &'static str,
        /// The shape actually stored.
        found: &'static str,
    },

    /// A qualified type name did not follow the `{namespace-uri}LocalName`
    /// convention.
    #[error("invalid qualified name: {0}")]
    InvalidName(String),

    /// A package identifier string did not parse as `group:name[:version]`.
    #[error("invalid package id: {0}")]
    InvalidPackageId(String),
}
