//! # vaultscan-core — Tree-Scan-and-Defer Validation Engine
//!
//! The engine behind content-package validation during import simulation.
//! A package import is replayed as a stream of per-path events against a
//! JCR-style content tree; rules match paths against prefix + node-type
//! predicates, buffer their matches keyed by path, and defer the expensive
//! cross-node consistency work until the whole tree is materialized. A
//! post-scan pass then drains each rule's deferred registry, resolves
//! cross-references (policy links, resource-type lookups, relative mapping
//! paths) against the tree, and accumulates human-readable violations.
//!
//! ## Two phases, one rule instance
//!
//! Every rule implements [`ProgressCheck`] and is driven through exactly two
//! sequential phases per scan:
//!
//! 1. **observe** — [`ProgressCheck::imported_path`] is called once per
//!    imported path. Matching is cheap and pure; matched paths go into the
//!    rule's [`DeferredRegistry`].
//! 2. **post-scan** — [`ProgressCheck::after_scan_package`] is called exactly
//!    once after the import completes. The rule drains its registry, runs
//!    deep resolution against the tree, and leaves itself ready for reuse.
//!
//! ## Error asymmetry
//!
//! Tree-access failures ([`ScanError`]) abort the whole scan: if the
//! simulated repository misbehaves, nothing downstream can be trusted.
//! Content-policy findings are never errors — they become [`Violation`]
//! values, all of them, in detection order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vaultscan-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The tree is never mutated by resolution or traversal.

pub mod check;
pub mod error;
pub mod names;
pub mod package;
pub mod path;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod scanner;
pub mod tree;
pub mod walker;

// Re-export primary types for ergonomic imports.
pub use check::{PathMatcher, ProgressCheck};
pub use error::{ScanError, ScanResult};
pub use package::{PackageId, PathAction};
pub use registry::DeferredRegistry;
pub use report::{Severity, Violation, ViolationReporter};
pub use scanner::Scanner;
pub use tree::{ContentTree, NodeId, NodeRef, PropertyValue};
