//! # Violation Reporting
//!
//! A pure output sink: rules append structured findings, the caller drains
//! them after the scan. Appends never fail, never block, and are never
//! deduplicated — ordering is detection order, and a rule that finds the
//! same problem twice reports it twice. Formatting and exit-code derivation
//! are downstream concerns; the types serialize for that purpose.

use serde::{Deserialize, Serialize};

use crate::package::PackageId;

/// Severity of a reported violation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// Advisory finding; usually tolerated in a passing scan.
    Minor,
    /// Standard finding (the default for unqualified reports).
    #[default]
    Major,
    /// Finding that should fail the scan outright.
    Severe,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Minor => "MINOR",
            Self::Major => "MAJOR",
            Self::Severe => "SEVERE",
        };
        f.write_str(s)
    }
}

/// A single structured finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// How serious the finding is.
    pub severity: Severity,
    /// The package whose content triggered the finding.
    pub package: PackageId,
    /// Human-readable description, prefixed with the offending path.
    pub description: String,
}

impl Violation {
    /// A default-severity violation.
    pub fn new(package: PackageId, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::default(),
            package,
            description: description.into(),
        }
    }

    /// A minor-severity violation.
    pub fn minor(package: PackageId, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Minor,
            package,
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.package, self.description)
    }
}

/// Append-only collector of violations for one scan.
#[derive(Debug, Default)]
pub struct ViolationReporter {
    violations: Vec<Violation>,
}

impl ViolationReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn report(&mut self, violation: Violation) {
        tracing::debug!(
            severity = %violation.severity,
            package = %violation.package,
            "violation: {}",
            violation.description
        );
        self.violations.push(violation);
    }

    /// Append a minor-severity violation.
    pub fn minor(&mut self, package: &PackageId, description: impl Into<String>) {
        self.report(Violation::minor(package.clone(), description));
    }

    /// The violations reported so far, in detection order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the reporter, yielding the accumulated violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Number of violations reported so far.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg() -> PackageId {
        PackageId::new("com.example", "ui.apps", "1.0.0")
    }

    #[test]
    fn test_default_severity_is_major() {
        let v = Violation::new(pkg(), "/apps/x: something");
        assert_eq!(v.severity, Severity::Major);
    }

    #[test]
    fn test_appends_preserve_order_and_duplicates() {
        let mut reporter = ViolationReporter::new();
        reporter.minor(&pkg(), "first");
        reporter.report(Violation::new(pkg(), "second"));
        reporter.minor(&pkg(), "first");
        let violations = reporter.into_violations();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].description, "first");
        assert_eq!(violations[1].description, "second");
        assert_eq!(violations[2].description, "first");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Minor < Severity::Major);
        assert!(Severity::Major < Severity::Severe);
    }

    #[test]
    fn test_violation_serializes() {
        let v = Violation::minor(pkg(), "/conf/x: failed to resolve policy");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["severity"], "Minor");
        assert_eq!(json["package"]["name"], "ui.apps");
    }

    #[test]
    fn test_display() {
        let v = Violation::minor(pkg(), "/conf/x: broken");
        assert_eq!(
            v.to_string(),
            "MINOR [com.example:ui.apps:1.0.0] /conf/x: broken"
        );
    }
}
