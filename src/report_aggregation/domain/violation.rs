use std::collections::BTreeSet;

use super::package::{PackageHandle, PackageId};

/// Severity rank a rule violation takes once it is resolved.
///
/// Resolved violations sort below every unresolved one, whatever their
/// original severity.
pub const RESOLVED_VIOLATION_RANK: u8 = 3;

/// Severity label of a rule violation.
///
/// The label set is closed; the numeric index drives the default sort order
/// of every violation view (lower sorts first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationSeverity {
    Error,
    Warning,
    Hint,
}

impl ViolationSeverity {
    /// Parses a severity label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "ERROR" => Some(ViolationSeverity::Error),
            "WARNING" => Some(ViolationSeverity::Warning),
            "HINT" => Some(ViolationSeverity::Hint),
            _ => None,
        }
    }

    /// The canonical uppercase label
    pub fn label(&self) -> &'static str {
        match self {
            ViolationSeverity::Error => "ERROR",
            ViolationSeverity::Warning => "WARNING",
            ViolationSeverity::Hint => "HINT",
        }
    }

    /// Fixed severity rank: ERROR=0, WARNING=1, HINT=2
    pub fn severity_index(&self) -> u8 {
        match self {
            ViolationSeverity::Error => 0,
            ViolationSeverity::Warning => 1,
            ViolationSeverity::Hint => 2,
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A policy rule violation raised by the scanner against one package
///
/// `severity_index`, `is_resolved`, the matched resolution handles and the
/// reason set are derived once during aggregation. The package reference is
/// kept twice: the raw id string for display and filtering, and the resolved
/// handle for model lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    rule: String,
    message: String,
    severity: ViolationSeverity,
    package_id: Option<PackageId>,
    package: PackageHandle,
    severity_index: u8,
    is_resolved: bool,
    resolutions: Vec<usize>,
    resolution_reasons: BTreeSet<String>,
    how_to_fix: Option<String>,
}

impl RuleViolation {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        rule: String,
        message: String,
        severity: ViolationSeverity,
        package_id: Option<PackageId>,
        package: PackageHandle,
        severity_index: u8,
        is_resolved: bool,
        resolutions: Vec<usize>,
        resolution_reasons: BTreeSet<String>,
        how_to_fix: Option<String>,
    ) -> Self {
        Self {
            rule,
            message,
            severity,
            package_id,
            package,
            severity_index,
            is_resolved,
            resolutions,
            resolution_reasons,
            how_to_fix,
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> ViolationSeverity {
        self.severity
    }

    /// The raw package id string from the report, if the violation named one
    pub fn package_id(&self) -> Option<&PackageId> {
        self.package_id.as_ref()
    }

    /// The package id as display text; empty when no package was named
    pub fn package_label(&self) -> &str {
        self.package_id.as_ref().map(|id| id.as_str()).unwrap_or("")
    }

    pub fn package(&self) -> PackageHandle {
        self.package
    }

    pub fn has_package(&self) -> bool {
        self.package.is_known()
    }

    /// Effective severity rank; the resolved sentinel rank when resolved
    pub fn severity_index(&self) -> u8 {
        self.severity_index
    }

    pub fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    /// Handles into the model's rule-violation resolution list
    pub fn resolutions(&self) -> &[usize] {
        &self.resolutions
    }

    /// Deduplicated reason codes from every resolution that matched
    pub fn resolution_reasons(&self) -> &BTreeSet<String> {
        &self.resolution_reasons
    }

    pub fn how_to_fix(&self) -> Option<&str> {
        self.how_to_fix.as_deref()
    }

    pub fn has_how_to_fix(&self) -> bool {
        self.how_to_fix.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known_values() {
        assert_eq!(
            ViolationSeverity::from_label("ERROR"),
            Some(ViolationSeverity::Error)
        );
        assert_eq!(
            ViolationSeverity::from_label("WARNING"),
            Some(ViolationSeverity::Warning)
        );
        assert_eq!(
            ViolationSeverity::from_label("HINT"),
            Some(ViolationSeverity::Hint)
        );
    }

    #[test]
    fn test_from_label_case_insensitive() {
        assert_eq!(
            ViolationSeverity::from_label("error"),
            Some(ViolationSeverity::Error)
        );
        assert_eq!(
            ViolationSeverity::from_label("Warning"),
            Some(ViolationSeverity::Warning)
        );
    }

    #[test]
    fn test_from_label_unknown_is_none() {
        assert_eq!(ViolationSeverity::from_label("FATAL"), None);
        assert_eq!(ViolationSeverity::from_label(""), None);
    }

    #[test]
    fn test_severity_index_table() {
        assert_eq!(ViolationSeverity::Error.severity_index(), 0);
        assert_eq!(ViolationSeverity::Warning.severity_index(), 1);
        assert_eq!(ViolationSeverity::Hint.severity_index(), 2);
        assert_eq!(RESOLVED_VIOLATION_RANK, 3);
    }

    #[test]
    fn test_severity_index_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(ViolationSeverity::Error.severity_index(), 0);
        }
    }

    #[test]
    fn test_label_round_trip() {
        for severity in [
            ViolationSeverity::Error,
            ViolationSeverity::Warning,
            ViolationSeverity::Hint,
        ] {
            assert_eq!(ViolationSeverity::from_label(severity.label()), Some(severity));
        }
    }

    #[test]
    fn test_package_label_empty_without_package() {
        let violation = RuleViolation::new(
            "R1".to_string(),
            String::new(),
            ViolationSeverity::Error,
            None,
            PackageHandle::Unknown,
            0,
            false,
            vec![],
            BTreeSet::new(),
            None,
        );
        assert_eq!(violation.package_label(), "");
        assert!(!violation.has_package());
        assert!(!violation.has_how_to_fix());
    }
}
