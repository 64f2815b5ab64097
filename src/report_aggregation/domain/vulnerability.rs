use std::collections::BTreeSet;

use super::package::{PackageHandle, PackageId};

/// Severity rank a vulnerability takes once it is resolved.
pub const RESOLVED_VULNERABILITY_RANK: u8 = 5;

/// Severity label of a vulnerability.
///
/// Advisory sources disagree on labels, so anything outside the known set
/// collapses to `Unknown` instead of failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VulnerabilitySeverity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl VulnerabilitySeverity {
    /// Parses a severity label case-insensitively; unrecognized labels
    /// become `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "CRITICAL" => VulnerabilitySeverity::Critical,
            "HIGH" => VulnerabilitySeverity::High,
            "MEDIUM" => VulnerabilitySeverity::Medium,
            "LOW" => VulnerabilitySeverity::Low,
            _ => VulnerabilitySeverity::Unknown,
        }
    }

    /// The canonical uppercase label
    pub fn label(&self) -> &'static str {
        match self {
            VulnerabilitySeverity::Critical => "CRITICAL",
            VulnerabilitySeverity::High => "HIGH",
            VulnerabilitySeverity::Medium => "MEDIUM",
            VulnerabilitySeverity::Low => "LOW",
            VulnerabilitySeverity::Unknown => "UNKNOWN",
        }
    }

    /// Fixed severity rank: CRITICAL=0, HIGH=1, MEDIUM=2, LOW=3, UNKNOWN=4
    pub fn severity_index(&self) -> u8 {
        match self {
            VulnerabilitySeverity::Critical => 0,
            VulnerabilitySeverity::High => 1,
            VulnerabilitySeverity::Medium => 2,
            VulnerabilitySeverity::Low => 3,
            VulnerabilitySeverity::Unknown => 4,
        }
    }
}

impl std::fmt::Display for VulnerabilitySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An external advisory reference attached to a vulnerability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulnerabilityReference {
    url: String,
}

impl VulnerabilityReference {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A known vulnerability affecting one package of the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vulnerability {
    id: String,
    severity: VulnerabilitySeverity,
    references: Vec<VulnerabilityReference>,
    package_id: Option<PackageId>,
    package: PackageHandle,
    severity_index: u8,
    is_resolved: bool,
    resolutions: Vec<usize>,
    resolution_reasons: BTreeSet<String>,
}

impl Vulnerability {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        severity: VulnerabilitySeverity,
        references: Vec<VulnerabilityReference>,
        package_id: Option<PackageId>,
        package: PackageHandle,
        severity_index: u8,
        is_resolved: bool,
        resolutions: Vec<usize>,
        resolution_reasons: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            severity,
            references,
            package_id,
            package,
            severity_index,
            is_resolved,
            resolutions,
            resolution_reasons,
        }
    }

    /// Advisory id, e.g. "CVE-2021-0001"
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> VulnerabilitySeverity {
        self.severity
    }

    pub fn references(&self) -> &[VulnerabilityReference] {
        &self.references
    }

    /// The raw package id string from the report, if one was named
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

    /// Handles into the model's vulnerability resolution list
    pub fn resolutions(&self) -> &[usize] {
        &self.resolutions
    }

    /// Deduplicated reason codes from every resolution that matched
    pub fn resolution_reasons(&self) -> &BTreeSet<String> {
        &self.resolution_reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known_values() {
        assert_eq!(
            VulnerabilitySeverity::from_label("CRITICAL"),
            VulnerabilitySeverity::Critical
        );
        assert_eq!(
            VulnerabilitySeverity::from_label("HIGH"),
            VulnerabilitySeverity::High
        );
        assert_eq!(
            VulnerabilitySeverity::from_label("MEDIUM"),
            VulnerabilitySeverity::Medium
        );
        assert_eq!(
            VulnerabilitySeverity::from_label("LOW"),
            VulnerabilitySeverity::Low
        );
    }

    #[test]
    fn test_from_label_case_insensitive() {
        assert_eq!(
            VulnerabilitySeverity::from_label("critical"),
            VulnerabilitySeverity::Critical
        );
        assert_eq!(
            VulnerabilitySeverity::from_label("High"),
            VulnerabilitySeverity::High
        );
    }

    #[test]
    fn test_from_label_unrecognized_collapses_to_unknown() {
        assert_eq!(
            VulnerabilitySeverity::from_label("MODERATE"),
            VulnerabilitySeverity::Unknown
        );
        assert_eq!(
            VulnerabilitySeverity::from_label(""),
            VulnerabilitySeverity::Unknown
        );
    }

    #[test]
    fn test_severity_index_table() {
        assert_eq!(VulnerabilitySeverity::Critical.severity_index(), 0);
        assert_eq!(VulnerabilitySeverity::High.severity_index(), 1);
        assert_eq!(VulnerabilitySeverity::Medium.severity_index(), 2);
        assert_eq!(VulnerabilitySeverity::Low.severity_index(), 3);
        assert_eq!(VulnerabilitySeverity::Unknown.severity_index(), 4);
        assert_eq!(RESOLVED_VULNERABILITY_RANK, 5);
    }

    #[test]
    fn test_label_round_trip() {
        for severity in [
            VulnerabilitySeverity::Critical,
            VulnerabilitySeverity::High,
            VulnerabilitySeverity::Medium,
            VulnerabilitySeverity::Low,
        ] {
            assert_eq!(VulnerabilitySeverity::from_label(severity.label()), severity);
        }
    }

    #[test]
    fn test_reference_url() {
        let reference = VulnerabilityReference::new("https://example.com/advisory".to_string());
        assert_eq!(reference.url(), "https://example.com/advisory");
    }
}
