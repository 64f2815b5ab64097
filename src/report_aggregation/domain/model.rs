use std::collections::HashMap;

use super::package::{Package, PackageHandle};
use super::resolution::Resolution;
use super::violation::RuleViolation;
use super::vulnerability::Vulnerability;

/// Kind of record an aggregation issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    RuleViolation,
    Vulnerability,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::RuleViolation => write!(f, "rule violation"),
            RecordKind::Vulnerability => write!(f, "vulnerability"),
        }
    }
}

/// A recoverable defect found while aggregating the report.
///
/// Issues never abort the load; the affected record is kept with degraded
/// data and the issue is recorded here for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationIssue {
    /// A violation or vulnerability referenced a package id that is not in
    /// the inventory; the record carries the unknown-package sentinel.
    UnknownPackageReference {
        kind: RecordKind,
        identity: String,
        package_id: String,
    },
    /// Two inventory entries carried the same package id; the first won.
    DuplicatePackageId { package_id: String },
    /// An inventory entry carried an unusable package id; it was skipped.
    InvalidPackageId { package_id: String, details: String },
}

impl std::fmt::Display for AggregationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationIssue::UnknownPackageReference {
                kind,
                identity,
                package_id,
            } => write!(
                f,
                "{} '{}' references unknown package '{}'",
                kind, identity, package_id
            ),
            AggregationIssue::DuplicatePackageId { package_id } => {
                write!(f, "duplicate package id '{}'", package_id)
            }
            AggregationIssue::InvalidPackageId {
                package_id,
                details,
            } => {
                write!(f, "invalid package id '{}': {}", package_id, details)
            }
        }
    }
}

/// The normalized, query-ready model of one scan report.
///
/// Built exactly once per loaded report and immutable afterwards: all
/// collections are private, all access goes through borrowing getters, and
/// there is no interior mutability, so a `Ready` model can be read from any
/// number of threads at once.
#[derive(Debug, Clone)]
pub struct AggregationModel {
    packages: Vec<Package>,
    package_index: HashMap<String, usize>,
    rule_violations: Vec<RuleViolation>,
    vulnerabilities: Vec<Vulnerability>,
    rule_violation_resolutions: Vec<Resolution>,
    vulnerability_resolutions: Vec<Resolution>,
    issues: Vec<AggregationIssue>,
}

impl AggregationModel {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        packages: Vec<Package>,
        package_index: HashMap<String, usize>,
        rule_violations: Vec<RuleViolation>,
        vulnerabilities: Vec<Vulnerability>,
        rule_violation_resolutions: Vec<Resolution>,
        vulnerability_resolutions: Vec<Resolution>,
        issues: Vec<AggregationIssue>,
    ) -> Self {
        Self {
            packages,
            package_index,
            rule_violations,
            vulnerabilities,
            rule_violation_resolutions,
            vulnerability_resolutions,
            issues,
        }
    }

    /// All packages in report order
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// All rule violations in report order
    pub fn rule_violations(&self) -> &[RuleViolation] {
        &self.rule_violations
    }

    /// All vulnerabilities in report order
    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    /// Report-scope resolutions applying to rule violations
    pub fn rule_violation_resolutions(&self) -> &[Resolution] {
        &self.rule_violation_resolutions
    }

    /// Report-scope resolutions applying to vulnerabilities
    pub fn vulnerability_resolutions(&self) -> &[Resolution] {
        &self.vulnerability_resolutions
    }

    /// Recoverable issues recorded during aggregation
    pub fn issues(&self) -> &[AggregationIssue] {
        &self.issues
    }

    /// Resolves a handle to its package; `None` for the unknown sentinel
    pub fn package(&self, handle: PackageHandle) -> Option<&Package> {
        match handle {
            PackageHandle::Known(index) => self.packages.get(index),
            PackageHandle::Unknown => None,
        }
    }

    /// Looks up a package by its id string
    pub fn package_by_id(&self, id: &str) -> Option<&Package> {
        self.package_index.get(id).map(|&index| &self.packages[index])
    }

    /// The resolutions matched against a rule violation, in list order
    pub fn resolutions_for_violation<'a>(&'a self, violation: &RuleViolation) -> Vec<&'a Resolution> {
        violation
            .resolutions()
            .iter()
            .filter_map(|&index| self.rule_violation_resolutions.get(index))
            .collect()
    }

    /// The resolutions matched against a vulnerability, in list order
    pub fn resolutions_for_vulnerability<'a>(
        &'a self,
        vulnerability: &Vulnerability,
    ) -> Vec<&'a Resolution> {
        vulnerability
            .resolutions()
            .iter()
            .filter_map(|&index| self.vulnerability_resolutions.get(index))
            .collect()
    }
}
