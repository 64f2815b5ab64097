//! Aggregation - the final pipeline stage
//!
//! Turns the raw parsed records into the cross-referenced model: packages go
//! into an arena with an id index first, then every violation and
//! vulnerability reference is resolved to a stable handle, and all derived
//! fields (exclusion, severity rank, resolution status) are computed exactly
//! once. Defects in the data degrade the affected record instead of failing
//! the load; each one is kept on the model as an aggregation issue.

use std::collections::{BTreeSet, HashMap};

use crate::report_aggregation::domain::{
    AggregationIssue, AggregationModel, Finding, Package, PackageHandle, PackageId, PackagePath,
    PackageScope, PathExclude, RecordKind, Resolution, RuleViolation, ScopeExclude,
    ViolationSeverity, Vulnerability, VulnerabilityReference, VulnerabilitySeverity,
    RESOLVED_VIOLATION_RANK, RESOLVED_VULNERABILITY_RANK,
};
use crate::report_aggregation::services::report_parser::{
    RawPackage, RawReport, RawViolationSeverity,
};

/// Builds the immutable aggregation model from raw parsed records
pub fn aggregate(raw: RawReport) -> AggregationModel {
    let mut issues = Vec::new();

    // Arena + index first, so reference resolution below is a plain lookup.
    let mut packages: Vec<Package> = Vec::with_capacity(raw.packages.len());
    let mut package_index: HashMap<String, usize> = HashMap::with_capacity(raw.packages.len());

    for raw_package in raw.packages {
        let id = match PackageId::new(raw_package.id.clone()) {
            Ok(id) => id,
            Err(e) => {
                issues.push(AggregationIssue::InvalidPackageId {
                    package_id: raw_package.id,
                    details: e.to_string(),
                });
                continue;
            }
        };
        if package_index.contains_key(id.as_str()) {
            issues.push(AggregationIssue::DuplicatePackageId {
                package_id: raw_package.id,
            });
            continue;
        }
        let package = build_package(id, raw_package);
        package_index.insert(package.id().as_str().to_string(), packages.len());
        packages.push(package);
    }

    let rule_violation_resolutions: Vec<Resolution> = raw
        .resolutions
        .rule_violations
        .iter()
        .map(|r| Resolution::new(&r.matcher, r.reason.clone(), r.comment.clone()))
        .collect();
    let vulnerability_resolutions: Vec<Resolution> = raw
        .resolutions
        .vulnerabilities
        .iter()
        .map(|r| Resolution::new(&r.matcher, r.reason.clone(), r.comment.clone()))
        .collect();

    let rule_violations: Vec<RuleViolation> = raw
        .violations
        .into_iter()
        .map(|raw_violation| {
            let (package_id, package) = resolve_reference(
                raw_violation.package,
                &package_index,
                RecordKind::RuleViolation,
                &raw_violation.rule,
                &mut issues,
            );
            let severity = map_violation_severity(raw_violation.severity);
            let (matched, reasons) =
                match_resolutions(&rule_violation_resolutions, &raw_violation.rule);
            let is_resolved = !matched.is_empty();
            let severity_index = if is_resolved {
                RESOLVED_VIOLATION_RANK
            } else {
                severity.severity_index()
            };
            RuleViolation::new(
                raw_violation.rule,
                raw_violation.message,
                severity,
                package_id,
                package,
                severity_index,
                is_resolved,
                matched,
                reasons,
                raw_violation.how_to_fix,
            )
        })
        .collect();

    let vulnerabilities: Vec<Vulnerability> = raw
        .vulnerabilities
        .into_iter()
        .map(|raw_vulnerability| {
            let (package_id, package) = resolve_reference(
                raw_vulnerability.package,
                &package_index,
                RecordKind::Vulnerability,
                &raw_vulnerability.id,
                &mut issues,
            );
            let severity = VulnerabilitySeverity::from_label(&raw_vulnerability.severity);
            let (matched, reasons) =
                match_resolutions(&vulnerability_resolutions, &raw_vulnerability.id);
            let is_resolved = !matched.is_empty();
            let severity_index = if is_resolved {
                RESOLVED_VULNERABILITY_RANK
            } else {
                severity.severity_index()
            };
            let references = raw_vulnerability
                .references
                .into_iter()
                .map(|r| VulnerabilityReference::new(r.url))
                .collect();
            Vulnerability::new(
                raw_vulnerability.id,
                severity,
                references,
                package_id,
                package,
                severity_index,
                is_resolved,
                matched,
                reasons,
            )
        })
        .collect();

    AggregationModel::new(
        packages,
        package_index,
        rule_violations,
        vulnerabilities,
        rule_violation_resolutions,
        vulnerability_resolutions,
        issues,
    )
}

/// Builds one package with its exclusion state computed.
///
/// A package is excluded as a whole only when every contributing path is
/// covered by a path-exclude and every contributing scope by a
/// scope-exclude. Partial coverage leaves the package included, but every
/// individually covered path/scope keeps its own flag and reason set.
fn build_package(id: PackageId, raw: RawPackage) -> Package {
    let path_excludes: Vec<PathExclude> = raw
        .path_excludes
        .iter()
        .map(|e| PathExclude::new(&e.pattern, e.reason.clone(), e.comment.clone()))
        .collect();
    let scope_excludes: Vec<ScopeExclude> = raw
        .scope_excludes
        .iter()
        .map(|e| ScopeExclude::new(&e.pattern, e.reason.clone(), e.comment.clone()))
        .collect();

    let mut exclude_reasons = BTreeSet::new();
    let mut all_paths_covered = true;
    let paths: Vec<PackagePath> = raw
        .paths
        .into_iter()
        .map(|path| {
            let mut covered = false;
            let mut reasons = BTreeSet::new();
            for rule in &path_excludes {
                if rule.covers(&path) {
                    covered = true;
                    reasons.insert(rule.reason().to_string());
                }
            }
            if !covered {
                all_paths_covered = false;
            }
            exclude_reasons.extend(reasons.iter().cloned());
            PackagePath::new(path, covered, reasons)
        })
        .collect();

    let mut all_scopes_covered = true;
    let scopes: Vec<PackageScope> = raw
        .scopes
        .into_iter()
        .map(|scope| {
            let mut covered = false;
            let mut reasons = BTreeSet::new();
            for rule in &scope_excludes {
                if rule.covers(&scope) {
                    covered = true;
                    reasons.insert(rule.reason().to_string());
                }
            }
            if !covered {
                all_scopes_covered = false;
            }
            exclude_reasons.extend(reasons.iter().cloned());
            PackageScope::new(scope, covered, reasons)
        })
        .collect();

    // Nothing to cover means nothing is excluded
    let is_excluded =
        (!paths.is_empty() || !scopes.is_empty()) && all_paths_covered && all_scopes_covered;

    let findings = raw
        .findings
        .into_iter()
        .map(|f| Finding::new(f.license, f.path))
        .collect();

    Package::new(
        id,
        raw.declared_licenses,
        raw.detected_licenses,
        findings,
        paths,
        scopes,
        path_excludes,
        scope_excludes,
        is_excluded,
        exclude_reasons,
    )
}

/// Resolves a raw package reference to a stable handle.
///
/// A reference that names a package not in the index gets the unknown
/// sentinel and records a recoverable issue; an absent reference gets the
/// sentinel silently (report-wide violations legitimately have no package).
fn resolve_reference(
    reference: Option<String>,
    package_index: &HashMap<String, usize>,
    kind: RecordKind,
    identity: &str,
    issues: &mut Vec<AggregationIssue>,
) -> (Option<PackageId>, PackageHandle) {
    let Some(raw_id) = reference else {
        return (None, PackageHandle::Unknown);
    };
    let handle = match package_index.get(&raw_id) {
        Some(&index) => PackageHandle::Known(index),
        None => {
            issues.push(AggregationIssue::UnknownPackageReference {
                kind,
                identity: identity.to_string(),
                package_id: raw_id.clone(),
            });
            PackageHandle::Unknown
        }
    };
    (PackageId::new(raw_id).ok(), handle)
}

/// Evaluates every resolution of one kind against a record identity
///
/// Returns the matched resolution handles (list order) and the deduplicated
/// reason codes of the matches.
fn match_resolutions(resolutions: &[Resolution], identity: &str) -> (Vec<usize>, BTreeSet<String>) {
    let mut matched = Vec::new();
    let mut reasons = BTreeSet::new();
    for (index, resolution) in resolutions.iter().enumerate() {
        if resolution.matches(identity) {
            matched.push(index);
            reasons.insert(resolution.reason().to_string());
        }
    }
    (matched, reasons)
}

fn map_violation_severity(raw: RawViolationSeverity) -> ViolationSeverity {
    match raw {
        RawViolationSeverity::Error => ViolationSeverity::Error,
        RawViolationSeverity::Warning => ViolationSeverity::Warning,
        RawViolationSeverity::Hint => ViolationSeverity::Hint,
    }
}
