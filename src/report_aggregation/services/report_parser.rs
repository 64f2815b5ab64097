//! Report parsing - the second pipeline stage
//!
//! Turns decoded JSON text into raw intermediate records. References between
//! records are still string package ids at this point; resolving them is the
//! aggregator's job. Every optional section defaults to an empty collection,
//! so a report with no violations or no vulnerabilities parses cleanly.

use serde::Deserialize;

use crate::shared::error::ReportError;

/// The raw report document as parsed from JSON
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReport {
    #[serde(default)]
    pub packages: Vec<RawPackage>,
    #[serde(default)]
    pub violations: Vec<RawRuleViolation>,
    #[serde(default)]
    pub vulnerabilities: Vec<RawVulnerability>,
    #[serde(default)]
    pub resolutions: RawResolutions,
}

/// One package inventory entry, as written by the scanner
#[derive(Debug, Clone, Deserialize)]
pub struct RawPackage {
    pub id: String,
    #[serde(default)]
    pub declared_licenses: Vec<String>,
    #[serde(default)]
    pub detected_licenses: Vec<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub findings: Vec<RawFinding>,
    #[serde(default)]
    pub path_excludes: Vec<RawExclude>,
    #[serde(default)]
    pub scope_excludes: Vec<RawExclude>,
}

/// A license finding attached to a package
#[derive(Debug, Clone, Deserialize)]
pub struct RawFinding {
    pub license: String,
    #[serde(default)]
    pub path: String,
}

/// A path or scope exclude rule attached to a package
#[derive(Debug, Clone, Deserialize)]
pub struct RawExclude {
    pub pattern: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub comment: String,
}

/// Severity label of a rule violation on the wire.
///
/// The label set is closed, so an unrecognized label is a parse error and
/// fails the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RawViolationSeverity {
    Error,
    Warning,
    Hint,
}

/// One rule violation, still referencing its package by id string
#[derive(Debug, Clone, Deserialize)]
pub struct RawRuleViolation {
    pub rule: String,
    #[serde(default)]
    pub message: String,
    pub severity: RawViolationSeverity,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub how_to_fix: Option<String>,
}

/// An external advisory reference of a vulnerability
#[derive(Debug, Clone, Deserialize)]
pub struct RawReference {
    pub url: String,
}

/// One vulnerability, still referencing its package by id string.
///
/// The severity stays a free string here: advisory labels are an open set
/// and collapse to UNKNOWN during aggregation rather than failing the load.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVulnerability {
    pub id: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub references: Vec<RawReference>,
    #[serde(default)]
    pub package: Option<String>,
}

/// The report-scope resolution lists, one flat list per record kind
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResolutions {
    #[serde(default)]
    pub rule_violations: Vec<RawResolution>,
    #[serde(default)]
    pub vulnerabilities: Vec<RawResolution>,
}

/// One operator-authored resolution entry
#[derive(Debug, Clone, Deserialize)]
pub struct RawResolution {
    pub matcher: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub comment: String,
}

/// Parses decoded report JSON into raw records
///
/// A syntactically invalid document, or a section of the wrong shape, is a
/// parse error and fatal to this load.
pub fn parse(json: &str) -> Result<RawReport, ReportError> {
    serde_json::from_str(json).map_err(|e| ReportError::Parse {
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_report() {
        let report = parse("{}").unwrap();
        assert!(report.packages.is_empty());
        assert!(report.violations.is_empty());
        assert!(report.vulnerabilities.is_empty());
        assert!(report.resolutions.rule_violations.is_empty());
        assert!(report.resolutions.vulnerabilities.is_empty());
    }

    #[test]
    fn test_parse_missing_sections_default_to_empty() {
        let json = r#"{"violations":[{"rule":"R1","severity":"ERROR","package":"pkg:npm/foo@1.0"}]}"#;
        let report = parse(json).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert!(report.packages.is_empty());
        assert!(report.vulnerabilities.is_empty());
    }

    #[test]
    fn test_parse_violation_fields() {
        let json = r#"{
            "violations": [{
                "rule": "R1",
                "message": "GPL found",
                "severity": "WARNING",
                "package": "pkg:npm/foo@1.0",
                "how_to_fix": "Remove the dependency."
            }]
        }"#;
        let report = parse(json).unwrap();
        let violation = &report.violations[0];
        assert_eq!(violation.rule, "R1");
        assert_eq!(violation.message, "GPL found");
        assert_eq!(violation.severity, RawViolationSeverity::Warning);
        assert_eq!(violation.package.as_deref(), Some("pkg:npm/foo@1.0"));
        assert_eq!(violation.how_to_fix.as_deref(), Some("Remove the dependency."));
    }

    #[test]
    fn test_parse_violation_without_package_or_message() {
        let json = r#"{"violations":[{"rule":"R2","severity":"HINT"}]}"#;
        let report = parse(json).unwrap();
        let violation = &report.violations[0];
        assert_eq!(violation.message, "");
        assert!(violation.package.is_none());
        assert!(violation.how_to_fix.is_none());
    }

    #[test]
    fn test_parse_unknown_violation_severity_fails() {
        let json = r#"{"violations":[{"rule":"R1","severity":"FATAL"}]}"#;
        let result = parse(json);
        assert!(matches!(result, Err(ReportError::Parse { .. })));
    }

    #[test]
    fn test_parse_vulnerability_severity_stays_free_form() {
        let json = r#"{"vulnerabilities":[{"id":"CVE-2021-0001","severity":"MODERATE"}]}"#;
        let report = parse(json).unwrap();
        assert_eq!(report.vulnerabilities[0].severity, "MODERATE");
    }

    #[test]
    fn test_parse_package_sections() {
        let json = r#"{
            "packages": [{
                "id": "pkg:npm/foo@1.0",
                "declared_licenses": ["MIT"],
                "detected_licenses": ["MIT", "BSD-3-Clause"],
                "paths": ["a/b"],
                "scopes": ["dependencies"],
                "findings": [{"license": "MIT", "path": "a/b/LICENSE"}],
                "path_excludes": [{"pattern": "a/*", "reason": "BUILD_TOOL_OF"}],
                "scope_excludes": [{"pattern": "dev*", "reason": "DEV_DEPENDENCY_OF", "comment": "dev only"}]
            }]
        }"#;
        let report = parse(json).unwrap();
        let package = &report.packages[0];
        assert_eq!(package.id, "pkg:npm/foo@1.0");
        assert_eq!(package.declared_licenses, vec!["MIT"]);
        assert_eq!(package.detected_licenses.len(), 2);
        assert_eq!(package.findings[0].license, "MIT");
        assert_eq!(package.path_excludes[0].pattern, "a/*");
        assert_eq!(package.path_excludes[0].comment, "");
        assert_eq!(package.scope_excludes[0].comment, "dev only");
    }

    #[test]
    fn test_parse_resolutions() {
        let json = r#"{
            "resolutions": {
                "rule_violations": [{"matcher": "R1", "reason": "CANT_FIX_EXCEPTION"}],
                "vulnerabilities": [{"matcher": "CVE-*", "reason": "INEFFECTIVE_VULNERABILITY"}]
            }
        }"#;
        let report = parse(json).unwrap();
        assert_eq!(report.resolutions.rule_violations[0].matcher, "R1");
        assert_eq!(report.resolutions.vulnerabilities[0].matcher, "CVE-*");
    }

    #[test]
    fn test_parse_invalid_json_is_parse_error() {
        let result = parse("{not json");
        match result {
            Err(ReportError::Parse { details }) => assert!(!details.is_empty()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wrong_section_shape_is_parse_error() {
        let result = parse(r#"{"violations": "not an array"}"#);
        assert!(matches!(result, Err(ReportError::Parse { .. })));
    }
}
