pub mod excludes;
pub mod matcher;
pub mod model;
pub mod package;
pub mod resolution;
pub mod violation;
pub mod vulnerability;

pub use excludes::{PathExclude, ScopeExclude};
pub use matcher::WildcardPattern;
pub use model::{AggregationIssue, AggregationModel, RecordKind};
pub use package::{Finding, Package, PackageHandle, PackageId, PackagePath, PackageScope};
pub use resolution::Resolution;
pub use violation::{RuleViolation, ViolationSeverity, RESOLVED_VIOLATION_RANK};
pub use vulnerability::{
    Vulnerability, VulnerabilityReference, VulnerabilitySeverity, RESOLVED_VULNERABILITY_RANK,
};
