use std::collections::BTreeSet;

use super::excludes::{PathExclude, ScopeExclude};

/// Maximum length for package ids (security limit)
const MAX_PACKAGE_ID_LENGTH: usize = 1024;

/// NewType wrapper for a package id (a package URL string) with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: String) -> crate::shared::Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Package id cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if id.len() > MAX_PACKAGE_ID_LENGTH {
            anyhow::bail!(
                "Package id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            );
        }

        // Package URLs carry a rich character set; only control characters
        // are ruled out to keep terminal output and logs intact.
        if id.chars().any(|c| c.is_control()) {
            anyhow::bail!("Package id contains control characters");
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable reference from a violation or vulnerability to its owning package.
///
/// `Known` indexes into the model's package arena. `Unknown` is the explicit
/// sentinel for a reference that did not resolve; it is never a dangling
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageHandle {
    Known(usize),
    Unknown,
}

impl PackageHandle {
    /// Returns true if this handle points at a package in the model
    pub fn is_known(&self) -> bool {
        matches!(self, PackageHandle::Known(_))
    }
}

/// A license finding produced by the scanner for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    license: String,
    path: String,
}

impl Finding {
    pub fn new(license: String, path: String) -> Self {
        Self { license, path }
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// One contributing detection path of a package, with its own exclusion flag
///
/// A path stays individually flagged even when the package as a whole remains
/// included, so sub-level reporting can show which parts of a package are out
/// of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePath {
    path: String,
    is_excluded: bool,
    exclude_reasons: BTreeSet<String>,
}

impl PackagePath {
    pub(crate) fn new(path: String, is_excluded: bool, exclude_reasons: BTreeSet<String>) -> Self {
        Self {
            path,
            is_excluded,
            exclude_reasons,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_excluded(&self) -> bool {
        self.is_excluded
    }

    pub fn exclude_reasons(&self) -> &BTreeSet<String> {
        &self.exclude_reasons
    }
}

/// One contributing dependency scope of a package, with its own exclusion flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageScope {
    name: String,
    is_excluded: bool,
    exclude_reasons: BTreeSet<String>,
}

impl PackageScope {
    pub(crate) fn new(name: String, is_excluded: bool, exclude_reasons: BTreeSet<String>) -> Self {
        Self {
            name,
            is_excluded,
            exclude_reasons,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_excluded(&self) -> bool {
        self.is_excluded
    }

    pub fn exclude_reasons(&self) -> &BTreeSet<String> {
        &self.exclude_reasons
    }
}

/// A package from the scanned project's dependency inventory
///
/// All derived fields (`is_excluded`, `exclude_reasons`, the per-path and
/// per-scope flags) are computed once during aggregation and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: PackageId,
    declared_licenses: Vec<String>,
    detected_licenses: Vec<String>,
    findings: Vec<Finding>,
    paths: Vec<PackagePath>,
    scopes: Vec<PackageScope>,
    path_excludes: Vec<PathExclude>,
    scope_excludes: Vec<ScopeExclude>,
    is_excluded: bool,
    exclude_reasons: BTreeSet<String>,
}

impl Package {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: PackageId,
        declared_licenses: Vec<String>,
        detected_licenses: Vec<String>,
        findings: Vec<Finding>,
        paths: Vec<PackagePath>,
        scopes: Vec<PackageScope>,
        path_excludes: Vec<PathExclude>,
        scope_excludes: Vec<ScopeExclude>,
        is_excluded: bool,
        exclude_reasons: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            declared_licenses,
            detected_licenses,
            findings,
            paths,
            scopes,
            path_excludes,
            scope_excludes,
            is_excluded,
            exclude_reasons,
        }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn declared_licenses(&self) -> &[String] {
        &self.declared_licenses
    }

    pub fn detected_licenses(&self) -> &[String] {
        &self.detected_licenses
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn paths(&self) -> &[PackagePath] {
        &self.paths
    }

    pub fn scopes(&self) -> &[PackageScope] {
        &self.scopes
    }

    pub fn path_excludes(&self) -> &[PathExclude] {
        &self.path_excludes
    }

    pub fn scope_excludes(&self) -> &[ScopeExclude] {
        &self.scope_excludes
    }

    /// True iff every contributing path and scope is covered by an exclude rule
    pub fn is_excluded(&self) -> bool {
        self.is_excluded
    }

    /// Deduplicated reason codes from all exclude rules that matched this package
    pub fn exclude_reasons(&self) -> &BTreeSet<String> {
        &self.exclude_reasons
    }

    pub fn has_licenses(&self) -> bool {
        !self.declared_licenses.is_empty() || !self.detected_licenses.is_empty()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn has_path_excludes(&self) -> bool {
        !self.path_excludes.is_empty()
    }

    pub fn has_scope_excludes(&self) -> bool {
        !self.scope_excludes.is_empty()
    }
}
