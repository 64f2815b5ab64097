use crate::report_aggregation::domain::{
    AggregationModel, Package, PackageHandle, RuleViolation, Vulnerability,
};

use super::engine::{filter_page, filter_sort_page};
use super::filter::{text_matches, ExclusionState, PackageFilter, ViolationFilter, VulnerabilityFilter};
use super::page::{PageSpec, QueryPage};
use super::sort::{
    PackageSort, PackageSortField, ViolationSort, ViolationSortField, VulnerabilitySort,
    VulnerabilitySortField,
};

/// ReportQueries - the read-only query surface over one loaded report
///
/// A handle borrows the model and holds nothing else, so views create and
/// drop them freely. Without a sort specification results come back in
/// report order; with one, ties still break by report order.
pub struct ReportQueries<'a> {
    model: &'a AggregationModel,
}

impl<'a> ReportQueries<'a> {
    pub fn new(model: &'a AggregationModel) -> Self {
        Self { model }
    }

    /// Lists packages matching the filter, sorted and paged
    pub fn list_packages(
        &self,
        filter: &PackageFilter,
        sort: Option<&PackageSort>,
        page: &PageSpec,
    ) -> QueryPage<&'a Package> {
        let matches = |package: &Package| {
            text_matches(&filter.id, package.id().as_str())
                && license_matches(&filter.license, package)
                && match filter.exclusion {
                    Some(ExclusionState::Excluded) => package.is_excluded(),
                    Some(ExclusionState::Included) => !package.is_excluded(),
                    None => true,
                }
        };
        let packages = self.model.packages();
        match sort {
            None => filter_page(packages, matches, page),
            Some(spec) => match spec.field {
                PackageSortField::Id => filter_sort_page(
                    packages,
                    matches,
                    |package| package.id().as_str().to_lowercase(),
                    spec.direction,
                    page,
                ),
            },
        }
    }

    /// Lists rule violations matching the filter, sorted and paged
    pub fn list_rule_violations(
        &self,
        filter: &ViolationFilter,
        sort: Option<&ViolationSort>,
        page: &PageSpec,
    ) -> QueryPage<&'a RuleViolation> {
        let matches = |violation: &RuleViolation| {
            text_matches(&filter.package, violation.package_label())
                && text_matches(&filter.rule, violation.rule())
                && text_matches(&filter.message, violation.message())
                && severity_matches(&filter.severities, violation.severity_index())
                && self.exclusion_matches(filter.exclusion, violation.package())
        };
        let violations = self.model.rule_violations();
        match sort {
            None => filter_page(violations, matches, page),
            Some(spec) => match spec.field {
                ViolationSortField::SeverityIndex => filter_sort_page(
                    violations,
                    matches,
                    |violation| violation.severity_index(),
                    spec.direction,
                    page,
                ),
                ViolationSortField::Package => filter_sort_page(
                    violations,
                    matches,
                    |violation| violation.package_label().to_lowercase(),
                    spec.direction,
                    page,
                ),
                ViolationSortField::Rule => filter_sort_page(
                    violations,
                    matches,
                    |violation| violation.rule().to_lowercase(),
                    spec.direction,
                    page,
                ),
            },
        }
    }

    /// Lists vulnerabilities matching the filter, sorted and paged
    pub fn list_vulnerabilities(
        &self,
        filter: &VulnerabilityFilter,
        sort: Option<&VulnerabilitySort>,
        page: &PageSpec,
    ) -> QueryPage<&'a Vulnerability> {
        let matches = |vulnerability: &Vulnerability| {
            text_matches(&filter.package, vulnerability.package_label())
                && text_matches(&filter.id, vulnerability.id())
                && severity_matches(&filter.severities, vulnerability.severity_index())
                && self.exclusion_matches(filter.exclusion, vulnerability.package())
        };
        let vulnerabilities = self.model.vulnerabilities();
        match sort {
            None => filter_page(vulnerabilities, matches, page),
            Some(spec) => match spec.field {
                VulnerabilitySortField::SeverityIndex => filter_sort_page(
                    vulnerabilities,
                    matches,
                    |vulnerability| vulnerability.severity_index(),
                    spec.direction,
                    page,
                ),
                VulnerabilitySortField::Package => filter_sort_page(
                    vulnerabilities,
                    matches,
                    |vulnerability| vulnerability.package_label().to_lowercase(),
                    spec.direction,
                    page,
                ),
                VulnerabilitySortField::Id => filter_sort_page(
                    vulnerabilities,
                    matches,
                    |vulnerability| vulnerability.id().to_lowercase(),
                    spec.direction,
                    page,
                ),
            },
        }
    }

    /// Exclusion-state filter for records that reference a package.
    ///
    /// A record whose package is unknown passes either state; only the
    /// package's own exclusion can rule it in or out.
    fn exclusion_matches(&self, state: Option<ExclusionState>, handle: PackageHandle) -> bool {
        let Some(state) = state else {
            return true;
        };
        let Some(package) = self.model.package(handle) else {
            return true;
        };
        match state {
            ExclusionState::Excluded => package.is_excluded(),
            ExclusionState::Included => !package.is_excluded(),
        }
    }
}

fn severity_matches(
    severities: &Option<std::collections::BTreeSet<u8>>,
    severity_index: u8,
) -> bool {
    match severities {
        Some(set) => set.contains(&severity_index),
        None => true,
    }
}

fn license_matches(filter: &Option<String>, package: &Package) -> bool {
    let Some(needle) = filter else {
        return true;
    };
    package
        .declared_licenses()
        .iter()
        .chain(package.detected_licenses().iter())
        .any(|license| super::filter::contains_ci(license, needle))
}
