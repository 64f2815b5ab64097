/// Direction of a sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sortable columns of the package view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSortField {
    Id,
}

/// Sort specification for the package view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageSort {
    pub field: PackageSortField,
    pub direction: SortDirection,
}

impl PackageSort {
    pub fn new(field: PackageSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Sortable columns of the rule violation view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSortField {
    SeverityIndex,
    Package,
    Rule,
}

/// Sort specification for the rule violation view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViolationSort {
    pub field: ViolationSortField,
    pub direction: SortDirection,
}

impl ViolationSort {
    pub fn new(field: ViolationSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Sortable columns of the vulnerability view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulnerabilitySortField {
    SeverityIndex,
    Package,
    Id,
}

/// Sort specification for the vulnerability view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VulnerabilitySort {
    pub field: VulnerabilitySortField,
    pub direction: SortDirection,
}

impl VulnerabilitySort {
    pub fn new(field: VulnerabilitySortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}
