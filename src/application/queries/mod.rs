//! The query layer - stateless filter/sort/page operations over the model
//!
//! Every display view goes through one of the three list operations here
//! instead of carrying its own filtering closures. The operations are pure
//! functions of (model, filter, sort, page): identical inputs against an
//! unchanged model always return identical results, and nothing is cached
//! or shared between invocations from different views.

mod engine;
mod filter;
mod page;
mod report_queries;
mod sort;

pub use filter::{ExclusionState, PackageFilter, ViolationFilter, VulnerabilityFilter};
pub use page::{PageSpec, QueryPage};
pub use report_queries::ReportQueries;
pub use sort::{
    PackageSort, PackageSortField, SortDirection, ViolationSort, ViolationSortField,
    VulnerabilitySort, VulnerabilitySortField,
};
