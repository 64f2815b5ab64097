//! scanview - terminal viewer for embedded compliance-scan reports
//!
//! This library ingests a single embedded compliance-scan report (package
//! inventory, license findings, rule violations, vulnerabilities,
//! resolutions, path/scope excludes) and turns it into a normalized,
//! query-ready in-memory model, following hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`report_aggregation`): the typed report model and the
//!   ingestion services (payload decoding, parsing, aggregation)
//! - **Application Layer** (`application`): the load use case driving the
//!   pipeline, and the query layer every display view goes through
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use scanview::prelude::*;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Read the embedded payload and run the load pipeline
//! let source = FileSystemPayloadReader::new();
//! let payload = source.read_payload(Path::new("scan-report.html"))?;
//! let use_case = LoadReportUseCase::new(StderrProgressReporter::new());
//! let model = use_case.execute(payload).await?;
//!
//! // Query the model the way a display view would
//! let queries = ReportQueries::new(&model);
//! let page = queries.list_rule_violations(
//!     &ViolationFilter::default(),
//!     Some(&ViolationSort::new(
//!         ViolationSortField::SeverityIndex,
//!         SortDirection::Ascending,
//!     )),
//!     &PageSpec::new(0, Some(100)),
//! );
//! println!("{} of {} violations", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod report_aggregation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemPayloadReader;
    pub use crate::application::dto::RawPayload;
    pub use crate::application::queries::{
        ExclusionState, PackageFilter, PackageSort, PackageSortField, PageSpec, QueryPage,
        ReportQueries, SortDirection, ViolationFilter, ViolationSort, ViolationSortField,
        VulnerabilityFilter, VulnerabilitySort, VulnerabilitySortField,
    };
    pub use crate::application::use_cases::{LoadPhase, LoadReportUseCase};
    pub use crate::ports::outbound::{PayloadSource, ProgressReporter};
    pub use crate::report_aggregation::domain::{
        AggregationIssue, AggregationModel, Package, PackageHandle, PackageId, Resolution,
        RuleViolation, ViolationSeverity, Vulnerability, VulnerabilitySeverity,
    };
    pub use crate::shared::error::{ExitCode, ReportError};
    pub use crate::shared::Result;
}
