/// Report aggregation context - domain model and ingestion services
///
/// This module owns the typed scan-report model and the services that
/// produce it: payload decoding, report parsing, and aggregation.
pub mod domain;
pub mod services;
