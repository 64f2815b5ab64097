/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console).
pub mod payload_source;
pub mod progress_reporter;

pub use payload_source::PayloadSource;
pub use progress_reporter::ProgressReporter;
