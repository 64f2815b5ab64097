mod mock_payload_source;
mod mock_progress_reporter;

pub use mock_payload_source::MockPayloadSource;
pub use mock_progress_reporter::MockProgressReporter;
