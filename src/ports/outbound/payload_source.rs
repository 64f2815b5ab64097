use std::path::Path;

use crate::application::dto::RawPayload;
use crate::shared::Result;

/// PayloadSource port for producing the embedded report payload
///
/// A source locates the report data block for one session - from a report
/// file on disk, a test fixture, or wherever the host document lives - and
/// hands it over undecoded. The pipeline neither knows nor cares where the
/// bytes came from.
pub trait PayloadSource {
    /// Reads the raw payload for the report at the given location
    ///
    /// # Arguments
    /// * `location` - Path of the report document
    ///
    /// # Returns
    /// The raw payload with its declared content type
    fn read_payload(&self, location: &Path) -> Result<RawPayload>;
}
