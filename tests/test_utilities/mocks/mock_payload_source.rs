use std::path::Path;

use scanview::prelude::*;

/// Mock PayloadSource that hands out a fixed payload regardless of location
pub struct MockPayloadSource {
    content_type: String,
    text: String,
}

impl MockPayloadSource {
    pub fn new(content_type: &str, text: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            text: text.to_string(),
        }
    }
}

impl PayloadSource for MockPayloadSource {
    fn read_payload(&self, _location: &Path) -> Result<RawPayload> {
        Ok(RawPayload::new(
            self.content_type.clone(),
            self.text.clone(),
        ))
    }
}
