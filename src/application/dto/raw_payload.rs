/// RawPayload - the embedded report data block exactly as found in the host
/// document, before any decoding
///
/// Created once per session by a payload source adapter and consumed whole
/// by the load pipeline.
#[derive(Debug, Clone)]
pub struct RawPayload {
    /// Declared transport encoding, e.g. "application/json"
    pub content_type: String,
    /// The raw embedded text (JSON, or Base64 of gzip)
    pub text: String,
}

impl RawPayload {
    pub fn new(content_type: String, text: String) -> Self {
        Self { content_type, text }
    }
}
