//! Payload decoding - the first pipeline stage
//!
//! The embedded report text arrives in one of two transport encodings,
//! declared by a content-type token. Before any decode attempt the text is
//! checked against the unexpanded template placeholder, so an untouched
//! report template fails fast as "no data" instead of as a decode error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use std::io::Read;

use crate::shared::error::ReportError;

/// Content type of a payload that is plain JSON text
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type of a payload that is Base64-encoded gzip-compressed JSON
pub const CONTENT_TYPE_GZIP: &str = "application/gzip";

/// The placeholder token left in a report template whose data block was
/// never substituted. Detection is by exact length, not content: the
/// generator guarantees no real payload has this length.
pub const DATA_PLACEHOLDER: &str = "SCAN_REPORT_DATA_PLACEHOLDER";

/// Transport encoding of an embedded report payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// The text is the JSON document itself
    Json,
    /// The text is Base64 of gzip-compressed UTF-8 JSON
    GzipBase64,
}

/// Checks whether the payload text is absent or the unexpanded placeholder
pub fn is_absent(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.len() == DATA_PLACEHOLDER.len()
}

/// Maps a declared content-type token to its payload encoding
///
/// Any other token is a decode failure; the pipeline does not guess.
pub fn encoding_for(content_type: &str) -> Result<PayloadEncoding, ReportError> {
    match content_type.trim() {
        CONTENT_TYPE_JSON => Ok(PayloadEncoding::Json),
        CONTENT_TYPE_GZIP => Ok(PayloadEncoding::GzipBase64),
        _ => Err(ReportError::Decode),
    }
}

/// Decodes the Base64 layer of a gzip payload to raw bytes
pub fn decode_base64(text: &str) -> Result<Vec<u8>, ReportError> {
    STANDARD.decode(text.trim()).map_err(|_| ReportError::Decode)
}

/// Inflates gzip bytes and decodes them as UTF-8 text
pub fn inflate_to_utf8(bytes: &[u8]) -> Result<String, ReportError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|_| ReportError::Decode)?;
    Ok(text)
}

/// Decodes a payload to JSON text in one step
///
/// The pipeline itself uses the granular functions above so it can report
/// the inflate stage separately; this composition serves everything else.
pub fn decode(content_type: &str, text: &str) -> Result<String, ReportError> {
    if is_absent(text) {
        return Err(ReportError::DataAbsent);
    }
    match encoding_for(content_type)? {
        PayloadEncoding::Json => Ok(text.to_string()),
        PayloadEncoding::GzipBase64 => {
            let bytes = decode_base64(text)?;
            inflate_to_utf8(&bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    /// Builds an application/gzip payload the way the report generator does
    fn encode_gzip_base64(text: &str) -> String {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        STANDARD.encode(compressed)
    }

    #[test]
    fn test_round_trip_law() {
        let original = r#"{"violations":[],"packages":[]}"#;
        let encoded = encode_gzip_base64(original);
        let decoded = decode(CONTENT_TYPE_GZIP, &encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_round_trip_law_unicode() {
        let original = r#"{"packages":[{"id":"pkg:npm/café@1.0"}]}"#;
        let encoded = encode_gzip_base64(original);
        let decoded = decode(CONTENT_TYPE_GZIP, &encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_json_payload_is_used_as_is() {
        let text = r#"{"violations":[]}"#;
        let decoded = decode(CONTENT_TYPE_JSON, text).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_placeholder_is_absent_by_length() {
        // Any text of exactly the placeholder's length counts as absent
        assert!(is_absent(DATA_PLACEHOLDER));
        assert!(is_absent(&"x".repeat(DATA_PLACEHOLDER.len())));
        assert!(!is_absent(&"x".repeat(DATA_PLACEHOLDER.len() + 1)));
    }

    #[test]
    fn test_empty_text_is_absent() {
        assert!(is_absent(""));
        assert!(is_absent("   \n  "));
    }

    #[test]
    fn test_placeholder_short_circuits_before_decode() {
        let result = decode(CONTENT_TYPE_JSON, DATA_PLACEHOLDER);
        assert!(matches!(result, Err(ReportError::DataAbsent)));
    }

    #[test]
    fn test_unknown_content_type_is_decode_error() {
        let result = encoding_for("text/html");
        assert!(matches!(result, Err(ReportError::Decode)));
    }

    #[test]
    fn test_content_type_token_is_trimmed() {
        assert_eq!(
            encoding_for(" application/gzip ").unwrap(),
            PayloadEncoding::GzipBase64
        );
    }

    #[test]
    fn test_malformed_base64_is_decode_error() {
        let result = decode(CONTENT_TYPE_GZIP, "not base64 at all!!! definitely not");
        assert!(matches!(result, Err(ReportError::Decode)));
    }

    #[test]
    fn test_valid_base64_of_garbage_is_decode_error() {
        // Base64 decodes fine, gzip inflate must fail
        let garbage = STANDARD.encode(b"this is not a gzip stream padded out");
        let result = decode(CONTENT_TYPE_GZIP, &garbage);
        assert!(matches!(result, Err(ReportError::Decode)));
    }

    #[test]
    fn test_payload_with_surrounding_whitespace() {
        let original = r#"{"violations":[]}"#;
        let encoded = format!("\n  {}  \n", encode_gzip_base64(original));
        let decoded = decode(CONTENT_TYPE_GZIP, &encoded).unwrap();
        assert_eq!(decoded, original);
    }
}
