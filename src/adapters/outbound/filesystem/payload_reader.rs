use std::path::Path;

use crate::application::dto::RawPayload;
use crate::ports::outbound::PayloadSource;
use crate::report_aggregation::services::payload_decoder::{CONTENT_TYPE_GZIP, CONTENT_TYPE_JSON};
use crate::shared::Result;

/// Element id of the data block embedded in a report HTML document
const EMBEDDED_BLOCK_ID: &str = "scan-report-data";

/// FileSystemPayloadReader adapter for reading report documents from disk
///
/// Three document shapes are recognized:
/// - an HTML report containing `<script id="scan-report-data" type="...">`
///   (attributes in any order) - the block's type and text are extracted;
/// - a `.b64` / `.gz.b64` file - treated as an `application/gzip` payload;
/// - anything else - treated as a plain `application/json` payload.
pub struct FileSystemPayloadReader;

impl FileSystemPayloadReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemPayloadReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadSource for FileSystemPayloadReader {
    fn read_payload(&self, location: &Path) -> Result<RawPayload> {
        let document = std::fs::read_to_string(location).map_err(|e| {
            anyhow::anyhow!("Failed to read report file {}: {}", location.display(), e)
        })?;

        if let Some((content_type, text)) = extract_embedded_block(&document) {
            return Ok(RawPayload::new(content_type, text));
        }

        let file_name = location
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let content_type = if file_name.ends_with(".b64") {
            CONTENT_TYPE_GZIP
        } else {
            CONTENT_TYPE_JSON
        };
        Ok(RawPayload::new(content_type.to_string(), document))
    }
}

/// Finds the embedded report data block in an HTML document
///
/// Returns the block's declared type (defaulting to JSON when the attribute
/// is missing) and its raw text content.
fn extract_embedded_block(document: &str) -> Option<(String, String)> {
    let mut search_from = 0;
    while let Some(relative) = document[search_from..].find("<script") {
        let tag_start = search_from + relative;
        let tag_end = tag_start + document[tag_start..].find('>')?;
        let tag = &document[tag_start..tag_end];

        if attribute_value(tag, "id").as_deref() == Some(EMBEDDED_BLOCK_ID) {
            let body_start = tag_end + 1;
            let body_end = body_start + document[body_start..].find("</script>")?;
            let content_type = attribute_value(tag, "type")
                .unwrap_or_else(|| CONTENT_TYPE_JSON.to_string());
            return Some((content_type, document[body_start..body_end].to_string()));
        }

        search_from = tag_end + 1;
    }
    None
}

/// Extracts a double-quoted attribute value from an opening tag
fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{}=\"", name);
    for (position, _) in tag.match_indices(&needle) {
        // Must be a whole attribute name, not the tail of another one
        let preceded_by_whitespace = tag[..position]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());
        if !preceded_by_whitespace {
            continue;
        }
        let start = position + needle.len();
        if let Some(length) = tag[start..].find('"') {
            return Some(tag[start..start + length].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_embedded_block_type_first() {
        let html = r#"<html><script type="application/gzip" id="scan-report-data">PAYLOAD</script></html>"#;
        let (content_type, text) = extract_embedded_block(html).unwrap();
        assert_eq!(content_type, "application/gzip");
        assert_eq!(text, "PAYLOAD");
    }

    #[test]
    fn test_extract_embedded_block_id_first() {
        let html = r#"<script id="scan-report-data" type="application/json">{"violations":[]}</script>"#;
        let (content_type, text) = extract_embedded_block(html).unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(text, r#"{"violations":[]}"#);
    }

    #[test]
    fn test_extract_skips_other_scripts() {
        let html = concat!(
            r#"<script id="bootstrap" type="text/javascript">init();</script>"#,
            r#"<script id="scan-report-data" type="application/json">{}</script>"#,
        );
        let (content_type, text) = extract_embedded_block(html).unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_extract_defaults_type_to_json() {
        let html = r#"<script id="scan-report-data">{}</script>"#;
        let (content_type, _) = extract_embedded_block(html).unwrap();
        assert_eq!(content_type, "application/json");
    }

    #[test]
    fn test_extract_none_without_block() {
        assert!(extract_embedded_block("<html><body>no data</body></html>").is_none());
    }

    #[test]
    fn test_attribute_value_ignores_partial_name_match() {
        let tag = r#"<script data-id="other" id="scan-report-data""#;
        assert_eq!(attribute_value(tag, "id").as_deref(), Some("scan-report-data"));
    }

    #[test]
    fn test_read_plain_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        fs::write(&path, r#"{"violations":[]}"#).unwrap();

        let payload = FileSystemPayloadReader::new().read_payload(&path).unwrap();
        assert_eq!(payload.content_type, CONTENT_TYPE_JSON);
        assert_eq!(payload.text, r#"{"violations":[]}"#);
    }

    #[test]
    fn test_read_b64_file_is_gzip_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.gz.b64");
        fs::write(&path, "SGVsbG8=").unwrap();

        let payload = FileSystemPayloadReader::new().read_payload(&path).unwrap();
        assert_eq!(payload.content_type, CONTENT_TYPE_GZIP);
    }

    #[test]
    fn test_read_html_report_extracts_block() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.html");
        fs::write(
            &path,
            r#"<html><head></head><body><script id="scan-report-data" type="application/json">{"packages":[]}</script></body></html>"#,
        )
        .unwrap();

        let payload = FileSystemPayloadReader::new().read_payload(&path).unwrap();
        assert_eq!(payload.content_type, CONTENT_TYPE_JSON);
        assert_eq!(payload.text, r#"{"packages":[]}"#);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let result = FileSystemPayloadReader::new()
            .read_payload(Path::new("/nonexistent/report.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }
}
