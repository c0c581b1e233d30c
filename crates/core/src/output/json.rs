use crate::models::ExtractionReport;
use super::FormatError;

/// Serialize an ExtractionReport to pretty-printed JSON
pub fn to_json(report: &ExtractionReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}
