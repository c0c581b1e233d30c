use crate::models::ExtractionReport;
use super::FormatError;

/// Serialize an ExtractionReport to YAML
pub fn to_yaml(report: &ExtractionReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Extraction, StatsSummary};
    use std::time::Duration;

    #[test]
    fn test_to_yaml() {
        let report = ExtractionReport::new(
            Extraction::Multi(vec![StatsSummary {
                cli_output: String::new(),
                output_path: "/out".to_string(),
                errors: vec![],
                external_modules: vec![],
            }]),
            Duration::ZERO,
        );

        let yaml = to_yaml(&report).unwrap();
        assert!(yaml.contains("outputPath: /out"));
        assert!(yaml.contains("externalModules: []"));
    }
}
