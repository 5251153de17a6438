//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::service::{IntegrationRequest, IntegrationResult};

/// JSON formatter - outputs the result record as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full result record as JSON"
    }

    fn format(&self, _request: &IntegrationRequest, result: &IntegrationResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_run;
    use crate::quadrature::Method;

    #[test]
    fn test_json_format() {
        let (request, result) = sample_run(Method::Midpoint);
        let output = JsonFormatter.format(&request, &result).unwrap();

        let parsed: IntegrationResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, result);
        assert!(output.contains("\"method\": \"midpoint\""));
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
