//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::service::{IntegrationRequest, IntegrationResult};

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable summary"
    }

    fn format(&self, request: &IntegrationRequest, result: &IntegrationResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "Integral of {} over [{}, {}]\n",
            request.function, request.lower_bound, request.upper_bound
        ));
        output.push_str(&format!("Method: {}\n", result.method));
        output.push_str(&format!(
            "Points: {} requested, {} sampled\n\n",
            result.num_points,
            result.x_values.len()
        ));

        output.push_str(&format!("Value: {:.10}\n", result.value));
        match result.error_estimate {
            Some(error) => output.push_str(&format!("Error estimate: {:.3e}\n", error)),
            None => output.push_str("Error estimate: n/a (too few points)\n"),
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_run;
    use crate::quadrature::Method;

    #[test]
    fn test_text_format() {
        let (request, result) = sample_run(Method::Simpson);
        let output = TextFormatter.format(&request, &result).unwrap();

        assert!(output.contains("Integral of x**2 over [0, 1]"));
        assert!(output.contains("Method: simpson"));
        assert!(output.contains("Points: 10 requested, 11 sampled"));
        assert!(output.contains("Value: 0.3333333333"));
        assert!(output.contains("Error estimate:"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
