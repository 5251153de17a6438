//! CSV output formatter
//!
//! One `x,y` row per sampled point, for plotting tools.

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::service::{IntegrationRequest, IntegrationResult};

/// CSV formatter - outputs the sampled points
pub struct CsvFormatter;

impl OutputFormatter for CsvFormatter {
    fn name(&self) -> &str {
        "csv"
    }

    fn description(&self) -> &str {
        "Sampled points as x,y rows"
    }

    fn format(&self, _request: &IntegrationRequest, result: &IntegrationResult) -> Result<String> {
        let mut output = String::from("x,y\n");
        for (x, y) in result.x_values.iter().zip(&result.y_values) {
            output.push_str(&format!("{},{}\n", x, y));
        }
        Ok(output)
    }
}
