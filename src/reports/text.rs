//! Chat message report
//!
//! Produces the reply sent at the end of the wizard: an inputs block, the
//! month table in a monospace block and the payback summary. Bold sections
//! use `*...*` and the table is fenced with triple backticks.

use super::{summary_lines, Artifact, ArtifactKind, ArtifactRenderer, TABLE_HEADER};
use crate::error::AdvisorResult;
use crate::models::CalculationResult;

const FENCE: &str = "```";

/// Format one fixed-width table line (left-justified columns)
fn table_line(cells: &[impl AsRef<str>; 4]) -> String {
    format!(
        "{:<7} {:<10} {:<10} {:<10}\n",
        cells[0].as_ref(),
        cells[1].as_ref(),
        cells[2].as_ref(),
        cells[3].as_ref()
    )
}

/// Renders the calculation as a chat message
#[derive(Debug, Clone)]
pub struct TextRenderer {
    currency: String,
}

impl TextRenderer {
    /// Create a renderer printing amounts in the given currency
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// The fixed-width table: header line then one line per month
    pub fn table(&self, result: &CalculationResult) -> String {
        let mut output = table_line(&TABLE_HEADER);
        for row in &result.rows {
            output.push_str(&table_line(&row.cells()));
        }
        output
    }

    /// The full chat message
    pub fn message(&self, result: &CalculationResult) -> String {
        let inputs = &result.inputs;
        let currency = &self.currency;
        let mut output = String::new();

        output.push_str("*Inputs:*\n");
        output.push_str(&format!(
            "- Current tariff: {:.2} {}/month\n",
            inputs.current_rate, currency
        ));
        output.push_str(&format!(
            "- New tariff: {:.2} {}/month\n",
            inputs.new_rate, currency
        ));
        output.push_str(&format!(
            "- Connection cost: {:.2} {}\n",
            inputs.connection_cost, currency
        ));
        output.push_str(&format!("- Analysis period: {} months\n\n", result.months));

        output.push_str("*Results:*\n");
        output.push_str(FENCE);
        output.push('\n');
        output.push_str(&self.table(result));
        output.push_str(FENCE);
        output.push('\n');

        let [payback, total] = summary_lines(result, currency);
        output.push('\n');
        output.push_str(&payback);
        output.push('\n');
        output.push_str(&total);

        output
    }
}

impl ArtifactRenderer for TextRenderer {
    fn render(&self, result: &CalculationResult) -> AdvisorResult<Artifact> {
        Ok(Artifact::new(
            "benefit.txt",
            ArtifactKind::Text,
            self.message(result).into_bytes(),
        ))
    }

    /// Plain text carries no styling; a loss shows as a leading minus in
    /// the savings column.
    fn flagged_months(&self, result: &CalculationResult) -> Vec<u32> {
        self.table(result)
            .lines()
            .skip(1)
            .filter_map(|line| {
                let mut columns = line.split_whitespace();
                let month = columns.next()?.parse().ok()?;
                let savings = columns.nth(2)?;
                savings.starts_with('-').then_some(month)
            })
            .collect()
    }
}
