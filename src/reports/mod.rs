//! Reports module for the tariff advisor
//!
//! Every report is an [`ArtifactRenderer`] over the same
//! [`CalculationResult`]:
//!
//! - `text`: chat message with a fixed-width table
//! - `document`: paginated A4 PDF
//! - `spreadsheet`: XLSX workbook with a line chart and logo
//!
//! `history` builds the per-user history workbook.

pub mod document;
pub mod history;
pub mod spreadsheet;
pub mod text;

pub use document::{DocumentLayout, DocumentRenderer};
pub use history::HistoryWorkbook;
pub use spreadsheet::{SheetRow, SpreadsheetRenderer};
pub use text::TextRenderer;

use crate::error::AdvisorResult;
use crate::models::CalculationResult;

/// Kind of a rendered artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Chat message text with light markup
    Text,
    /// PDF document
    Document,
    /// XLSX workbook
    Spreadsheet,
}

/// One rendered output, ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// File name used when the artifact is delivered as a file
    pub file_name: String,
    /// What the bytes contain
    pub kind: ArtifactKind,
    /// Rendered content
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Create an artifact
    pub fn new(file_name: impl Into<String>, kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            bytes,
        }
    }

    /// The content as text, for text artifacts
    pub fn as_text(&self) -> Option<&str> {
        match self.kind {
            ArtifactKind::Text => std::str::from_utf8(&self.bytes).ok(),
            _ => None,
        }
    }

    /// A copy of this artifact delivered under another file name
    pub fn renamed(&self, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: self.kind,
            bytes: self.bytes.clone(),
        }
    }
}

/// How a table row is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Column titles, with a distinct background
    Header,
    /// Month with non-negative savings
    Normal,
    /// Month where the switch is still at a loss
    Loss,
}

/// Column titles shared by every table
pub const TABLE_HEADER: [&str; 4] = ["Month", "Old", "New", "Savings"];

/// A renderer turning a calculation into one artifact
pub trait ArtifactRenderer {
    /// Render the calculation; the result is never modified
    fn render(&self, result: &CalculationResult) -> AdvisorResult<Artifact>;

    /// Months this renderer marks as a loss, in table order
    fn flagged_months(&self, result: &CalculationResult) -> Vec<u32>;
}

/// Payback and total savings lines shared by the text and document reports
pub fn summary_lines(result: &CalculationResult, currency: &str) -> [String; 2] {
    let payback = match result.payback_month {
        Some(month) => format!("Payback: {} months.", month),
        None => "Payback not reached.".to_string(),
    };
    let total = format!(
        "Total savings over {} months: {} {}",
        result.months,
        result.rounded_total_savings(),
        currency
    );
    [payback, total]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TariffInputs;
    use crate::services::amortization::calculate;

    #[test]
    fn test_summary_lines_with_payback() {
        let result = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 1.0));
        let [payback, total] = summary_lines(&result, "RUB");

        assert_eq!(payback, "Payback: 8 months.");
        assert_eq!(total, "Total savings over 12 months: 1800 RUB");
    }

    #[test]
    fn test_summary_lines_without_payback() {
        let result = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 0.0));
        let [payback, total] = summary_lines(&result, "RUB");

        assert_eq!(payback, "Payback not reached.");
        assert_eq!(total, "Total savings over 0 months: -3000 RUB");
    }

    #[test]
    fn test_document_and_spreadsheet_flag_same_months() {
        let result = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 2.0));
        let document = DocumentRenderer::new("RUB");
        let spreadsheet = SpreadsheetRenderer::new("RUB");
        let text = TextRenderer::new("RUB");

        let expected: Vec<u32> = (1..=7).collect();
        assert_eq!(document.flagged_months(&result), expected);
        assert_eq!(spreadsheet.flagged_months(&result), expected);
        assert_eq!(text.flagged_months(&result), expected);
    }

    #[test]
    fn test_flagging_follows_displayed_figure() {
        // month 1 loses 0.4, which displays as 0 and is not flagged
        let result = calculate(&TariffInputs::new(100.0, 99.0, 1.4, 0.25));
        assert_eq!(result.rows[0].savings, 0.0);

        let document = DocumentRenderer::new("RUB");
        let spreadsheet = SpreadsheetRenderer::new("RUB");
        assert!(document.flagged_months(&result).is_empty());
        assert_eq!(
            document.flagged_months(&result),
            spreadsheet.flagged_months(&result)
        );
    }

    #[test]
    fn test_renamed_artifact_keeps_bytes() {
        let artifact = Artifact::new("benefit.pdf", ArtifactKind::Document, vec![1, 2, 3]);
        let copy = artifact.renamed("user_benefit.pdf");

        assert_eq!(copy.file_name, "user_benefit.pdf");
        assert_eq!(copy.bytes, artifact.bytes);
        assert!(copy.as_text().is_none());
    }
}
