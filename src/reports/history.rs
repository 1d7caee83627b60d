//! Per-user history workbook

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::{Artifact, ArtifactKind};
use crate::error::AdvisorResult;
use crate::models::{HistoryRecord, Payback, HISTORY_HEADER};

/// Worksheet name of the history export
pub const HISTORY_SHEET: &str = "History";

/// Builds a workbook listing history records under the log header
pub struct HistoryWorkbook;

impl HistoryWorkbook {
    /// Render the records, in the given order
    pub fn render(records: &[HistoryRecord]) -> AdvisorResult<Artifact> {
        let bytes = Self::build(records)?;
        Ok(Artifact::new(
            "my_history.xlsx",
            ArtifactKind::Spreadsheet,
            bytes,
        ))
    }

    fn build(records: &[HistoryRecord]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet().set_name(HISTORY_SHEET)?;
        let bold = Format::new().set_bold();

        for (col, title) in HISTORY_HEADER.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
        }
        worksheet.set_column_width(0, 18)?;
        worksheet.set_column_width(1, 24)?;

        for (idx, record) in records.iter().enumerate() {
            let row = 1 + idx as u32;
            worksheet.write_string(row, 0, record.timestamp.as_str())?;
            worksheet.write_string(row, 1, record.user_display_name.as_str())?;
            worksheet.write_number(row, 2, record.current_rate)?;
            worksheet.write_number(row, 3, record.new_rate)?;
            worksheet.write_number(row, 4, record.connection_cost)?;
            worksheet.write_number(row, 5, record.months)?;
            match record.payback {
                Payback::Month(month) => worksheet.write_number(row, 6, month)?,
                Payback::NotReached => worksheet.write_string(row, 6, Payback::NOT_REACHED)?,
            };
            worksheet.write_number(row, 7, record.total_savings)?;
        }

        workbook.save_to_buffer()
    }
}
