//! XLSX report
//!
//! Single-sheet workbook layout (0-based rows):
//!
//! | Rows      | Content                                          |
//! |-----------|--------------------------------------------------|
//! | 0         | "Inputs" label                                   |
//! | 1..=4     | the four inputs, label in A and value in B       |
//! | 6         | table header (bold, centred, blue fill)          |
//! | 7..       | one row per month, loss rows filled pink         |
//! | after     | payback and total savings                        |
//! | after     | optional footer lines, after one blank row       |
//!
//! A line chart of both cumulative costs sits at F8 and the logo at F1.

use rust_xlsxwriter::{
    Chart, ChartType, Color, Format, FormatAlign, Image, Workbook, Worksheet, XlsxError,
};
use tracing::debug;

use super::{Artifact, ArtifactKind, ArtifactRenderer, RowStyle, TABLE_HEADER};
use crate::error::AdvisorResult;
use crate::models::{CalculationResult, MonthRow};

/// Worksheet name, referenced by the chart ranges
pub const SHEET_NAME: &str = "Calculation";

/// Row holding the table header
pub const HEADER_ROW: u32 = 6;

/// Decorative logo shown next to the table
pub const LOGO_PNG: &[u8] = include_bytes!("../../assets/logo.png");

const HEADER_FILL: u32 = 0xBDD7EE;
const LOSS_FILL: u32 = 0xFFC7CE;
const CHART_ROW: u32 = 7;
const SIDE_COLUMN: u16 = 5;

/// One month placed on the worksheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetRow {
    /// Worksheet row (0-based)
    pub row: u32,
    /// The month written there
    pub data: MonthRow,
    /// Normal or loss
    pub style: RowStyle,
}

/// Renders the calculation as an XLSX workbook
#[derive(Debug, Clone)]
pub struct SpreadsheetRenderer {
    currency: String,
    footer: Vec<(String, String)>,
}

impl SpreadsheetRenderer {
    /// Create a renderer labelling the chart axis with the given currency
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            footer: Vec::new(),
        }
    }

    /// Label and value pairs written below the summary
    pub fn with_footer(mut self, footer: impl IntoIterator<Item = (String, String)>) -> Self {
        self.footer = footer.into_iter().collect();
        self
    }

    /// Placement and style of every month row
    pub fn table_rows(&self, result: &CalculationResult) -> Vec<SheetRow> {
        result
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| SheetRow {
                row: HEADER_ROW + 1 + idx as u32,
                data: *row,
                style: if row.is_loss() {
                    RowStyle::Loss
                } else {
                    RowStyle::Normal
                },
            })
            .collect()
    }

    fn build(&self, result: &CalculationResult) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

        let bold = Format::new().set_bold();
        let header = row_format(RowStyle::Header);

        worksheet.set_column_width(0, 24)?;
        for col in 1..TABLE_HEADER.len() as u16 {
            worksheet.set_column_width(col, 12)?;
        }

        write_inputs(worksheet, result, &bold)?;

        for (col, title) in TABLE_HEADER.iter().enumerate() {
            worksheet.write_string_with_format(HEADER_ROW, col as u16, *title, &header)?;
        }

        let rows = self.table_rows(result);
        for sheet_row in &rows {
            let format = &row_format(sheet_row.style);
            let data = &sheet_row.data;
            worksheet.write_number_with_format(sheet_row.row, 0, data.month, format)?;
            worksheet.write_number_with_format(sheet_row.row, 1, data.cumulative_old, format)?;
            worksheet.write_number_with_format(sheet_row.row, 2, data.cumulative_new, format)?;
            worksheet.write_number_with_format(sheet_row.row, 3, data.savings, format)?;
        }

        let summary_row = HEADER_ROW + rows.len() as u32 + 2;
        worksheet.write_string_with_format(summary_row, 0, "Payback month", &bold)?;
        match result.payback_month {
            Some(month) => worksheet.write_number(summary_row, 1, month)?,
            None => worksheet.write_string(summary_row, 1, "not reached")?,
        };
        worksheet.write_string_with_format(summary_row + 1, 0, "Total savings", &bold)?;
        worksheet.write_number(summary_row + 1, 1, result.rounded_total_savings())?;

        for (idx, (label, value)) in self.footer.iter().enumerate() {
            let row = summary_row + 3 + idx as u32;
            worksheet.write_string_with_format(row, 0, label.as_str(), &bold)?;
            worksheet.write_string(row, 1, value.as_str())?;
        }

        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            let chart = self.chart(first.row, last.row);
            worksheet.insert_chart(CHART_ROW, SIDE_COLUMN, &chart)?;
        }

        let logo = Image::new_from_buffer(LOGO_PNG)?.set_alt_text("logo");
        worksheet.insert_image(0, SIDE_COLUMN, &logo)?;

        workbook.save_to_buffer()
    }

    fn chart(&self, first_row: u32, last_row: u32) -> Chart {
        let mut chart = Chart::new(ChartType::Line);
        chart.title().set_name("Cumulative costs");
        chart.x_axis().set_name("Month");
        chart.y_axis().set_name(self.currency.as_str());

        for col in [1u16, 2] {
            chart
                .add_series()
                .set_name((SHEET_NAME, HEADER_ROW, col))
                .set_categories((SHEET_NAME, first_row, 0, last_row, 0))
                .set_values((SHEET_NAME, first_row, col, last_row, col));
        }
        chart
    }
}

/// Cell format for a table row of the given style
fn row_format(style: RowStyle) -> Format {
    match style {
        RowStyle::Header => Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(Color::RGB(HEADER_FILL)),
        RowStyle::Loss => Format::new().set_background_color(Color::RGB(LOSS_FILL)),
        RowStyle::Normal => Format::new(),
    }
}

fn write_inputs(
    worksheet: &mut Worksheet,
    result: &CalculationResult,
    bold: &Format,
) -> Result<(), XlsxError> {
    let inputs = &result.inputs;
    worksheet.write_string_with_format(0, 0, "Inputs", bold)?;

    let fields = [
        ("Current tariff", inputs.current_rate),
        ("New tariff", inputs.new_rate),
        ("Connection cost", inputs.connection_cost),
        ("Period (months)", f64::from(result.months)),
    ];
    for (idx, (label, value)) in fields.iter().enumerate() {
        let row = 1 + idx as u32;
        worksheet.write_string(row, 0, *label)?;
        worksheet.write_number(row, 1, *value)?;
    }
    Ok(())
}

impl ArtifactRenderer for SpreadsheetRenderer {
    fn render(&self, result: &CalculationResult) -> AdvisorResult<Artifact> {
        let bytes = self.build(result)?;
        debug!(rows = result.rows.len(), size = bytes.len(), "Rendered XLSX report");
        Ok(Artifact::new(
            "benefit.xlsx",
            ArtifactKind::Spreadsheet,
            bytes,
        ))
    }

    fn flagged_months(&self, result: &CalculationResult) -> Vec<u32> {
        self.table_rows(result)
            .iter()
            .filter(|row| row.style == RowStyle::Loss)
            .map(|row| row.data.month)
            .collect()
    }
}
