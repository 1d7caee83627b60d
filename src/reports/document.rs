//! PDF report
//!
//! Lays the calculation out on A4 pages: a title, the inputs and summary
//! block, then a grid table of every month. The header row sits on a light
//! blue background and loss rows are printed in red. When the table does
//! not fit, it continues on new pages with the header repeated.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};
use tracing::debug;

use super::{summary_lines, Artifact, ArtifactKind, ArtifactRenderer, RowStyle, TABLE_HEADER};
use crate::error::AdvisorResult;
use crate::models::CalculationResult;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
const INTRO_LINE_HEIGHT: f32 = 6.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const TABLE_SIZE: f32 = 10.0;

// Helvetica averages a little over half an em per glyph
const GLYPH_WIDTH_EM: f32 = 0.55;
const PT_TO_MM: f32 = 0.352_778;

const TITLE: &str = "Tariff switch benefit";

/// One table line of the document
#[derive(Debug, Clone, PartialEq)]
pub struct TableLine {
    /// Month shown on this line; `None` for the header
    pub month: Option<u32>,
    /// Cell texts in column order
    pub cells: [String; 4],
    /// How the line is drawn
    pub style: RowStyle,
}

impl TableLine {
    fn header() -> Self {
        Self {
            month: None,
            cells: TABLE_HEADER.map(String::from),
            style: RowStyle::Header,
        }
    }
}

/// Page-by-page content of the document, before drawing
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    /// Lines printed above the table on the first page
    pub intro: Vec<String>,
    /// Table lines per page; every page starts with the header
    pub pages: Vec<Vec<TableLine>>,
}

impl DocumentLayout {
    /// All month lines across pages, in order
    pub fn month_lines(&self) -> impl Iterator<Item = &TableLine> {
        self.pages
            .iter()
            .flatten()
            .filter(|line| line.month.is_some())
    }
}

/// Renders the calculation as a PDF document
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    currency: String,
}

impl DocumentRenderer {
    /// Create a renderer printing amounts in the given currency
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Intro block: inputs, then the summary
    fn intro(&self, result: &CalculationResult) -> Vec<String> {
        let inputs = &result.inputs;
        let [payback, total] = summary_lines(result, &self.currency);

        vec![
            "Inputs:".to_string(),
            format!("Current tariff: {:.2} {}/month", inputs.current_rate, self.currency),
            format!("New tariff: {:.2} {}/month", inputs.new_rate, self.currency),
            format!("Connection cost: {:.2} {}", inputs.connection_cost, self.currency),
            format!("Period: {} months", result.months),
            String::new(),
            "Summary:".to_string(),
            payback,
            total,
        ]
    }

    /// Split the table into pages
    pub fn layout(&self, result: &CalculationResult) -> DocumentLayout {
        let intro = self.intro(result);

        let first_capacity = rows_fitting(table_top(intro.len(), true)) - 1;
        let next_capacity = rows_fitting(table_top(0, false)) - 1;

        let mut pages = Vec::new();
        let mut page = vec![TableLine::header()];
        let mut capacity = first_capacity;

        for row in &result.rows {
            if page.len() > capacity {
                pages.push(std::mem::replace(&mut page, vec![TableLine::header()]));
                capacity = next_capacity;
            }
            page.push(TableLine {
                month: Some(row.month),
                cells: row.cells(),
                style: if row.is_loss() {
                    RowStyle::Loss
                } else {
                    RowStyle::Normal
                },
            });
        }
        pages.push(page);

        DocumentLayout { intro, pages }
    }

    fn draw(&self, layout: &DocumentLayout) -> AdvisorResult<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        for (idx, lines) in layout.pages.iter().enumerate() {
            let layer = if idx == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Page {}", idx + 1),
                );
                doc.get_page(page).get_layer(layer)
            };

            let top = if idx == 0 {
                draw_intro(&layer, &layout.intro, &regular, &bold);
                table_top(layout.intro.len(), true)
            } else {
                table_top(0, false)
            };
            draw_table(&layer, lines, top, &regular, &bold);
        }

        Ok(doc.save_to_bytes()?)
    }
}

impl ArtifactRenderer for DocumentRenderer {
    fn render(&self, result: &CalculationResult) -> AdvisorResult<Artifact> {
        let layout = self.layout(result);
        let bytes = self.draw(&layout)?;

        debug!(
            pages = layout.pages.len(),
            size = bytes.len(),
            "Rendered PDF report"
        );
        Ok(Artifact::new("benefit.pdf", ArtifactKind::Document, bytes))
    }

    fn flagged_months(&self, result: &CalculationResult) -> Vec<u32> {
        self.layout(result)
            .month_lines()
            .filter(|line| line.style == RowStyle::Loss)
            .filter_map(|line| line.month)
            .collect()
    }
}

/// Y coordinate of the table's top edge
fn table_top(intro_lines: usize, first_page: bool) -> f32 {
    let mut top = PAGE_HEIGHT - MARGIN;
    if first_page {
        top -= TITLE_SIZE * PT_TO_MM + INTRO_LINE_HEIGHT * 2.0;
        top -= intro_lines as f32 * INTRO_LINE_HEIGHT + INTRO_LINE_HEIGHT;
    }
    top
}

/// Number of table lines between `top` and the bottom margin
fn rows_fitting(top: f32) -> usize {
    ((top - MARGIN) / ROW_HEIGHT).floor().max(2.0) as usize
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn black() -> Color {
    rgb(0.0, 0.0, 0.0)
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH_EM * PT_TO_MM
}

fn draw_intro(
    layer: &PdfLayerReference,
    intro: &[String],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE * PT_TO_MM;
    layer.set_fill_color(black());
    layer.use_text(TITLE, TITLE_SIZE, Mm(MARGIN), Mm(y), bold);
    y -= INTRO_LINE_HEIGHT * 2.0;

    for line in intro {
        // section labels end with a colon
        let font = if line.ends_with(':') { bold } else { regular };
        if !line.is_empty() {
            layer.use_text(line.as_str(), BODY_SIZE, Mm(MARGIN), Mm(y), font);
        }
        y -= INTRO_LINE_HEIGHT;
    }
}

fn draw_table(
    layer: &PdfLayerReference,
    lines: &[TableLine],
    top: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    let column_width = width / TABLE_HEADER.len() as f32;
    let bottom = top - lines.len() as f32 * ROW_HEIGHT;

    for (idx, line) in lines.iter().enumerate() {
        let row_top = top - idx as f32 * ROW_HEIGHT;
        let row_bottom = row_top - ROW_HEIGHT;

        if line.style == RowStyle::Header {
            layer.set_fill_color(rgb(0.678, 0.847, 0.902));
            layer.add_rect(
                Rect::new(Mm(MARGIN), Mm(row_bottom), Mm(MARGIN + width), Mm(row_top))
                    .with_mode(PaintMode::Fill),
            );
        }

        let (font, color) = match line.style {
            RowStyle::Header => (bold, black()),
            RowStyle::Normal => (regular, black()),
            RowStyle::Loss => (regular, rgb(0.85, 0.0, 0.0)),
        };
        layer.set_fill_color(color);

        let baseline = row_bottom + (ROW_HEIGHT - TABLE_SIZE * PT_TO_MM) / 2.0 + 0.5;
        for (col, cell) in line.cells.iter().enumerate() {
            let center = MARGIN + column_width * (col as f32 + 0.5);
            let x = center - text_width(cell, TABLE_SIZE) / 2.0;
            layer.use_text(cell.as_str(), TABLE_SIZE, Mm(x), Mm(baseline), font);
        }
    }
    layer.set_fill_color(black());

    // grid
    layer.set_outline_color(rgb(0.5, 0.5, 0.5));
    layer.set_outline_thickness(0.5);
    for idx in 0..=lines.len() {
        let y = top - idx as f32 * ROW_HEIGHT;
        layer.add_line(segment((MARGIN, y), (MARGIN + width, y)));
    }
    for col in 0..=TABLE_HEADER.len() {
        let x = MARGIN + col as f32 * column_width;
        layer.add_line(segment((x, top), (x, bottom)));
    }
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}
