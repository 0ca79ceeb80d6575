//! Declarative report renderer - typed report data straight to PDF.
//!
//! The browserless export path. Output is a simplified, non-pixel-identical
//! document built with a fixed style sheet (Helvetica family, the HTML
//! theme's colors, fixed spacing): title block, overall score, dimension
//! table with benchmark/geonorm columns and improvement markers, rater
//! breakdown, and stripped free-text feedback.

use async_trait::async_trait;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::domain::scoring::ReportData;
use crate::ports::{ExportError, ReportRenderer};

// A4 in millimetres.
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;

/// Characters per line for 10pt Helvetica inside the text column.
const WRAP_WIDTH: usize = 95;

// Theme colors mirroring the HTML report.
fn ink() -> Color {
    Color::Rgb(Rgb::new(0.13, 0.15, 0.19, None))
}

fn muted() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.48, 0.53, None))
}

fn accent() -> Color {
    Color::Rgb(Rgb::new(0.23, 0.38, 0.85, None))
}

fn warn_color() -> Color {
    Color::Rgb(Rgb::new(0.80, 0.25, 0.20, None))
}

/// Declarative implementation of the ReportRenderer port.
pub struct PrintpdfReportRenderer;

impl PrintpdfReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PrintpdfReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRenderer for PrintpdfReportRenderer {
    async fn render_pdf(&self, report: &ReportData) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("Talent Assessment Report - {}", report.target_name),
            Mm(PAGE_WIDTH as f32),
            Mm(PAGE_HEIGHT as f32),
            "Layer 1",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Rendering(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Rendering(e.to_string()))?;

        let mut cursor = Cursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
            regular,
            bold,
        };

        render_header(&mut cursor, report);
        render_dimension_table(&mut cursor, report);
        render_rater_breakdown(&mut cursor, report);
        render_feedback(&mut cursor, report);

        doc.save_to_bytes()
            .map_err(|e| ExportError::Rendering(e.to_string()))
    }
}

/// Walks down the page, adding pages as sections run out of room.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Cursor<'_> {
    /// Starts a fresh page when fewer than `needed` millimetres remain.
    fn ensure_space(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&mut self, text: &str, size: f64, bold: bool, color: Color, advance: f64) {
        self.ensure_space(advance);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        self.layer
            .use_text(text, size as f32, Mm(MARGIN as f32), Mm(self.y as f32), font);
        self.y -= advance;
    }

    fn text_at(&mut self, text: &str, size: f64, bold: bool, color: Color, x: f64) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        self.layer.use_text(text, size as f32, Mm(x as f32), Mm(self.y as f32), font);
    }

    fn advance(&mut self, by: f64) {
        self.y -= by;
    }

    fn rule(&mut self) {
        self.ensure_space(4.0);
        self.layer.set_outline_color(muted());
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN as f32), Mm(self.y as f32)), false),
                (Point::new(Mm((PAGE_WIDTH - MARGIN) as f32), Mm(self.y as f32)), false),
            ],
            is_closed: false,
        });
        self.y -= 4.0;
    }
}

fn render_header(cursor: &mut Cursor<'_>, report: &ReportData) {
    cursor.text("Talent Assessment Report", 18.0, true, ink(), 9.0);
    cursor.text(&report.target_name, 14.0, false, ink(), 7.0);
    cursor.text(
        &format!(
            "Industry: {}   Generated: {}",
            report.industry,
            report.generated_at.as_date_string()
        ),
        9.0,
        false,
        muted(),
        7.0,
    );
    match report.overall_score {
        Some(score) => {
            cursor.text(&format!("Overall score: {:.2} / 5", score), 13.0, true, accent(), 8.0)
        }
        None => cursor.text("Overall score: no responses yet", 13.0, true, muted(), 8.0),
    }
    cursor.rule();
}

fn render_dimension_table(cursor: &mut Cursor<'_>, report: &ReportData) {
    cursor.text("Dimensions", 12.0, true, ink(), 7.0);

    if report.dimensions.is_empty() {
        cursor.text("No scored dimensions.", 10.0, false, muted(), 6.0);
        return;
    }

    // Column header row.
    cursor.ensure_space(6.0);
    cursor.text_at("Dimension", 9.0, true, muted(), MARGIN);
    cursor.text_at("Score", 9.0, true, muted(), 95.0);
    cursor.text_at("Benchmark", 9.0, true, muted(), 115.0);
    cursor.text_at("Group norm", 9.0, true, muted(), 140.0);
    cursor.advance(6.0);

    for dimension in &report.dimensions {
        cursor.ensure_space(6.0);
        let color = if dimension.needs_improvement {
            warn_color()
        } else {
            ink()
        };
        cursor.text_at(&dimension.dimension_name, 10.0, false, color.clone(), MARGIN);
        cursor.text_at(&format!("{:.2}", dimension.score), 10.0, false, color.clone(), 95.0);
        cursor.text_at(&format_reference(dimension.benchmark), 10.0, false, muted(), 115.0);
        cursor.text_at(&format_reference(dimension.geonorm), 10.0, false, muted(), 140.0);
        if dimension.needs_improvement {
            cursor.text_at("needs improvement", 8.0, true, color, 165.0);
        }
        cursor.advance(6.0);
    }
    cursor.rule();
}

fn render_rater_breakdown(cursor: &mut Cursor<'_>, report: &ReportData) {
    if report.raters.is_empty() {
        return;
    }
    cursor.text("Rater breakdown", 12.0, true, ink(), 7.0);
    for rater in &report.raters {
        cursor.text(
            &format!(
                "{}: {:.2} across {} response(s)",
                rater.relation.label(),
                rater.mean,
                rater.responses
            ),
            10.0,
            false,
            ink(),
            6.0,
        );
    }
    cursor.rule();
}

fn render_feedback(cursor: &mut Cursor<'_>, report: &ReportData) {
    if report.feedback.is_empty() {
        return;
    }
    cursor.text("Feedback", 12.0, true, ink(), 7.0);
    for entry in &report.feedback {
        for line in wrap_text(entry, WRAP_WIDTH) {
            cursor.text(&line, 10.0, false, ink(), 5.0);
        }
        cursor.advance(2.0);
    }
}

fn format_reference(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Greedy word wrap; words longer than the width get their own line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
