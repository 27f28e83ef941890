//! Tabular PDF reports.
//!
//! A4 portrait, Helvetica. Every page repeats the title line, the generation
//! timestamp and the bold column header row.

use async_trait::async_trait;
use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use std::path::PathBuf;

use super::format::slug;
use crate::error::{ProdutoError, ProdutoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    /// One per column; missing entries are left-aligned
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

/// Writes a report to disk and returns where it went.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportBuilder: Send + Sync {
    async fn build(&self, id_usuario: i32, table: ReportTable) -> ProdutoResult<PathBuf>;
}

/// printpdf-backed builder writing `{dir}/{slug}-{idUsuario}-{epochMillis}.pdf`.
#[derive(Debug, Clone)]
pub struct PdfReportBuilder {
    output_dir: PathBuf,
}

impl PdfReportBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn file_name(title: &str, id_usuario: i32, epoch_millis: i64) -> String {
        format!("{}-{}-{}.pdf", slug(title), id_usuario, epoch_millis)
    }
}

#[async_trait]
impl ReportBuilder for PdfReportBuilder {
    async fn build(&self, id_usuario: i32, table: ReportTable) -> ProdutoResult<PathBuf> {
        let now = Local::now();
        let generated_at = now.format("%d/%m/%Y %H:%M:%S").to_string();
        let path = self.output_dir.join(Self::file_name(
            &table.title,
            id_usuario,
            now.timestamp_millis(),
        ));

        let rows = table.rows.len();
        let bytes = tokio::task::spawn_blocking(move || {
            render(&table, &generated_at).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ProdutoError::ExportFailed(format!("report task failed: {}", e)))?
        .map_err(|e| ProdutoError::ExportFailed(format!("pdf rendering failed: {}", e)))?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                ProdutoError::ExportFailed(format!("{}: {}", self.output_dir.display(), e))
            })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ProdutoError::ExportFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), rows, "Report written");
        Ok(path)
    }
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 195.0;
const MARGIN_BOTTOM: f32 = 15.0;
const TITLE_TOP: f32 = 10.0;
const TABLE_TOP: f32 = 25.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const TABLE_FONT_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 6.0;
const CELL_PADDING: f32 = 1.0;
const LAYER_NAME: &str = "Camada 1";

const PT_TO_MM: f32 = 0.352_778;
// Average Helvetica glyph width, in ems
const AVG_GLYPH_EM: f32 = 0.5;

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_EM * PT_TO_MM
}

/// Text origin for `text` inside a cell starting at `left` with `width`.
fn aligned_x(alignment: Alignment, left: f32, width: f32, text: &str, font_size: f32) -> f32 {
    let text_width = text_width(text, font_size);
    match alignment {
        Alignment::Left => left + CELL_PADDING,
        Alignment::Center => left + (width - text_width) / 2.0,
        Alignment::Right => left + width - CELL_PADDING - text_width,
    }
}

/// Cuts `text` so it fits in `width`.
fn fit(text: &str, width: f32, font_size: f32) -> String {
    let glyph = font_size * AVG_GLYPH_EM * PT_TO_MM;
    let max_chars = ((width - 2.0 * CELL_PADDING) / glyph).floor().max(1.0) as usize;
    text.chars().take(max_chars).collect()
}

/// Column widths proportional to the longest text of each column.
fn column_widths(table: &ReportTable) -> Vec<f32> {
    let weights: Vec<f32> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let longest = table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(header))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(1);
            longest.clamp(4, 40) as f32
        })
        .collect();

    let total: f32 = weights.iter().sum();
    let available = MARGIN_RIGHT - MARGIN_LEFT;
    weights.iter().map(|w| w / total * available).collect()
}

fn from_top(distance: f32) -> Mm {
    Mm(PAGE_HEIGHT - distance)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_row(
    layer: &PdfLayerReference,
    cells: &[String],
    table: &ReportTable,
    widths: &[f32],
    top: f32,
    font: &IndirectFontRef,
) {
    let mut left = MARGIN_LEFT;
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let text = fit(cell, *width, TABLE_FONT_SIZE);
        let alignment = table.alignments.get(i).copied().unwrap_or_default();
        let x = aligned_x(alignment, left, *width, &text, TABLE_FONT_SIZE);
        layer.use_text(text, TABLE_FONT_SIZE, Mm(x), from_top(top), font);
        left += width;
    }
}

/// Title line, timestamp and column header; returns where the first body row goes.
fn draw_page_header(
    layer: &PdfLayerReference,
    table: &ReportTable,
    generated_at: &str,
    widths: &[f32],
    fonts: &Fonts,
) -> f32 {
    layer.use_text(
        table.title.as_str(),
        HEADER_FONT_SIZE,
        Mm(MARGIN_LEFT),
        from_top(TITLE_TOP),
        &fonts.regular,
    );

    let stamp = format!("Data/Hora: {}", generated_at);
    let stamp_x = MARGIN_RIGHT - text_width(&stamp, HEADER_FONT_SIZE);
    layer.use_text(
        stamp,
        HEADER_FONT_SIZE,
        Mm(stamp_x),
        from_top(TITLE_TOP),
        &fonts.regular,
    );

    draw_row(layer, &table.headers, table, widths, TABLE_TOP, &fonts.bold);

    let rule_y = from_top(TABLE_TOP + 2.0);
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), rule_y), false),
            (Point::new(Mm(MARGIN_RIGHT), rule_y), false),
        ],
        is_closed: false,
    });

    TABLE_TOP + ROW_HEIGHT + 1.0
}

fn render(table: &ReportTable, generated_at: &str) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page, layer) = PdfDocument::new(
        table.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };
    let widths = column_widths(table);

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut top = draw_page_header(&layer, table, generated_at, &widths, &fonts);

    for row in &table.rows {
        if PAGE_HEIGHT - top < MARGIN_BOTTOM {
            let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            layer = doc.get_page(page).get_layer(layer_index);
            top = draw_page_header(&layer, table, generated_at, &widths, &fonts);
        }
        draw_row(&layer, row, table, &widths, top, &fonts.regular);
        top += ROW_HEIGHT;
    }

    doc.save_to_bytes()
}
