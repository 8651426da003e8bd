//! PDF backend for the table layout.
//!
//! Draws a [`DocumentLayout`] with `printpdf` using the standard Helvetica
//! faces. Layout coordinates are top-down points; PDF coordinates are
//! bottom-up, so every y is flipped against the page height here.

use crate::config::{AccentColor, RenderConfig};
use crate::error::{CoreError, CoreResult};
use crate::render::layout::{
    CELL_PADDING_Y, DocumentLayout, Face, PageLayout, PlacedRow, row_leading, text_width,
};

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt,
    Rect, Rgb,
};

/// Grid stroke width in points.
const GRID_THICKNESS: f32 = 1.0;

/// Name given to the single layer of every page.
const LAYER_NAME: &str = "Table";

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn color(c: AccentColor) -> Color {
    let (r, g, b) = c.to_unit_rgb();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(err: impl std::fmt::Debug) -> CoreError {
    CoreError::Pdf(format!("{err:?}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Draws `layout` and returns the encoded PDF file.
pub fn draw_document(layout: &DocumentLayout, config: &RenderConfig) -> CoreResult<Vec<u8>> {
    let accent = config.accent()?;
    let (width, height) = (mm(layout.page_width), mm(layout.page_height));

    let (doc, first_page, first_layer) = PdfDocument::new(&config.title, width, height, LAYER_NAME);
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    let page_count = layout.pages.len();
    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page_ref).get_layer(layer_ref)
        };
        draw_page(&layer, layout, page, &fonts, accent, config);
        draw_footer(&layer, layout, index + 1, page_count, &fonts, config);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_page(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    page: &PageLayout,
    fonts: &Fonts,
    accent: AccentColor,
    config: &RenderConfig,
) {
    if let Some(title) = &page.title {
        layer.set_fill_color(color(accent));
        layer.use_text(
            title.text.clone(),
            title.font_size,
            mm(title.left),
            mm(layout.page_height - title.baseline),
            &fonts.bold,
        );
    }

    for placed in &page.rows {
        draw_row(layer, layout, placed, fonts, accent, config);
    }
}

fn draw_row(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    placed: &PlacedRow,
    fonts: &Fonts,
    accent: AccentColor,
    config: &RenderConfig,
) {
    let row = &placed.row;
    let page_h = layout.page_height;
    let top = page_h - placed.top;
    let bottom = top - row.height;
    let left = layout.table_left;
    let right = left + layout.table_width();

    if row.is_header {
        layer.set_fill_color(color(accent));
        layer.add_rect(Rect::new(mm(left), mm(bottom), mm(right), mm(top)).with_mode(PaintMode::Fill));
    }

    // Cell text, centred both ways.
    let text_color = if row.is_header {
        AccentColor::WHITE
    } else {
        AccentColor::BLACK
    };
    layer.set_fill_color(color(text_color));

    let leading = row_leading(row.font_size);
    let inner_height = row.height - 2.0 * CELL_PADDING_Y;
    let mut cell_left = left;
    for (lines, col_width) in row.cells.iter().zip(&config.column_widths) {
        let block_height = lines.len() as f32 * leading;
        let block_top = placed.top + CELL_PADDING_Y + (inner_height - block_height) / 2.0;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_width = text_width(line, Face::Regular, row.font_size);
            let x = cell_left + (col_width - line_width) / 2.0;
            let baseline = block_top + i as f32 * leading + (leading + row.font_size) / 2.0 - row.font_size * 0.2;
            layer.use_text(line.clone(), row.font_size, mm(x), mm(page_h - baseline), &fonts.regular);
        }
        cell_left += col_width;
    }

    // Grid: outline of the row plus the column separators.
    layer.set_outline_color(color(AccentColor::BLACK));
    layer.set_outline_thickness(GRID_THICKNESS);
    layer.add_rect(Rect::new(mm(left), mm(bottom), mm(right), mm(top)).with_mode(PaintMode::Stroke));

    let mut x = left;
    for col_width in &config.column_widths[..config.column_widths.len().saturating_sub(1)] {
        x += col_width;
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(x), mm(bottom)), false),
                (Point::new(mm(x), mm(top)), false),
            ],
            is_closed: false,
        });
    }
}

fn draw_footer(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    number: usize,
    count: usize,
    fonts: &Fonts,
    config: &RenderConfig,
) {
    let text = format!("{number} / {count}");
    let size = config.font_sizes.body;
    let x = (layout.page_width - text_width(&text, Face::Regular, size)) / 2.0;
    let y = config.margins.bottom / 2.0;
    layer.set_fill_color(color(AccentColor::BLACK));
    layer.use_text(text, size, mm(x), mm(y), &fonts.regular);
}
