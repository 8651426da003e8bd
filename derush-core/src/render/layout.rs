// ============================================================================
// derush-core/src/render/layout.rs
// ============================================================================
//
// TABLE LAYOUT: Text Measurement, Wrapping and Pagination
//
// Everything here is pure geometry in points, with the origin at the top-left
// corner of the page and y growing downwards. The PDF backend flips the axis
// when drawing.
//
// KEY COMPONENTS:
// - Glyph widths for the standard Helvetica faces
// - Greedy word wrap with character breaking for over-long words
// - Row heights and page breaking, title block on the first page

// ---- Internal crate imports ----
use crate::config::RenderConfig;
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::warn;
use unicode_width::UnicodeWidthChar;

use std::borrow::Cow;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Horizontal padding inside every cell.
pub const CELL_PADDING_X: f32 = 6.0;

/// Vertical padding inside every cell.
pub const CELL_PADDING_Y: f32 = 3.0;

/// Distance between two baselines inside a cell.
pub const CELL_LEADING: f32 = 12.0;

/// Space between the title and the table.
pub const TITLE_SPACE_AFTER: f32 = 30.0;

/// Leading as a multiple of the font size, for the title and large cell text.
const LEADING_FACTOR: f32 = 1.2;

/// Width used for glyphs missing from the tables, per unit of display width.
const FALLBACK_GLYPH_WIDTH: u16 = 556;

// Advance widths in 1/1000 em for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// ============================================================================
// TEXT MEASUREMENT
// ============================================================================

/// The two faces used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Whether the builtin fonts can show `c`.
///
/// Builtin fonts are single-byte encoded: printable ASCII and the Latin-1
/// supplement. Anything else is dropped when the text is written.
#[must_use]
pub fn is_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
}

fn glyph_width(face: Face, c: char) -> u16 {
    let table = match face {
        Face::Regular => &HELVETICA_WIDTHS,
        Face::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        _ if is_encodable(c) => FALLBACK_GLYPH_WIDTH * c.width().unwrap_or(0) as u16,
        _ => 0,
    }
}

/// Removes the characters the builtin fonts cannot show, keeping whitespace.
///
/// Returns the input unchanged when every character is drawable.
#[must_use]
pub fn drawable_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| is_encodable(c) || c.is_whitespace()) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .filter(|&c| is_encodable(c) || c.is_whitespace())
                .collect(),
        )
    }
}

/// Width of `text` in points when set in `face` at `font_size`.
#[must_use]
pub fn text_width(text: &str, face: Face, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(face, c))).sum();
    units as f32 * font_size / 1000.0
}

// ============================================================================
// WRAPPING
// ============================================================================

/// Breaks `text` into lines no wider than `max_width`.
///
/// Lines break between words; a word wider than a whole line is broken
/// between characters. Explicit newlines are kept. Always returns at least
/// one line.
#[must_use]
pub fn wrap_text(text: &str, max_width: f32, face: Face, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = text_width(" ", face, font_size);

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, face, font_size);

            if !current.is_empty() && current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            // Over-long word: fill lines character by character.
            current_width = 0.0;
            for c in word.chars() {
                let w = text_width(c.encode_utf8(&mut [0; 4]), face, font_size);
                if !current.is_empty() && current_width + w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ============================================================================
// LAYOUT TYPES
// ============================================================================

/// A sheet row with its cells wrapped and its height known.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// 1-based line number of the row in the sheet.
    pub line: usize,
    pub is_header: bool,
    /// Wrapped lines of every cell, in column order.
    pub cells: Vec<Vec<String>>,
    pub font_size: f32,
    pub height: f32,
}

/// A row placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    /// Distance from the top edge of the page to the top of the row.
    pub top: f32,
    pub row: RowLayout,
}

/// Title block of the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    pub text: String,
    pub font_size: f32,
    /// Left edge of the centred title.
    pub left: f32,
    /// Distance from the top edge of the page to the baseline.
    pub baseline: f32,
}

/// Content of one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub title: Option<TitleLayout>,
    pub rows: Vec<PlacedRow>,
}

/// The whole document, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Left edge of the table.
    pub table_left: f32,
    pub column_widths: Vec<f32>,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    #[must_use]
    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Checks that every row matches the column schema.
pub fn check_columns(rows: &[Vec<String>], column_count: usize) -> CoreResult<()> {
    match rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != column_count)
    {
        Some((index, row)) => Err(CoreError::ColumnMismatch {
            row: index + 1,
            expected: column_count,
            found: row.len(),
        }),
        None => Ok(()),
    }
}

fn layout_row(line: usize, cells: &[String], is_header: bool, config: &RenderConfig) -> RowLayout {
    let font_size = if is_header {
        config.font_sizes.header
    } else {
        config.font_sizes.body
    };
    let leading = row_leading(font_size);

    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(&config.column_widths)
        .enumerate()
        .map(|(column, (text, width))| {
            let text = drawable_text(text);
            if let Cow::Owned(_) = text {
                warn!(
                    "Row {line}, column {}: characters outside Latin-1 cannot be drawn and were left out",
                    column + 1
                );
            }
            let inner = (width - 2.0 * CELL_PADDING_X).max(font_size);
            wrap_text(&text, inner, Face::Regular, font_size)
        })
        .collect();

    let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
    RowLayout {
        line,
        is_header,
        cells: wrapped,
        font_size,
        height: line_count as f32 * leading + 2.0 * CELL_PADDING_Y,
    }
}

/// Baseline distance used for rows set at `font_size`.
#[must_use]
pub fn row_leading(font_size: f32) -> f32 {
    CELL_LEADING.max(font_size * LEADING_FACTOR)
}

/// Lays out the whole sheet; the first row is the header.
///
/// # Errors
///
/// * `CoreError::ColumnMismatch` - If a row does not have one cell per column
/// * `CoreError::RowTooTall` - If a row cannot fit on an empty page
pub fn layout_document(rows: &[Vec<String>], config: &RenderConfig) -> CoreResult<DocumentLayout> {
    check_columns(rows, config.column_widths.len())?;

    let (page_width, page_height) = config.page_dimensions();
    let margins = config.margins;
    let frame_top = margins.top;
    let frame_bottom = page_height - margins.bottom;
    let frame_width = page_width - margins.left - margins.right;

    let table_width: f32 = config.column_widths.iter().sum();
    let table_left = margins.left + (frame_width - table_width) / 2.0;

    let laid_out: Vec<RowLayout> = rows
        .iter()
        .enumerate()
        .map(|(index, cells)| layout_row(index + 1, cells, index == 0, config))
        .collect();

    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut cursor = frame_top;

    if !config.title.trim().is_empty() {
        let font_size = config.font_sizes.title;
        let title_width = text_width(&config.title, Face::Bold, font_size);
        let leading = font_size * LEADING_FACTOR;
        page.title = Some(TitleLayout {
            text: config.title.clone(),
            font_size,
            left: margins.left + (frame_width - title_width) / 2.0,
            baseline: frame_top + font_size,
        });
        cursor += leading + TITLE_SPACE_AFTER;
    }

    let repeated_header = laid_out
        .first()
        .filter(|_| config.repeat_header)
        .cloned();

    for row in laid_out {
        let page_has_content = !page.rows.is_empty() || page.title.is_some();
        if cursor + row.height > frame_bottom && page_has_content {
            pages.push(std::mem::take(&mut page));
            cursor = frame_top;
            if let Some(header) = repeated_header.as_ref().filter(|_| !row.is_header) {
                page.rows.push(PlacedRow {
                    top: cursor,
                    row: header.clone(),
                });
                cursor += header.height;
            }
        }

        if cursor + row.height > frame_bottom {
            return Err(CoreError::RowTooTall {
                row: row.line,
                height: row.height,
                available: frame_bottom - cursor,
            });
        }

        let height = row.height;
        page.rows.push(PlacedRow { top: cursor, row });
        cursor += height;
    }
    pages.push(page);

    Ok(DocumentLayout {
        page_width,
        page_height,
        table_left,
        column_widths: config.column_widths.clone(),
        pages,
    })
}
