// ============================================================================
// derush-core/src/render/mod.rs
// ============================================================================
//
// SHEET RENDERING: Rushes Sheet to Paginated PDF
//
// WORKFLOW:
// 1. Validate the configuration
// 2. Read the sheet (fatal if missing)
// 3. Lay the rows out against the column width schema
// 4. Draw the pages in memory
// 5. Write the document beside its destination and move it into place
//
// A failure at any step leaves no document behind.

// ---- Internal crate imports ----
use crate::config::RenderConfig;
use crate::error::{CoreError, CoreResult};
use crate::sheet::read_sheet;

// ---- External crate imports ----
use log::{debug, info};
use tempfile::NamedTempFile;

// ---- Standard library imports ----
use std::io::Write;
use std::path::{Path, PathBuf};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Text measurement, wrapping and pagination
pub mod layout;

/// printpdf drawing backend
pub mod pdf;

pub use layout::{DocumentLayout, layout_document};

// ============================================================================
// RENDERING
// ============================================================================

/// Summary of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub document_path: PathBuf,
    /// Number of records rendered, header excluded.
    pub records: usize,
    pub pages: usize,
}

/// Renders the sheet at `config.sheet_path` to `config.document_path`.
///
/// # Errors
///
/// * `CoreError::SheetNotFound` - If the sheet does not exist
/// * `CoreError::ColumnMismatch` - If a row does not match the column schema
/// * `CoreError::RowTooTall` - If a row cannot fit on a page
/// * `CoreError::Pdf` / `CoreError::Io` - If the document cannot be produced
pub fn render_sheet(config: &RenderConfig) -> CoreResult<RenderSummary> {
    config.validate()?;

    let rows = read_sheet(&config.sheet_path)?;
    debug!("Read {} row(s) from {}", rows.len(), config.sheet_path.display());

    let layout = layout_document(&rows, config)?;
    let bytes = pdf::draw_document(&layout, config)?;
    write_atomically(&config.document_path, &bytes)?;

    info!(
        "Rendered {} page(s) to {}",
        layout.pages.len(),
        config.document_path.display()
    );

    Ok(RenderSummary {
        document_path: config.document_path.clone(),
        records: rows.len().saturating_sub(1),
        pages: layout.pages.len(),
    })
}

/// Writes `bytes` to a temporary file in the destination directory, then
/// renames it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| CoreError::Io(e.error))?;
    Ok(())
}
