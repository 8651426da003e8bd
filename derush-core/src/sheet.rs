// ============================================================================
// derush-core/src/sheet.rs
// ============================================================================
//
// RUSHES SHEET: The CSV Table Shared by Both Pipelines
//
// The extractor writes the sheet, the renderer reads it back. The file is
// plain comma-separated UTF-8 text whose first line is the fixed eight-column
// header. Rows are flushed one by one so an interrupted scan still leaves a
// valid, truncated sheet behind.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::processing::extraction::ClipTiming;

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::fs::File;
use std::io::Write;
use std::path::Path;

// ============================================================================
// SCHEMA
// ============================================================================

/// Column titles of the sheet, in file order.
pub const SHEET_HEADER: [&str; 8] = [
    "FICHIER",
    "TC IN",
    "TC OUT",
    "DURÉE",
    "CONTENU IMAGE",
    "CONTENU SON",
    "OBSERVATIONS",
    "CHOIX",
];

/// One row of the sheet.
///
/// The four note fields are left empty by the extractor; they are filled in
/// by hand during logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub filename: String,
    pub timecode_in: String,
    pub timecode_out: String,
    pub duration: String,
    pub image_notes: String,
    pub sound_notes: String,
    pub observations: String,
    pub selection: String,
}

impl MediaRecord {
    /// A fresh record with empty notes.
    pub fn new(filename: impl Into<String>, timing: ClipTiming) -> Self {
        Self {
            filename: filename.into(),
            timecode_in: timing.timecode_in,
            timecode_out: timing.timecode_out,
            duration: timing.duration,
            image_notes: String::new(),
            sound_notes: String::new(),
            observations: String::new(),
            selection: String::new(),
        }
    }
}

// ============================================================================
// WRITING
// ============================================================================

/// Appends records to a sheet, flushing after every row.
pub struct SheetWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl SheetWriter<File> {
    /// Creates (or truncates) the sheet at `path` and writes the header.
    pub fn create(path: &Path) -> CoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> SheetWriter<W> {
    /// Wraps any writer and writes the header immediately.
    pub fn from_writer(inner: W) -> CoreResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(SHEET_HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Appends one record and flushes it to the underlying storage.
    pub fn append(&mut self, record: &MediaRecord) -> CoreResult<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of records appended so far, header excluded.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> CoreResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| CoreError::Io(e.into_error()))
    }
}

// ============================================================================
// READING
// ============================================================================

/// Reads every row of the sheet at `path`, header included.
///
/// Rows may have differing lengths; checking them against a column schema is
/// the caller's job.
pub fn read_sheet(path: &Path) -> CoreResult<Vec<Vec<String>>> {
    if !path.is_file() {
        return Err(CoreError::SheetNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    read_rows(file)
}

fn read_rows<R: std::io::Read>(inner: R) -> CoreResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(inner);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
