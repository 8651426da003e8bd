// ============================================================================
// derush-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Pipeline Configuration Structures and Constants
//
// This module defines the immutable configuration values handed to the two
// pipeline entry points: `ExtractConfig` for the directory scan and
// `RenderConfig` for the PDF rendering of the resulting sheet.
//
// USAGE:
// Consumers (like derush-cli) start from `Default`, override what the user
// asked for, call `validate()` and pass the value by reference.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::timecode::FrameRate;

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default directory holding the camera clips.
pub const DEFAULT_VIDEO_DIR: &str = "VIDEO";

/// Default path of the rushes sheet, written by `scan` and read by `render`.
pub const DEFAULT_SHEET_PATH: &str = "derush_sheet.csv";

/// Default path of the rendered document.
pub const DEFAULT_DOCUMENT_PATH: &str = "derush_sheet.pdf";

/// Default project frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 25;

/// Default container extension, matched case-sensitively.
pub const DEFAULT_EXTENSION: &str = "MXF";

/// Default probe executable, looked up on PATH.
pub const DEFAULT_PROBE_PROGRAM: &str = "ffprobe";

/// Default document title.
pub const DEFAULT_TITLE: &str = "Feuille de dérushage";

/// Default accent colour used for the title and the header row.
pub const DEFAULT_ACCENT_COLOR: &str = "#B45F06";

/// Default column widths in points, one per sheet column.
pub const DEFAULT_COLUMN_WIDTHS: [f32; 8] = [65.0, 59.0, 59.0, 50.0, 150.0, 150.0, 150.0, 45.0];

// ============================================================================
// EXTRACTION
// ============================================================================

/// Configuration for the metadata extraction pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Directory scanned (non-recursively) for clips.
    pub video_dir: PathBuf,
    /// Sheet file to create.
    pub sheet_path: PathBuf,
    /// Frame rate used for every timecode computation of the run.
    pub frame_rate: FrameRate,
    /// Container extension without the leading dot.
    pub extension: String,
    /// Name or path of the ffprobe executable.
    pub probe_program: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            video_dir: PathBuf::from(DEFAULT_VIDEO_DIR),
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            frame_rate: FrameRate::PAL,
            extension: DEFAULT_EXTENSION.to_string(),
            probe_program: DEFAULT_PROBE_PROGRAM.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Checks the values that cannot be enforced by the types alone.
    pub fn validate(&self) -> CoreResult<()> {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(CoreError::Config(
                "container extension must not be empty".to_string(),
            ));
        }
        if self.probe_program.trim().is_empty() {
            return Err(CoreError::Config(
                "probe program must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl PageSize {
    /// Portrait (width, height) in points.
    #[must_use]
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 100.0,
            right: 100.0,
            top: 50.0,
            bottom: 50.0,
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub header: f32,
    pub body: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 24.0,
            header: 10.0,
            body: 8.0,
        }
    }
}

/// An opaque RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AccentColor {
    pub const BLACK: AccentColor = AccentColor { r: 0, g: 0, b: 0 };
    pub const WHITE: AccentColor = AccentColor {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> CoreResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::Config(format!(
                "invalid colour '{hex}', expected #RRGGBB"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| CoreError::Config(format!("invalid colour '{hex}': {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Channels scaled to `0.0..=1.0`.
    #[must_use]
    pub fn to_unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Configuration for the sheet rendering pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Sheet file to read.
    pub sheet_path: PathBuf,
    /// Document file to produce.
    pub document_path: PathBuf,
    /// Title printed at the top of the first page.
    pub title: String,
    /// Accent colour as `#RRGGBB`.
    pub accent_color: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub font_sizes: FontSizes,
    /// Column widths in points; every sheet row must have exactly this many cells.
    pub column_widths: Vec<f32>,
    /// Repeat the header row at the top of every continuation page.
    pub repeat_header: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            title: DEFAULT_TITLE.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            page_size: PageSize::A4,
            orientation: Orientation::Landscape,
            margins: Margins::default(),
            font_sizes: FontSizes::default(),
            column_widths: DEFAULT_COLUMN_WIDTHS.to_vec(),
            repeat_header: true,
        }
    }
}

impl RenderConfig {
    /// Page (width, height) in points after applying the orientation.
    #[must_use]
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Parsed accent colour.
    pub fn accent(&self) -> CoreResult<AccentColor> {
        AccentColor::from_hex(&self.accent_color)
    }

    /// Checks the values that cannot be enforced by the types alone.
    pub fn validate(&self) -> CoreResult<()> {
        if self.column_widths.is_empty() {
            return Err(CoreError::Config(
                "column width schema must not be empty".to_string(),
            ));
        }
        if let Some(width) = self.column_widths.iter().find(|w| !(**w > 0.0)) {
            return Err(CoreError::Config(format!(
                "column widths must be positive, got {width}"
            )));
        }
        let fonts = self.font_sizes;
        if [fonts.title, fonts.header, fonts.body]
            .iter()
            .any(|size| !(*size > 0.0))
        {
            return Err(CoreError::Config("font sizes must be positive".to_string()));
        }
        let (page_w, page_h) = self.page_dimensions();
        let m = self.margins;
        if m.left + m.right >= page_w || m.top + m.bottom >= page_h {
            return Err(CoreError::Config(
                "margins leave no room on the page".to_string(),
            ));
        }
        self.accent()?;
        Ok(())
    }
}
