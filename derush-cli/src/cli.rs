// derush-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use derush_core::config::{
    DEFAULT_DOCUMENT_PATH, DEFAULT_EXTENSION, DEFAULT_FRAME_RATE, DEFAULT_PROBE_PROGRAM,
    DEFAULT_SHEET_PATH, DEFAULT_TITLE, DEFAULT_VIDEO_DIR,
};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Derush: rushes logging sheets",
    long_about = "Builds a rushes sheet (CSV) from the timecode and duration of camera clips, \
                  then renders it as a paginated PDF for logging on paper."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans a directory of clips and writes the rushes sheet
    Scan(ScanArgs),
    /// Renders a rushes sheet as a PDF document
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory containing the clips (not searched recursively)
    #[arg(short = 'i', long = "input", value_name = "VIDEO_DIR", default_value = DEFAULT_VIDEO_DIR)]
    pub video_dir: PathBuf,

    /// Rushes sheet to create
    #[arg(short = 'o', long = "output", value_name = "SHEET", default_value = DEFAULT_SHEET_PATH)]
    pub sheet_path: PathBuf,

    /// Project frame rate used for timecode arithmetic
    #[arg(long, value_name = "FPS", default_value_t = DEFAULT_FRAME_RATE,
          value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Container extension to look for (case-sensitive)
    #[arg(short, long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// ffprobe executable to use
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROBE_PROGRAM)]
    pub ffprobe: String,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Rushes sheet to read
    #[arg(short = 'i', long = "input", value_name = "SHEET", default_value = DEFAULT_SHEET_PATH)]
    pub sheet_path: PathBuf,

    /// PDF document to create
    #[arg(short = 'o', long = "output", value_name = "PDF", default_value = DEFAULT_DOCUMENT_PATH)]
    pub document_path: PathBuf,

    /// Title printed at the top of the first page
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Do not repeat the header row on continuation pages
    #[arg(long, default_value_t = false)]
    pub no_repeat_header: bool,
}
