//! Implementation of the 'render' subcommand.

use crate::cli::RenderArgs;
use crate::error::CliResult;
use crate::terminal::{print_status, print_success};

use derush_core::config::RenderConfig;
use derush_core::{RenderSummary, render_sheet};

/// Creates the render configuration from CLI arguments.
pub fn create_render_config(args: &RenderArgs) -> CliResult<RenderConfig> {
    let config = RenderConfig {
        sheet_path: args.sheet_path.clone(),
        document_path: args.document_path.clone(),
        title: args.title.clone(),
        repeat_header: !args.no_repeat_header,
        ..RenderConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Renders the sheet and prints the resulting document path.
pub fn run_render(args: &RenderArgs) -> CliResult<RenderSummary> {
    let config = create_render_config(args)?;

    print_status("Sheet", &config.sheet_path.display().to_string());
    print_status("Document", &config.document_path.display().to_string());

    let summary = render_sheet(&config)?;

    print_success(&format!(
        "The PDF file was created successfully: {} ({} record(s), {} page(s))",
        summary.document_path.display(),
        summary.records,
        summary.pages
    ));
    Ok(summary)
}
