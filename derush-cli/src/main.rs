// derush-cli/src/main.rs
//
// Entry point of the `derush` binary.
//
// Responsibilities include:
// - Parsing command-line arguments.
// - Setting up logging.
// - Dispatching to the `scan` or `render` command.
// - Reporting errors and managing the process exit code.

use clap::Parser;
use derush_cli::error::exit_code;
use derush_cli::progress::shared_progress;
use derush_cli::terminal::print_error;
use derush_cli::{Cli, Commands, logging, run_render, run_scan};
use std::process;

fn main() {
    let cli = Cli::parse();
    let progress = shared_progress();
    logging::init(cli.verbose, &progress);

    let result = match &cli.command {
        Commands::Scan(args) => run_scan(args, &progress).map(|_| ()),
        Commands::Render(args) => run_render(args).map(|_| ()),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        print_error(&e.to_string());
        process::exit(exit_code(&e));
    }
}
