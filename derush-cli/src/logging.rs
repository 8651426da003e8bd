// ============================================================================
// derush-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization for the Derush CLI
//
// The application logs through the `log` facade everywhere; this module
// installs `env_logger` as the backend. RUST_LOG takes precedence over the
// `--verbose` flag:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug (or --verbose): ffprobe invocations and per-file values
// - RUST_LOG=trace: Very verbose debugging information

use crate::progress::SuspendingStderr;

use console::style;
use env_logger::{Env, Target};
use indicatif::MultiProgress;
use log::LevelFilter;
use std::io::Write;

/// Default filter for the given verbosity.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger. Call once, before any work starts.
///
/// Records are written to stderr with the bars of `progress` cleared.
pub fn init(verbose: bool, progress: &MultiProgress) {
    let level = default_level(verbose);
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .target(Target::Pipe(Box::new(SuspendingStderr::new(progress.clone()))))
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {} {}", buf.timestamp_seconds(), level, record.args())
        })
        .init();

    log::debug!("Logger initialized with default level: {level}");
}
