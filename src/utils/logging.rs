// file: src/utils/logging.rs
// description: Tracing subscriber initialization and coloured status lines for the CLI

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logs go to stderr so answers on stdout stay clean. `RUST_LOG` overrides the level.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Warning,
    Info,
}

pub fn format_status(status: Status, msg: &str) -> String {
    match status {
        Status::Success => format!("{} {}", "✓".green().bold(), msg.green()),
        Status::Failure => format!("{} {}", "✗".red().bold(), msg.red()),
        Status::Warning => format!("{} {}", "⚠".yellow().bold(), msg.yellow()),
        Status::Info => format!("{} {}", "ℹ".blue().bold(), msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines_keep_message() {
        colored::control::set_override(false);
        assert_eq!(format_status(Status::Success, "stored"), "✓ stored");
        assert_eq!(format_status(Status::Failure, "failed"), "✗ failed");
        assert_eq!(format_status(Status::Warning, "careful"), "⚠ careful");
        assert_eq!(format_status(Status::Info, "note"), "ℹ note");
    }
}
