//! Entry point for the storefront localization CLI.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use storefront_i18n::cli::{
    self,
    Cli,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Parses arguments, runs the command and maps failures to a non-zero exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref());

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    cli::execute(&cli, &mut stdout, &mut stderr)
}

/// Logs go to stderr, or to `log_file` when given. Filtering follows
/// `RUST_LOG` and defaults to `warn`.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = log_file.and_then(|path| {
        let file_name = path.file_name()?;
        let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
        Some(tracing_appender::rolling::never(dir, file_name))
    });

    match file {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}
