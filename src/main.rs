//! os-install CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use os_install::cli::{Cli, CommandDispatcher};
use os_install::ui::{create_ui, is_interactive_session};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("os_install=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("os_install=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("os-install starting with args: {:?}", cli);

    let mut ui = create_ui(is_interactive_session());
    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
