//! CLI entry point for null-model analysis.
//!
//! Parses arguments with clap, runs the command, renders its output to stdout,
//! and maps failures to a non-zero exit code. Logging is initialised first so
//! every later step can emit structured diagnostics on stderr.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use nullmodel_cli::{
    cli::{Cli, CliError, render_output, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse arguments, execute the command, render its output, and flush stdout.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let output = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_output(&output, format, &mut writer).context("failed to render output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => Some(core.code().as_str()),
            Some(CliError::DegreeSequence(source)) => Some(source.code().as_str()),
            Some(CliError::Graph(source)) => Some(source.code().as_str()),
            Some(CliError::NodeCountOverflow { .. }) | None => None,
        };

        error!(
            error = %format!("{err:#}"),
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
