mod cli;
mod error;
mod logging;

use clap::Parser;
use cli::Cli;
use dssp_core::engine::DsspConfig;
use dssp_core::workflows::{annotate_file, AnnotateOptions, OutputFormat};
use error::{print_error_chain, CliError, Result};
use std::process::ExitCode;
use tracing::warn;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error_chain(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let Some(xyzin) = cli.xyzin.as_deref() else {
        return Err(CliError::Argument("Input file not specified".to_string()));
    };

    let format = match (&cli.output_format, &cli.output) {
        (Some(requested), _) => requested
            .parse::<OutputFormat>()
            .map_err(|e| CliError::Argument(e.to_string()))?,
        (None, Some(path)) => OutputFormat::from_path(path),
        (None, None) => OutputFormat::MmCif,
    };

    for dict in &cli.dict {
        if !dict.is_file() {
            return Err(CliError::Other(anyhow::anyhow!(
                "Dictionary file '{}' does not exist",
                dict.display()
            )));
        }
        warn!(path = %dict.display(), "restraint dictionaries are not consulted yet");
    }

    let options = AnnotateOptions {
        format,
        create_missing: cli.create_missing,
        config: DsspConfig {
            min_pp_stretch: cli.min_pp_stretch,
        },
    };
    annotate_file(xyzin, cli.output.as_deref(), &options)?;
    Ok(())
}
