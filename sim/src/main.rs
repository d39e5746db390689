use clap::Parser;
use gemelos_sim::{Cli, OutputFormat};
use gemelos_types::GemelosError;
use gemelos_utils::init_tracing;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.common.log_level);

    match gemelos_sim::run(&cli) {
        Ok(report) => {
            match cli.format {
                OutputFormat::Text => print!("{report}"),
                OutputFormat::Json => match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        tracing::error!("failed to serialize report: {e}");
                        return ExitCode::from(2);
                    }
                },
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            match e {
                GemelosError::HashLengthMismatch { .. }
                | GemelosError::InvalidParameters(_)
                | GemelosError::PopulationExhausted { .. } => ExitCode::from(2),
            }
        }
    }
}
