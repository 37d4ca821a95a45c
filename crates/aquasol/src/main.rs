use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aquasol_core::{pipeline, ErrorEnvelope, PipelineError, TracingSink};

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch aqueous solubility prediction from SMILES", long_about = None)]
struct Cli {
    /// Path to the input CSV file; must contain a SMILES column
    input: PathBuf,

    /// Directory holding random_forest_model.json and scaler.json
    #[arg(long, default_value = ".")]
    model_dir: PathBuf,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries exactly one JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            let usage =
                PipelineError::Usage("usage: aquasol <input_csv> [--model-dir <dir>]".to_string());
            return fail(&usage);
        }
    };

    match pipeline::run(&cli.input, &cli.model_dir, &TracingSink) {
        Ok(results) => {
            println!("{}", serde_json::Value::Array(results));
            info!("prediction batch completed");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

/// Emits the error envelope as the sole stdout document and signals failure.
fn fail(err: &PipelineError) -> ExitCode {
    error!(kind = err.kind(), "prediction failed: {err}");
    let envelope = ErrorEnvelope::from_error(err);
    let body = serde_json::to_string(&envelope).unwrap_or_else(|_| {
        r#"{"error":"failed to serialize error envelope","type":"InternalError"}"#.to_string()
    });
    println!("{body}");
    ExitCode::from(1)
}
