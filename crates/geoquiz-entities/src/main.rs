//! geoquiz-entities binary
//!
//! Tags every dataset record as a country or territory, refreshes the
//! dataset metadata and rewrites the file. Takes no arguments; paths come
//! from `geoquiz.toml` and `GEOQUIZ_*` variables.

use std::process::ExitCode;

use geoquiz_entities::{run, ClassifierConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Setup logging; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = ClassifierConfig::load(&cwd).and_then(|config| run(&config));
    match result {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
