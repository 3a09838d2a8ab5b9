use std::process::ExitCode;

use clap::Parser;
use httptester::{
    cli::{self, Cli},
    error::ConfigError,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = cli::exit_code(&e);
            if code == ConfigError::EXIT_CODE {
                println!("{e}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(code)
        }
    }
}
