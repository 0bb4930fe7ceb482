//! wiki-enrich - Wikipedia summary enrichment for table records
//!
//! Reads titles from a table, fetches their summaries and writes back extracts and images

#![allow(missing_docs)]

mod cli;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();

    match cli::execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
