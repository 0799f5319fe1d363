use std::process::ExitCode;

use clap::Parser;
use mcp_nws::cli::Cli;
use mcp_nws::infra::{self, config::Config};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    let cli = Cli::parse();
    let cfg = Config::from_cli(&cli);

    match infra::boot::run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
