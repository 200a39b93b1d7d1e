use anyhow::Context;
use clap::Parser;
use tradefill::adapter::inbound::cli::{command::Cli, output, runner};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let result = runner::execute(cli).await.context("tradefill failed");

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
