//! Kitline CLI

use clap::Parser;

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    cli::logging::init(&cli.config.logging)?;

    cli.run().await
}
