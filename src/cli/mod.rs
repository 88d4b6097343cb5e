use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use kitline::{
    export::ExportFile,
    fixtures::{Fixture, parse_currency},
};
use tracing::info;

use crate::cli::config::AppConfig;

mod breakdown;
pub(crate) mod config;
mod designs;
pub(crate) mod logging;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "kitline", about = "Team apparel pricing and size breakdowns", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a product at a quantity, fabric and bundle
    Quote(quote::QuoteArgs),

    /// Show or export the size breakdown of an order or design request
    Breakdown(breakdown::BreakdownArgs),

    /// Export the design catalogue as CSV
    ExportDesigns(designs::ExportDesignsArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        let fixture = Arc::new(load_fixture(&self.config)?);

        match self.command {
            Commands::Quote(args) => quote::run(fixture, args).await,
            Commands::Breakdown(args) => breakdown::run(fixture, &self.config, args).await,
            Commands::ExportDesigns(args) => designs::run(fixture, args).await,
        }
    }
}

fn load_fixture(config: &AppConfig) -> anyhow::Result<Fixture> {
    let fixture = Fixture::with_base_path(&config.fixtures)
        .load_set(&config.fixture_set)
        .with_context(|| format!("failed to load fixture set {}", config.fixture_set))?;

    let expected = parse_currency(&config.currency)?;
    let actual = fixture.catalog()?.currency();

    if expected != actual {
        bail!(
            "fixture set {} is priced in {}, expected {}",
            config.fixture_set,
            actual.iso_alpha_code,
            expected.iso_alpha_code
        );
    }

    Ok(fixture)
}

fn write_export(dir: &Path, file: &ExportFile) -> anyhow::Result<()> {
    let path = dir.join(&file.filename);

    fs::write(&path, &file.contents)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), mime_type = file.mime_type, "wrote export");

    Ok(())
}
