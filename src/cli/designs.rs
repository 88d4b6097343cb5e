use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::Args;
use jiff::{Zoned, civil::Date};
use kitline::{
    designs::{DesignFilter, DesignRecord},
    export::{DESIGN_HEADERS, ExportFile, design_rows, to_csv},
    fixtures::Fixture,
    store::DesignStore,
};
use tracing::info;

use crate::cli::write_export;

#[derive(Debug, Args)]
pub(crate) struct ExportDesignsArgs {
    /// Only designs whose name or slug contains this text
    #[arg(long)]
    search: Option<String>,

    /// Only designs for this sport
    #[arg(long)]
    sport: Option<String>,

    /// Only active designs
    #[arg(long)]
    active_only: bool,

    /// Only featured designs
    #[arg(long)]
    featured_only: bool,

    /// Write the export into this directory instead of stdout
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Export date used in the file name; today when omitted
    #[arg(long)]
    date: Option<Date>,
}

pub(crate) async fn run(fixture: Arc<Fixture>, args: ExportDesignsArgs) -> anyhow::Result<()> {
    let designs = DesignStore::designs(fixture.as_ref()).await?;

    let mut filter = DesignFilter::default()
        .with_active_only(args.active_only)
        .with_featured_only(args.featured_only);

    if let Some(search) = args.search {
        filter = filter.with_search(search);
    }

    if let Some(sport) = args.sport {
        filter = filter.with_sport(sport);
    }

    let selected: Vec<DesignRecord> = filter.apply(&designs).into_iter().cloned().collect();

    info!(total = designs.len(), selected = selected.len(), "filtered designs");

    let contents = to_csv(&DESIGN_HEADERS, &design_rows(&selected))?;

    if let Some(dir) = args.output_dir {
        let date = args.date.unwrap_or_else(|| Zoned::now().date());

        write_export(&dir, &ExportFile::csv("designs", date, contents))?;
    } else {
        writeln!(io::stdout().lock(), "{contents}")?;
    }

    Ok(())
}
