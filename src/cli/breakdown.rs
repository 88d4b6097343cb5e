use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::anyhow;
use clap::{Args, ValueEnum};
use jiff::{Zoned, civil::Date};
use kitline::{
    breakdown::table::write_breakdowns,
    export::{BREAKDOWN_HEADERS, ExportFile, breakdown_rows, to_csv},
    fixtures::Fixture,
    refresh::ViewStatus,
    services::{BreakdownRequest, BreakdownService},
};

use crate::cli::{config::AppConfig, write_export};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum BreakdownFormat {
    Table,
    Csv,
}

#[derive(Debug, Args)]
pub(crate) struct BreakdownArgs {
    /// Team order id
    #[arg(long, required_unless_present = "design_request", conflicts_with = "design_request")]
    order: Option<String>,

    /// Design request id
    #[arg(long)]
    design_request: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = BreakdownFormat::Table)]
    format: BreakdownFormat,

    /// With `--format csv`, write the export into this directory instead of stdout
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Export date used in the file name; today when omitted
    #[arg(long)]
    date: Option<Date>,
}

pub(crate) async fn run(
    fixture: Arc<Fixture>,
    config: &AppConfig,
    args: BreakdownArgs,
) -> anyhow::Result<()> {
    let request = match (args.order, args.design_request) {
        (Some(order), _) => BreakdownRequest::Order(order),
        (None, Some(request)) => BreakdownRequest::DesignRequest(request),
        (None, None) => return Err(anyhow!("either --order or --design-request is required")),
    };

    let service = BreakdownService::new(fixture.clone(), fixture, config.jersey_display()?);
    let state = service.refresh(&request).await;

    if let ViewStatus::Failed(reason) = state.status {
        return Err(anyhow!("breakdown of {request} failed: {reason}"));
    }

    let view = state
        .value
        .ok_or_else(|| anyhow!("breakdown of {request} produced no result"))?;

    match args.format {
        BreakdownFormat::Table => write_breakdowns(io::stdout().lock(), &view.breakdowns)?,
        BreakdownFormat::Csv => {
            let contents = to_csv(&BREAKDOWN_HEADERS, &breakdown_rows(&view.breakdowns))?;

            if let Some(dir) = args.output_dir {
                let date = args.date.unwrap_or_else(|| Zoned::now().date());

                write_export(&dir, &ExportFile::csv("size-breakdown", date, contents))?;
            } else {
                writeln!(io::stdout().lock(), "{contents}")?;
            }
        }
    }

    Ok(())
}
