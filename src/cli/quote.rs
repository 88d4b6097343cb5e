use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::anyhow;
use clap::{Args, ValueEnum};
use kitline::{
    fixtures::Fixture,
    pricing::{
        bundles::{BundleSelection, BundledQuote},
        calculator::PricingRequest,
    },
    services::{QuoteInput, QuoteService},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum QuoteFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Product identifier
    product: String,

    /// Quantity to price
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Fabric identifier; the baseline fabric when omitted
    #[arg(short, long)]
    fabric: Option<String>,

    /// Bundle to apply
    #[arg(short, long)]
    bundle: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = QuoteFormat::Table)]
    format: QuoteFormat,
}

pub(crate) async fn run(fixture: Arc<Fixture>, args: QuoteArgs) -> anyhow::Result<()> {
    let service = QuoteService::new(fixture);

    let input = QuoteInput {
        request: PricingRequest {
            product_id: args.product,
            quantity: args.quantity,
            fabric_id: args.fabric,
        },
        bundle: args
            .bundle
            .map(BundleSelection::with_active)
            .unwrap_or_default(),
    };

    let quoted = service.load(&input).await?;
    let mut out = io::stdout().lock();

    match args.format {
        QuoteFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &quoted.to_response())?;
            writeln!(out)?;
        }
        QuoteFormat::Table => write_quote(&mut out, &quoted)?,
    }

    Ok(())
}

fn write_quote(out: &mut impl Write, quoted: &BundledQuote<'_>) -> anyhow::Result<()> {
    let quote = &quoted.quote;
    let tier = match quote.tier.max_quantity() {
        Some(max) => format!("{}-{max}", quote.tier.min_quantity()),
        None => format!("{}+", quote.tier.min_quantity()),
    };

    let mut builder = Builder::default();

    builder.push_record(["Product", quote.product_id.as_str()]);
    builder.push_record(["Fabric", quote.fabric_id.as_str()]);
    builder.push_record(["Quantity".to_string(), quote.quantity.to_string()]);
    builder.push_record(["Tier".to_string(), tier]);
    builder.push_record(["Unit price".to_string(), quote.unit_price.to_string()]);
    builder.push_record(["Total".to_string(), quote.total_price.to_string()]);
    builder.push_record(["Retail".to_string(), quote.retail_price.to_string()]);

    if let Some(bundle) = &quoted.bundle {
        builder.push_record([
            "Bundle".to_string(),
            format!("{} (-{}%)", bundle.name, bundle.discount_pct),
        ]);
        builder.push_record(["Bundle discount".to_string(), quoted.bundle_discount.to_string()]);
        builder.push_record(["Bundled total".to_string(), quoted.total_price.to_string()]);
    }

    builder.push_record(["Savings".to_string(), quoted.savings.to_string()]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(out, "{table}").map_err(|err| anyhow!("failed to write quote: {err}"))
}
