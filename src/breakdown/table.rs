//! Breakdown Tables
//!
//! Terminal rendering of size breakdowns.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::breakdown::{BreakdownError, ProductSizeBreakdown, SizeEntry};

/// Write one table per product, followed by its totals.
///
/// # Errors
///
/// Returns [`BreakdownError::IO`] if writing fails.
pub fn write_breakdowns(
    mut out: impl io::Write,
    breakdowns: &[ProductSizeBreakdown<'_>],
) -> Result<(), BreakdownError> {
    if breakdowns.is_empty() {
        return writeln!(out, "No roster entries.").map_err(|_err| BreakdownError::IO);
    }

    for breakdown in breakdowns {
        write_breakdown(&mut out, breakdown)?;
    }

    Ok(())
}

fn write_breakdown(
    out: &mut impl io::Write,
    breakdown: &ProductSizeBreakdown<'_>,
) -> Result<(), BreakdownError> {
    let mut builder = Builder::default();

    builder.push_record(["Size", "Qty", "Numbers", "Players", "Paid"]);

    for entry in &breakdown.sizes {
        builder.push_record(size_row(entry));
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(
        out,
        "\n\x1b[1m{}\x1b[0m ({})\n{table}",
        breakdown.product_name, breakdown.product_id
    )
    .map_err(|_err| BreakdownError::IO)?;

    writeln!(
        out,
        " {} x {} = \x1b[1m{}\x1b[0m",
        breakdown.total_quantity, breakdown.unit_price, breakdown.total_price
    )
    .map_err(|_err| BreakdownError::IO)
}

fn size_row(entry: &SizeEntry) -> [String; 5] {
    [
        entry.size.clone(),
        entry.quantity.to_string(),
        entry.jersey_numbers.join(", "),
        entry.player_names.join(", "),
        format!("{}/{}", entry.paid_count(), entry.payment_statuses.len()),
    ]
}
