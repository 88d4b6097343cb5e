//! Size breakdown rows.
//!
//! One row per product and size. Prices are exported in minor units.

use crate::{breakdown::ProductSizeBreakdown, export::CsvField};

/// Header row of the size breakdown export.
pub const BREAKDOWN_HEADERS: [&str; 9] = [
    "Product",
    "Size",
    "Quantity",
    "Jersey Numbers",
    "Player Names",
    "Player IDs",
    "Paid",
    "Unit Price",
    "Total Price",
];

/// Flatten breakdowns into rows, products in input order and sizes in breakdown order.
///
/// The total price on each row is the size's share: `unit_price * quantity`.
pub fn breakdown_rows(breakdowns: &[ProductSizeBreakdown<'_>]) -> Vec<Vec<CsvField>> {
    breakdowns
        .iter()
        .flat_map(|breakdown| {
            let unit_price = breakdown.unit_price.to_minor_units();

            breakdown.sizes.iter().map(move |entry| {
                vec![
                    CsvField::Text(breakdown.product_name.clone()),
                    CsvField::Text(entry.size.clone()),
                    CsvField::Number(Some(i64::from(entry.quantity))),
                    CsvField::List(entry.jersey_numbers.clone()),
                    CsvField::List(entry.player_names.clone()),
                    CsvField::List(entry.player_ids.clone()),
                    CsvField::Number(i64::try_from(entry.paid_count()).ok()),
                    CsvField::Number(Some(unit_price)),
                    CsvField::Number(unit_price.checked_mul(i64::from(entry.quantity))),
                ]
            })
        })
        .collect()
}
