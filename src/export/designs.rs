//! Design catalogue rows.

use crate::{designs::DesignRecord, export::CsvField};

/// Header row of the design export.
pub const DESIGN_HEADERS: [&str; 7] = ["ID", "Name", "Slug", "Active", "Featured", "Sports", "Mockups"];

/// One row per design, in input order.
pub fn design_rows(designs: &[DesignRecord]) -> Vec<Vec<CsvField>> {
    designs.iter().map(design_row).collect()
}

fn design_row(design: &DesignRecord) -> Vec<CsvField> {
    vec![
        CsvField::Text(design.id.clone()),
        CsvField::Text(design.name.clone()),
        CsvField::Text(design.slug.clone()),
        CsvField::Bool(design.active),
        CsvField::Bool(design.featured),
        CsvField::List(design.sports.clone()),
        CsvField::List(design.mockups.clone()),
    ]
}
