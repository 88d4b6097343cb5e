//! Size Breakdowns
//!
//! Per-product, per-size view of a roster: who wears what, with which number, and whether they
//! have paid. A breakdown is rebuilt from scratch on every refresh and never patched.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

pub mod aggregate;
pub mod table;

pub use aggregate::{AggregationMode, aggregate};

/// Errors that can occur while building or rendering breakdowns.
#[derive(Debug, Error)]
pub enum BreakdownError {
    /// Quantity or price totals overflowed.
    #[error("size breakdown totals overflowed for product {0}")]
    Overflow(String),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Members of one product in one size.
///
/// `player_ids` and `payment_statuses` get one entry per member and are the alignment key;
/// `jersey_numbers` and `player_names` only get entries for members that have them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeEntry {
    /// Size label, as recorded, or `N/A`
    pub size: String,

    /// Garments in this size
    pub quantity: u32,

    /// Jersey numbers of members that have one
    pub jersey_numbers: Vec<String>,

    /// Display names of members that have one
    pub player_names: Vec<String>,

    /// Player ids, one per member
    pub player_ids: Vec<String>,

    /// Paid flags, index-aligned with `player_ids`
    pub payment_statuses: Vec<bool>,
}

impl SizeEntry {
    /// An empty entry for `size`.
    pub fn new(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            ..Self::default()
        }
    }

    /// Number of members in this size that have paid.
    pub fn paid_count(&self) -> usize {
        self.payment_statuses.iter().filter(|paid| **paid).count()
    }
}

/// Size distribution and totals for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSizeBreakdown<'a> {
    /// Product identifier
    pub product_id: String,

    /// Product name
    pub product_name: String,

    /// Sizes in canonical order, unknown sizes last
    pub sizes: Vec<SizeEntry>,

    /// Sum of the size quantities
    pub total_quantity: u32,

    /// Price per garment
    pub unit_price: Money<'a, Currency>,

    /// `unit_price * total_quantity`
    pub total_price: Money<'a, Currency>,
}

impl ProductSizeBreakdown<'_> {
    /// Look up the entry for a size label.
    pub fn size(&self, size: &str) -> Option<&SizeEntry> {
        self.sizes.iter().find(|entry| entry.size == size)
    }
}
