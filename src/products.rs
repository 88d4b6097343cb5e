//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::pricing::tiers::TierTable;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// External product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Product base price
    pub base_price: Money<'a, Currency>,

    /// Garment type (e.g. `jersey`, `shorts`), used for bundle eligibility
    pub apparel_type: Option<String>,

    /// Whether the product is itself sold as a bundle
    pub is_bundle: bool,

    tiers: TierTable<'a>,
}

impl<'a> Product<'a> {
    /// Create a product priced from a single open-ended tier at its base price.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            apparel_type: None,
            is_bundle: false,
            tiers: TierTable::flat(base_price),
        }
    }

    /// Set the garment type.
    #[must_use]
    pub fn with_apparel_type(mut self, apparel_type: impl Into<String>) -> Self {
        self.apparel_type = Some(apparel_type.into());
        self
    }

    /// Replace the flat base-price tier with a validated tier table.
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierTable<'a>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Mark the product as a bundle.
    #[must_use]
    pub fn with_bundle_flag(mut self, is_bundle: bool) -> Self {
        self.is_bundle = is_bundle;
        self
    }

    /// Quantity tiers used to price the product.
    pub fn tiers(&self) -> &TierTable<'a> {
        &self.tiers
    }
}
