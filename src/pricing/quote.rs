//! Price Quotes

use rusty_money::{Money, iso::Currency};
use serde::Serialize;

use crate::pricing::tiers::PricingTier;

/// Result of pricing one product at one quantity and fabric.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote<'a> {
    /// Product identifier
    pub product_id: String,

    /// Product garment type, used for bundle eligibility
    pub apparel_type: Option<String>,

    /// Fabric the quote was priced with
    pub fabric_id: String,

    /// Quantity priced
    pub quantity: u32,

    /// Tier the quantity fell into
    pub tier: PricingTier<'a>,

    /// Tier price per unit, before the fabric modifier
    pub base_price: Money<'a, Currency>,

    /// Fabric modifier per unit
    pub fabric_modifier: Money<'a, Currency>,

    /// `base_price + fabric_modifier`
    pub unit_price: Money<'a, Currency>,

    /// `unit_price * quantity`
    pub total_price: Money<'a, Currency>,

    /// Quantity-1 unit price (with fabric) times quantity
    pub retail_price: Money<'a, Currency>,

    /// `max(0, retail_price - total_price)`
    pub savings: Money<'a, Currency>,
}

impl PriceQuote<'_> {
    /// Currency of every amount in the quote.
    pub fn currency(&self) -> &Currency {
        self.unit_price.currency()
    }

    /// Wire representation of the quote, amounts in minor units.
    pub fn to_response(&self) -> PricingResponse {
        PricingResponse {
            product_id: self.product_id.clone(),
            fabric_id: self.fabric_id.clone(),
            quantity: self.quantity,
            base_price_cents: self.base_price.to_minor_units(),
            fabric_modifier_cents: self.fabric_modifier.to_minor_units(),
            unit_price_cents: self.unit_price.to_minor_units(),
            total_price_cents: self.total_price.to_minor_units(),
            savings_cents: self.savings.to_minor_units(),
            retail_price_cents: self.retail_price.to_minor_units(),
            tier: TierResponse {
                min_quantity: self.tier.min_quantity(),
                max_quantity: self.tier.max_quantity(),
                price_per_unit_cents: self.tier.price_per_unit().to_minor_units(),
            },
            currency: self.currency().iso_alpha_code.to_string(),
        }
    }
}

/// Pricing query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResponse {
    /// Product identifier
    pub product_id: String,

    /// Fabric identifier
    pub fabric_id: String,

    /// Quantity priced
    pub quantity: u32,

    /// Tier price per unit
    pub base_price_cents: i64,

    /// Fabric modifier per unit
    pub fabric_modifier_cents: i64,

    /// Unit price including fabric
    pub unit_price_cents: i64,

    /// Total price
    pub total_price_cents: i64,

    /// Savings against the retail price
    pub savings_cents: i64,

    /// Retail price
    pub retail_price_cents: i64,

    /// Tier applied
    pub tier: TierResponse,

    /// ISO 4217 currency code
    pub currency: String,
}

/// Tier section of a [`PricingResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierResponse {
    /// Smallest quantity in the tier
    pub min_quantity: u32,

    /// Largest quantity in the tier; `null` when open-ended
    pub max_quantity: Option<u32>,

    /// Tier price per unit
    pub price_per_unit_cents: i64,
}
