//! Pricing
//!
//! Tiered quantity pricing with fabric modifiers and bundle discounts.

use rust_decimal::Decimal;
use rusty_money::MoneyError;
use thiserror::Error;

pub mod bundles;
pub mod calculator;
pub mod fabrics;
pub mod quote;
pub mod tiers;

/// Malformed pricing configuration.
///
/// These are fatal: a table that fails validation is never patched up at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A tier table must contain at least one tier.
    #[error("tier table is empty")]
    EmptyTierTable,

    /// The first tier must start at quantity 1.
    #[error("first tier must start at quantity 1, starts at {0}")]
    TierStartsAt(u32),

    /// A tier's maximum is below its minimum.
    #[error("tier {min}..={max} has a maximum below its minimum")]
    InvertedTier {
        /// Tier minimum quantity
        min: u32,
        /// Tier maximum quantity
        max: u32,
    },

    /// Quantities between two tiers are not covered.
    #[error("gap between tier ending at {after} and tier starting at {next_min}")]
    TierGap {
        /// Maximum quantity of the earlier tier
        after: u32,
        /// Minimum quantity of the later tier
        next_min: u32,
    },

    /// Two tiers claim the same quantity.
    #[error("tier starting at {next_min} overlaps tier ending at {after}")]
    TierOverlap {
        /// Maximum quantity of the earlier tier
        after: u32,
        /// Minimum quantity of the later tier
        next_min: u32,
    },

    /// Only the last tier may be open-ended.
    #[error("open-ended tier starting at {0} is not the last tier")]
    OpenEndedTierNotLast(u32),

    /// The last tier must be open-ended.
    #[error("last tier ends at {0}; it must be open-ended")]
    ClosedFinalTier(u32),

    /// A higher tier charges more per unit than a lower one.
    #[error("tier starting at {0} charges more per unit than the tier before it")]
    TierPriceIncreases(u32),

    /// Tiers are priced in different currencies.
    #[error("tier starting at {0} uses a different currency")]
    TierCurrencyMismatch(u32),

    /// No tier contains the quantity.
    #[error("no tier covers quantity {0}")]
    UncoveredQuantity(u32),

    /// Fabric price modifiers may not be negative.
    #[error("fabric {0} has a negative price modifier")]
    NegativeFabricModifier(String),

    /// Two fabrics share an id.
    #[error("duplicate fabric id {0}")]
    DuplicateFabric(String),

    /// More than one fabric matches the baseline name.
    #[error("more than one fabric is named {0}")]
    MultipleBaselineFabrics(String),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(String),

    /// A product is priced in a different currency than the catalog.
    #[error("product {0} is not priced in the catalog currency")]
    ProductCurrencyMismatch(String),

    /// Two bundles share an id.
    #[error("duplicate bundle id {0}")]
    DuplicateBundle(String),

    /// Bundle discount outside `0..=100`.
    #[error("bundle {bundle} has discount {discount}% outside 0-100")]
    BundleDiscountOutOfRange {
        /// Bundle identifier
        bundle: String,
        /// Configured discount percentage points
        discount: Decimal,
    },
}

/// Errors returned while pricing a request.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Quantities must be at least 1.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// The requested fabric id is not in the fabric table.
    #[error("fabric not found: {0}")]
    FabricNotFound(String),

    /// No fabric was selected and no baseline fabric exists.
    #[error("no fabric selected and no baseline fabric configured")]
    NoBaselineFabric,

    /// The requested product id is unknown.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The pricing configuration is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Price arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
