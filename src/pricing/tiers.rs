//! Pricing Tiers
//!
//! Ordered, contiguous quantity ranges covering `[1, ∞)`, each with a per-unit price.

use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

use crate::pricing::ConfigError;

/// A quantity range with a fixed per-unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingTier<'a> {
    min_quantity: u32,
    max_quantity: Option<u32>,
    price_per_unit: Money<'a, Currency>,
}

impl<'a> PricingTier<'a> {
    /// Create a new tier. `max_quantity` of `None` means open-ended.
    pub fn new(
        min_quantity: u32,
        max_quantity: Option<u32>,
        price_per_unit: Money<'a, Currency>,
    ) -> Self {
        Self {
            min_quantity,
            max_quantity,
            price_per_unit,
        }
    }

    /// Smallest quantity in the tier.
    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    /// Largest quantity in the tier, `None` when open-ended.
    pub fn max_quantity(&self) -> Option<u32> {
        self.max_quantity
    }

    /// Price charged per unit in this tier.
    pub fn price_per_unit(&self) -> Money<'a, Currency> {
        self.price_per_unit
    }

    /// Whether `quantity` falls inside the tier.
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && self.max_quantity.is_none_or(|max| quantity <= max)
    }
}

/// A validated set of tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable<'a> {
    tiers: SmallVec<[PricingTier<'a>; 4]>,
}

impl<'a> TierTable<'a> {
    /// Validate and build a tier table.
    ///
    /// Tiers must start at 1, be contiguous without overlap, end with a single open-ended tier,
    /// share one currency, and never charge more per unit than the tier before.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn new(tiers: impl Into<Vec<PricingTier<'a>>>) -> Result<Self, ConfigError> {
        let tiers: SmallVec<[PricingTier<'a>; 4]> = tiers.into().into_iter().collect();

        let first = tiers.first().ok_or(ConfigError::EmptyTierTable)?;

        if first.min_quantity != 1 {
            return Err(ConfigError::TierStartsAt(first.min_quantity));
        }

        for tier in &tiers {
            if let Some(max) = tier.max_quantity
                && max < tier.min_quantity
            {
                return Err(ConfigError::InvertedTier {
                    min: tier.min_quantity,
                    max,
                });
            }

            if tier.price_per_unit.currency() != first.price_per_unit.currency() {
                return Err(ConfigError::TierCurrencyMismatch(tier.min_quantity));
            }
        }

        for pair in tiers.windows(2) {
            let [prev, next] = pair else {
                continue;
            };

            let Some(prev_max) = prev.max_quantity else {
                return Err(ConfigError::OpenEndedTierNotLast(prev.min_quantity));
            };

            let expected = prev_max.checked_add(1).ok_or(ConfigError::TierOverlap {
                after: prev_max,
                next_min: next.min_quantity,
            })?;

            if next.min_quantity < expected {
                return Err(ConfigError::TierOverlap {
                    after: prev_max,
                    next_min: next.min_quantity,
                });
            }

            if next.min_quantity > expected {
                return Err(ConfigError::TierGap {
                    after: prev_max,
                    next_min: next.min_quantity,
                });
            }

            if next.price_per_unit.to_minor_units() > prev.price_per_unit.to_minor_units() {
                return Err(ConfigError::TierPriceIncreases(next.min_quantity));
            }
        }

        if let Some(max) = tiers.last().and_then(|tier| tier.max_quantity) {
            return Err(ConfigError::ClosedFinalTier(max));
        }

        Ok(Self { tiers })
    }

    /// A single open-ended tier at a fixed price.
    pub fn flat(price_per_unit: Money<'a, Currency>) -> Self {
        Self {
            tiers: smallvec![PricingTier::new(1, None, price_per_unit)],
        }
    }

    /// The tier whose range contains `quantity`.
    pub fn tier_for(&self, quantity: u32) -> Option<&PricingTier<'a>> {
        self.tiers.iter().find(|tier| tier.contains(quantity))
    }

    /// The undiscounted tier, i.e. the one for quantity 1.
    pub fn retail_tier(&self) -> Option<&PricingTier<'a>> {
        self.tiers.first()
    }

    /// Iterate over the tiers in quantity order.
    pub fn iter(&self) -> impl Iterator<Item = &PricingTier<'a>> {
        self.tiers.iter()
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Validated tables are never empty, but this mirrors `len`.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
