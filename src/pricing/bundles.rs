//! Bundles
//!
//! A bundle is a named set of garment types sold together at a percentage discount. Only one
//! bundle can be active at a time; its components are descriptive and only decide which products
//! are eligible.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, discounted_minor, percentage_from_points},
    pricing::{
        ConfigError,
        quote::{PriceQuote, PricingResponse},
    },
};

/// Errors that can occur when applying a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The quoted product's garment type is not part of the bundle.
    #[error("product {product} is not part of bundle {bundle}")]
    IneligibleProduct {
        /// Product identifier
        product: String,
        /// Bundle identifier
        bundle: String,
    },

    /// Percentage arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One garment line of a bundle, e.g. `2 x shorts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleComponent {
    /// Number of garments of this type
    pub quantity: u32,

    /// Garment type
    pub component_type: String,
}

impl BundleComponent {
    /// Create a component.
    pub fn new(quantity: u32, component_type: impl Into<String>) -> Self {
        Self {
            quantity,
            component_type: component_type.into(),
        }
    }
}

/// A selectable bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    id: String,
    name: String,
    components: SmallVec<[BundleComponent; 4]>,
    discount_pct: Decimal,
    discount: Percentage,
}

impl Bundle {
    /// Create a bundle with a discount in percentage points (`15` for 15%).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BundleDiscountOutOfRange`] when the discount is outside `0..=100`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        components: impl Into<Vec<BundleComponent>>,
        discount_pct: Decimal,
    ) -> Result<Self, ConfigError> {
        let id = id.into();

        let discount = percentage_from_points(discount_pct).map_err(|_err| {
            ConfigError::BundleDiscountOutOfRange {
                bundle: id.clone(),
                discount: discount_pct,
            }
        })?;

        Ok(Self {
            id,
            name: name.into(),
            components: components.into().into_iter().collect(),
            discount_pct,
            discount,
        })
    }

    /// Bundle identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Garment lines included in the bundle.
    pub fn components(&self) -> &[BundleComponent] {
        &self.components
    }

    /// Discount in percentage points.
    pub fn discount_pct(&self) -> Decimal {
        self.discount_pct
    }

    /// Whether the bundle includes the given garment type.
    pub fn includes(&self, component_type: &str) -> bool {
        self.components
            .iter()
            .any(|component| component.component_type.eq_ignore_ascii_case(component_type))
    }

    /// Total number of garments across all components.
    pub fn garment_count(&self) -> u32 {
        self.components
            .iter()
            .fold(0, |acc, component| acc.saturating_add(component.quantity))
    }
}

/// The currently active bundle, if any.
///
/// Selection is a value: toggling returns a new selection rather than mutating shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSelection {
    active: Option<String>,
}

impl BundleSelection {
    /// Selection with a bundle already active.
    pub fn with_active(id: impl Into<String>) -> Self {
        Self {
            active: Some(id.into()),
        }
    }

    /// Toggle `id`: selecting the active bundle clears it, selecting another replaces it.
    #[must_use]
    pub fn toggle(&self, id: &str) -> Self {
        if self.active.as_deref() == Some(id) {
            Self::default()
        } else {
            Self::with_active(id)
        }
    }

    /// Active bundle id.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Find the active bundle among `bundles`.
    pub fn resolve<'b>(&self, bundles: &'b [Bundle]) -> Option<&'b Bundle> {
        let active = self.active.as_deref()?;

        bundles.iter().find(|bundle| bundle.id == active)
    }
}

/// Summary of the bundle that was applied to a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedBundle {
    /// Bundle identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Discount in percentage points
    pub discount_pct: Decimal,
}

/// A quote adjusted for the active bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct BundledQuote<'a> {
    /// Quote before the bundle discount
    pub quote: PriceQuote<'a>,

    /// Bundle that was applied
    pub bundle: Option<AppliedBundle>,

    /// Amount taken off the quote total by the bundle
    pub bundle_discount: Money<'a, Currency>,

    /// Total after the bundle discount
    pub total_price: Money<'a, Currency>,

    /// Tier savings plus the bundle discount
    pub savings: Money<'a, Currency>,
}

impl BundledQuote<'_> {
    /// Wire representation: the plain pricing response plus the bundle adjustment.
    pub fn to_response(&self) -> BundledResponse {
        BundledResponse {
            pricing: self.quote.to_response(),
            bundle_id: self.bundle.as_ref().map(|bundle| bundle.id.clone()),
            bundle_discount_pct: self.bundle.as_ref().map(|bundle| bundle.discount_pct),
            bundle_discount_cents: self.bundle_discount.to_minor_units(),
            bundled_total_cents: self.total_price.to_minor_units(),
            total_savings_cents: self.savings.to_minor_units(),
        }
    }
}

/// Pricing response with the active bundle applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledResponse {
    /// Quote before the bundle
    #[serde(flatten)]
    pub pricing: PricingResponse,

    /// Applied bundle
    pub bundle_id: Option<String>,

    /// Applied discount in percentage points
    pub bundle_discount_pct: Option<Decimal>,

    /// Amount taken off by the bundle
    pub bundle_discount_cents: i64,

    /// Total after the bundle
    pub bundled_total_cents: i64,

    /// Tier savings plus the bundle discount
    pub total_savings_cents: i64,
}

/// Apply the active bundle's discount to a quote's total.
///
/// Products without a garment type are always eligible.
///
/// # Errors
///
/// - [`BundleError::IneligibleProduct`]: the product's garment type is not in the bundle.
/// - [`BundleError::Discount`]: the discount cannot be represented in minor units.
/// - [`BundleError::Money`]: money arithmetic failed.
pub fn apply_bundle<'a>(
    quote: PriceQuote<'a>,
    bundle: Option<&Bundle>,
) -> Result<BundledQuote<'a>, BundleError> {
    let quoted_total = quote.total_price;
    let currency = quoted_total.currency();

    let Some(bundle) = bundle else {
        return Ok(BundledQuote {
            total_price: quoted_total,
            savings: quote.savings,
            bundle_discount: Money::from_minor(0, currency),
            bundle: None,
            quote,
        });
    };

    if let Some(apparel_type) = quote.apparel_type.as_deref()
        && !bundle.includes(apparel_type)
    {
        return Err(BundleError::IneligibleProduct {
            product: quote.product_id,
            bundle: bundle.id.clone(),
        });
    }

    let subtotal = quoted_total.to_minor_units();
    let total_price = Money::from_minor(discounted_minor(&bundle.discount, subtotal)?, currency);
    let bundle_discount = quoted_total.sub(total_price)?;
    let savings = quote.savings.add(bundle_discount)?;

    Ok(BundledQuote {
        bundle: Some(AppliedBundle {
            id: bundle.id.clone(),
            name: bundle.name.clone(),
            discount_pct: bundle.discount_pct,
        }),
        bundle_discount,
        total_price,
        savings,
        quote,
    })
}
