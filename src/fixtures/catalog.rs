//! Catalog Fixtures

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    fixtures::FixtureError,
    pricing::{
        bundles::{Bundle, BundleComponent},
        fabrics::{DEFAULT_BASELINE_FABRIC, FabricOption, FabricTable},
        tiers::{PricingTier, TierTable},
    },
    products::Product,
};

/// Catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code every price must use
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Name of the fabric used when none is selected
    #[serde(default = "default_baseline")]
    pub baseline_fabric: String,

    /// Fabric options
    #[serde(default)]
    pub fabrics: Vec<FabricFixture>,

    /// Products, in display order
    pub products: Vec<ProductFixture>,

    /// Bundles
    #[serde(default)]
    pub bundles: Vec<BundleFixture>,
}

/// Fabric entry
#[derive(Debug, Deserialize)]
pub struct FabricFixture {
    /// Fabric identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Per-unit modifier, e.g. `"2000 CLP"`
    pub modifier: String,

    /// Material composition
    #[serde(default)]
    pub composition: Option<String>,
}

/// Product entry
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Base price, e.g. `"12000 CLP"`
    pub price: String,

    /// Garment type
    #[serde(default)]
    pub apparel_type: Option<String>,

    /// Whether the product is a bundle
    #[serde(default)]
    pub bundle: bool,

    /// Quantity tiers; a flat tier at `price` when empty
    #[serde(default)]
    pub tiers: Vec<TierFixture>,
}

/// Tier entry
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Smallest quantity in the tier
    pub min: u32,

    /// Largest quantity in the tier; open-ended when absent
    #[serde(default)]
    pub max: Option<u32>,

    /// Per-unit price
    pub price: String,
}

/// Bundle entry
#[derive(Debug, Deserialize)]
pub struct BundleFixture {
    /// Bundle identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Discount, `"15%"` or `"0.15"`
    pub discount: String,

    /// Garment lines
    #[serde(default)]
    pub components: Vec<ComponentFixture>,
}

/// Bundle component entry
#[derive(Debug, Deserialize)]
pub struct ComponentFixture {
    /// Garment count
    #[serde(default = "one")]
    pub quantity: u32,

    /// Garment type
    #[serde(rename = "type")]
    pub component_type: String,
}

impl CatalogFixture {
    /// Build a validated catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a price, percentage or currency cannot be parsed, a price uses another
    /// currency than the catalog, or the tables fail validation.
    pub fn try_into_catalog(self) -> Result<Catalog<'static>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let fabrics = self
            .fabrics
            .into_iter()
            .map(|fabric| {
                let modifier = parse_money_in(&fabric.modifier, currency)?;
                let option = FabricOption::new(fabric.id, fabric.name, modifier);

                Ok(match fabric.composition {
                    Some(composition) => option.with_composition(composition),
                    None => option,
                })
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        let mut catalog = Catalog::new(currency, FabricTable::new(fabrics, &self.baseline_fabric)?);

        for product in self.products {
            catalog.insert_product(product.try_into_product(currency)?)?;
        }

        for bundle in self.bundles {
            let components: Vec<BundleComponent> = bundle
                .components
                .into_iter()
                .map(|c| BundleComponent::new(c.quantity, c.component_type))
                .collect();

            let discount = parse_percentage(&bundle.discount)?;

            catalog.insert_bundle(Bundle::new(bundle.id, bundle.name, components, discount)?)?;
        }

        Ok(catalog)
    }
}

impl ProductFixture {
    fn try_into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product<'static>, FixtureError> {
        let base_price = parse_money_in(&self.price, currency)?;

        let mut product = Product::new(self.id, self.name, base_price).with_bundle_flag(self.bundle);

        if let Some(apparel_type) = self.apparel_type {
            product = product.with_apparel_type(apparel_type);
        }

        if self.tiers.is_empty() {
            return Ok(product);
        }

        let tiers = self
            .tiers
            .iter()
            .map(|tier| {
                let price = parse_money_in(&tier.price, currency)?;

                Ok(PricingTier::new(tier.min, tier.max, price))
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(product.with_tiers(TierTable::new(tiers)?))
    }
}

/// Parse a price string like `"12.00 GBP"` or `"12000 CLP"` into minor units and currency.
///
/// # Errors
///
/// Returns an error if the format is invalid, the amount has more decimals than the currency
/// allows, or the currency is not supported.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    };

    let currency = parse_currency(code)?;
    let amount = Decimal::from_str(amount).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let minor = amount
        .checked_mul(Decimal::from(scale))
        .filter(|minor| minor.fract().is_zero())
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor, currency))
}

/// Parse a percentage string into percentage points: `"15%"` and `"0.15"` both give `15`.
///
/// # Errors
///
/// Returns an error if the value is not a number.
pub fn parse_percentage(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    if let Some(points) = trimmed.strip_suffix('%') {
        return Decimal::from_str(points.trim())
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()));
    }

    let fraction =
        Decimal::from_str(trimmed).map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything other than CLP, USD, EUR or GBP.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "CLP" => Ok(iso::CLP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        _ => Err(FixtureError::UnknownCurrency(code.to_string())),
    }
}

fn parse_money_in(
    s: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor, parsed) = parse_price(s)?;

    if parsed != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            parsed.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor, currency))
}

fn default_currency() -> String {
    "CLP".to_string()
}

fn default_baseline() -> String {
    DEFAULT_BASELINE_FABRIC.to_string()
}

const fn one() -> u32 {
    1
}
