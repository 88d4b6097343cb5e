//! Pricing Calculator
//!
//! `unit_price = tier.price_per_unit + fabric_modifier` and `total_price = unit_price * quantity`.
//! Savings are measured against the quantity-1 tier at the same fabric.

use rusty_money::Money;
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::PricingSource,
    pricing::{ConfigError, PricingError, fabrics::FabricTable, quote::PriceQuote},
    products::Product,
};

/// Pricing query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PricingRequest {
    /// Product identifier
    pub product_id: String,

    /// Quantity, at least 1
    pub quantity: u32,

    /// Fabric identifier; the baseline fabric when absent
    #[serde(default)]
    pub fabric_id: Option<String>,
}

/// Prices products against a fabric table.
#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator<'c, 'a> {
    fabrics: &'c FabricTable<'a>,
}

impl<'c, 'a> PricingCalculator<'c, 'a> {
    /// Create a calculator over `fabrics`.
    pub fn new(fabrics: &'c FabricTable<'a>) -> Self {
        Self { fabrics }
    }

    /// Price `quantity` units of `product` in the selected fabric.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidQuantity`]: `quantity` is zero.
    /// - [`PricingError::FabricNotFound`] / [`PricingError::NoBaselineFabric`]: fabric resolution.
    /// - [`PricingError::Config`]: the product's tiers do not cover `quantity`.
    /// - [`PricingError::Overflow`]: the total does not fit in minor units.
    /// - [`PricingError::Money`]: fabric and tier currencies differ.
    pub fn calculate(
        &self,
        product: &Product<'a>,
        quantity: u32,
        fabric_id: Option<&str>,
    ) -> Result<PriceQuote<'a>, PricingError> {
        if quantity == 0 {
            return Err(PricingError::InvalidQuantity(quantity));
        }

        let fabric = self.fabrics.resolve(fabric_id)?;
        let tiers = product.tiers();

        let tier = *tiers
            .tier_for(quantity)
            .ok_or(ConfigError::UncoveredQuantity(quantity))?;

        let retail_tier = tiers.retail_tier().ok_or(ConfigError::EmptyTierTable)?;

        let base_price = tier.price_per_unit();
        let unit_price = base_price.add(fabric.price_modifier)?;
        let retail_unit_price = retail_tier.price_per_unit().add(fabric.price_modifier)?;

        let total_minor = times(unit_price.to_minor_units(), quantity)?;
        let retail_minor = times(retail_unit_price.to_minor_units(), quantity)?;
        let savings_minor = retail_minor
            .checked_sub(total_minor)
            .ok_or(PricingError::Overflow)?
            .max(0);

        let currency = unit_price.currency();

        debug!(
            product = %product.id,
            fabric = %fabric.id,
            quantity,
            tier_min = tier.min_quantity(),
            total = total_minor,
            "priced product"
        );

        Ok(PriceQuote {
            product_id: product.id.clone(),
            apparel_type: product.apparel_type.clone(),
            fabric_id: fabric.id.clone(),
            quantity,
            tier,
            base_price,
            fabric_modifier: fabric.price_modifier,
            unit_price,
            total_price: Money::from_minor(total_minor, currency),
            retail_price: Money::from_minor(retail_minor, currency),
            savings: Money::from_minor(savings_minor, currency),
        })
    }
}

/// Resolve a [`PricingRequest`] against a pricing source.
///
/// # Errors
///
/// Returns [`PricingError::ProductNotFound`] for unknown products, otherwise any error from
/// [`PricingCalculator::calculate`].
pub fn quote<'a, S>(source: &S, request: &PricingRequest) -> Result<PriceQuote<'a>, PricingError>
where
    S: PricingSource<'a>,
{
    let product = source
        .product(&request.product_id)
        .ok_or_else(|| PricingError::ProductNotFound(request.product_id.clone()))?;

    PricingCalculator::new(source.fabrics()).calculate(
        product,
        request.quantity,
        request.fabric_id.as_deref(),
    )
}

fn times(minor: i64, quantity: u32) -> Result<i64, PricingError> {
    minor
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{CLP, USD};
    use testresult::TestResult;

    use crate::pricing::{
        fabrics::{DEFAULT_BASELINE_FABRIC, FabricOption},
        tiers::{PricingTier, TierTable},
    };

    use super::*;

    fn fabrics() -> TestResult<FabricTable<'static>> {
        Ok(FabricTable::new(
            vec![
                FabricOption::new("active", "Active", Money::from_minor(0, CLP)),
                FabricOption::new("pro", "Pro Dry", Money::from_minor(200, CLP)),
            ],
            DEFAULT_BASELINE_FABRIC,
        )?)
    }

    fn jersey() -> TestResult<Product<'static>> {
        let tiers = TierTable::new(vec![
            PricingTier::new(1, Some(9), Money::from_minor(1_000, CLP)),
            PricingTier::new(10, Some(49), Money::from_minor(800, CLP)),
            PricingTier::new(50, None, Money::from_minor(600, CLP)),
        ])?;

        Ok(Product::new("jersey", "Home Jersey", Money::from_minor(1_000, CLP)).with_tiers(tiers))
    }

    #[test]
    fn price_at_top_of_first_tier() -> TestResult {
        let fabrics = fabrics()?;
        let quote = PricingCalculator::new(&fabrics).calculate(&jersey()?, 9, None)?;

        assert_eq!(quote.unit_price, Money::from_minor(1_000, CLP));
        assert_eq!(quote.total_price, Money::from_minor(9_000, CLP));
        assert_eq!(quote.savings, Money::from_minor(0, CLP));
        assert_eq!(quote.fabric_id, "active");

        Ok(())
    }

    #[test]
    fn total_drops_when_crossing_into_cheaper_tier() -> TestResult {
        let fabrics = fabrics()?;
        let quote = PricingCalculator::new(&fabrics).calculate(&jersey()?, 10, None)?;

        assert_eq!(quote.unit_price, Money::from_minor(800, CLP));
        assert_eq!(quote.total_price, Money::from_minor(8_000, CLP));
        assert_eq!(quote.retail_price, Money::from_minor(10_000, CLP));
        assert_eq!(quote.savings, Money::from_minor(2_000, CLP));
        assert_eq!(quote.tier.min_quantity(), 10);

        Ok(())
    }

    #[test]
    fn fabric_modifier_is_added_per_unit() -> TestResult {
        let fabrics = fabrics()?;
        let quote = PricingCalculator::new(&fabrics).calculate(&jersey()?, 5, Some("pro"))?;

        assert_eq!(quote.base_price, Money::from_minor(1_000, CLP));
        assert_eq!(quote.fabric_modifier, Money::from_minor(200, CLP));
        assert_eq!(quote.unit_price, Money::from_minor(1_200, CLP));
        assert_eq!(quote.total_price, Money::from_minor(6_000, CLP));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        let fabrics = fabrics()?;
        let result = PricingCalculator::new(&fabrics).calculate(&jersey()?, 0, None);

        assert!(matches!(result, Err(PricingError::InvalidQuantity(0))));

        Ok(())
    }

    #[test]
    fn unknown_fabric_is_rejected() -> TestResult {
        let fabrics = fabrics()?;
        let result = PricingCalculator::new(&fabrics).calculate(&jersey()?, 5, Some("silk"));

        assert!(matches!(result, Err(PricingError::FabricNotFound(id)) if id == "silk"));

        Ok(())
    }

    #[test]
    fn overflowing_totals_are_rejected() -> TestResult {
        let fabrics = fabrics()?;
        let product = Product::new("gold", "Gold Jersey", Money::from_minor(i64::MAX / 2, CLP));
        let result = PricingCalculator::new(&fabrics).calculate(&product, 3, None);

        assert!(matches!(result, Err(PricingError::Overflow)));

        Ok(())
    }

    #[test]
    fn fabric_in_other_currency_is_a_money_error() -> TestResult {
        let fabrics = FabricTable::new(
            vec![FabricOption::new("active", "Active", Money::from_minor(0, USD))],
            DEFAULT_BASELINE_FABRIC,
        )?;

        let result = PricingCalculator::new(&fabrics).calculate(&jersey()?, 5, None);

        assert!(matches!(result, Err(PricingError::Money(_))));

        Ok(())
    }

    #[test]
    fn unit_price_never_increases_with_quantity() -> TestResult {
        let fabrics = fabrics()?;
        let calculator = PricingCalculator::new(&fabrics);
        let product = jersey()?;

        let mut previous_unit = i64::MAX;

        for quantity in 1..=120 {
            let quote = calculator.calculate(&product, quantity, Some("pro"))?;
            let unit = quote.unit_price.to_minor_units();

            assert!(unit <= previous_unit, "unit price rose at quantity {quantity}");
            previous_unit = unit;
        }

        Ok(())
    }

    #[test]
    fn total_never_decreases_within_a_tier() -> TestResult {
        let fabrics = fabrics()?;
        let calculator = PricingCalculator::new(&fabrics);
        let product = jersey()?;

        let mut previous: Option<(u32, i64)> = None;

        for quantity in 1..=120 {
            let quote = calculator.calculate(&product, quantity, None)?;
            let current = (quote.tier.min_quantity(), quote.total_price.to_minor_units());

            if let Some((tier, total)) = previous
                && tier == current.0
            {
                assert!(current.1 >= total, "total fell at quantity {quantity}");
            }

            previous = Some(current);
        }

        Ok(())
    }

    #[test]
    fn identical_inputs_give_identical_quotes() -> TestResult {
        let fabrics = fabrics()?;
        let calculator = PricingCalculator::new(&fabrics);
        let product = jersey()?;

        assert_eq!(
            calculator.calculate(&product, 27, Some("pro"))?,
            calculator.calculate(&product, 27, Some("pro"))?
        );

        Ok(())
    }

    #[test]
    fn response_uses_minor_units_and_null_open_end() -> TestResult {
        let fabrics = fabrics()?;
        let quote = PricingCalculator::new(&fabrics).calculate(&jersey()?, 60, None)?;
        let response = quote.to_response();

        assert_eq!(response.unit_price_cents, 600);
        assert_eq!(response.total_price_cents, 36_000);
        assert_eq!(response.tier.max_quantity, None);
        assert_eq!(response.currency, "CLP");

        let json = serde_json::to_value(&response)?;

        assert_eq!(json["tier"]["max_quantity"], serde_json::Value::Null);
        assert_eq!(json["savings_cents"], 24_000);

        Ok(())
    }
}
