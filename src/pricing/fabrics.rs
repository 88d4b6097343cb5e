//! Fabric Options
//!
//! Fabric choices add a per-unit modifier on top of the tier price. One fabric is the baseline,
//! picked by name, and is used whenever the caller does not choose one.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::pricing::{ConfigError, PricingError};

/// Name of the baseline fabric when none is configured.
pub const DEFAULT_BASELINE_FABRIC: &str = "Active";

/// A selectable fabric.
#[derive(Debug, Clone, PartialEq)]
pub struct FabricOption<'a> {
    /// Fabric identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Per-unit price delta; zero or positive
    pub price_modifier: Money<'a, Currency>,

    /// Material composition, e.g. `100% polyester`
    pub composition: Option<String>,
}

impl<'a> FabricOption<'a> {
    /// Create a fabric without composition metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price_modifier: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_modifier,
            composition: None,
        }
    }

    /// Attach composition metadata.
    #[must_use]
    pub fn with_composition(mut self, composition: impl Into<String>) -> Self {
        self.composition = Some(composition.into());
        self
    }
}

/// Validated fabric options with an optional baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct FabricTable<'a> {
    fabrics: SmallVec<[FabricOption<'a>; 4]>,
    baseline: Option<usize>,
}

impl<'a> FabricTable<'a> {
    /// Build a fabric table, marking the fabric named `baseline_name` (case-insensitive) as the
    /// baseline.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateFabric`]: two fabrics share an id.
    /// - [`ConfigError::NegativeFabricModifier`]: a fabric lowers the unit price.
    /// - [`ConfigError::MultipleBaselineFabrics`]: the baseline name is ambiguous.
    pub fn new(
        fabrics: impl Into<Vec<FabricOption<'a>>>,
        baseline_name: &str,
    ) -> Result<Self, ConfigError> {
        let fabrics: SmallVec<[FabricOption<'a>; 4]> = fabrics.into().into_iter().collect();
        let mut baseline = None;

        for (idx, fabric) in fabrics.iter().enumerate() {
            if fabrics
                .iter()
                .take(idx)
                .any(|earlier| earlier.id == fabric.id)
            {
                return Err(ConfigError::DuplicateFabric(fabric.id.clone()));
            }

            if fabric.price_modifier.to_minor_units() < 0 {
                return Err(ConfigError::NegativeFabricModifier(fabric.id.clone()));
            }

            if fabric.name.trim().eq_ignore_ascii_case(baseline_name.trim()) {
                if baseline.is_some() {
                    return Err(ConfigError::MultipleBaselineFabrics(
                        baseline_name.to_string(),
                    ));
                }

                baseline = Some(idx);
            }
        }

        Ok(Self { fabrics, baseline })
    }

    /// Resolve a fabric selection, falling back to the baseline when nothing is selected.
    ///
    /// # Errors
    ///
    /// - [`PricingError::FabricNotFound`]: the id is not in the table.
    /// - [`PricingError::NoBaselineFabric`]: nothing was selected and there is no baseline.
    pub fn resolve(&self, fabric_id: Option<&str>) -> Result<&FabricOption<'a>, PricingError> {
        match fabric_id {
            Some(id) => self
                .fabrics
                .iter()
                .find(|fabric| fabric.id == id)
                .ok_or_else(|| PricingError::FabricNotFound(id.to_string())),
            None => self.baseline().ok_or(PricingError::NoBaselineFabric),
        }
    }

    /// The baseline fabric, if one matched by name.
    pub fn baseline(&self) -> Option<&FabricOption<'a>> {
        self.baseline.and_then(|idx| self.fabrics.get(idx))
    }

    /// Iterate over the fabrics in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &FabricOption<'a>> {
        self.fabrics.iter()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::CLP;
    use testresult::TestResult;

    use super::*;

    fn fabrics() -> Vec<FabricOption<'static>> {
        vec![
            FabricOption::new("active", "Active", Money::from_minor(0, CLP))
                .with_composition("100% polyester"),
            FabricOption::new("pro", "Pro Dry", Money::from_minor(2_000, CLP)),
        ]
    }

    #[test]
    fn resolve_without_selection_uses_baseline() -> TestResult {
        let table = FabricTable::new(fabrics(), DEFAULT_BASELINE_FABRIC)?;

        assert_eq!(table.resolve(None)?.id, "active");

        Ok(())
    }

    #[test]
    fn baseline_match_ignores_case() -> TestResult {
        let table = FabricTable::new(fabrics(), "pro dry")?;

        assert_eq!(table.baseline().map(|f| f.id.as_str()), Some("pro"));

        Ok(())
    }

    #[test]
    fn resolve_selected_fabric() -> TestResult {
        let table = FabricTable::new(fabrics(), DEFAULT_BASELINE_FABRIC)?;

        assert_eq!(
            table.resolve(Some("pro"))?.price_modifier,
            Money::from_minor(2_000, CLP)
        );

        Ok(())
    }

    #[test]
    fn unknown_fabric_is_an_error() -> TestResult {
        let table = FabricTable::new(fabrics(), DEFAULT_BASELINE_FABRIC)?;

        assert!(matches!(
            table.resolve(Some("silk")),
            Err(PricingError::FabricNotFound(id)) if id == "silk"
        ));

        Ok(())
    }

    #[test]
    fn missing_baseline_is_an_error_only_without_selection() -> TestResult {
        let table = FabricTable::new(fabrics(), "Cotton")?;

        assert!(matches!(
            table.resolve(None),
            Err(PricingError::NoBaselineFabric)
        ));
        assert!(table.resolve(Some("pro")).is_ok());

        Ok(())
    }

    #[test]
    fn negative_modifiers_are_rejected() {
        let result = FabricTable::new(
            vec![FabricOption::new("cheap", "Cheap", Money::from_minor(-100, CLP))],
            DEFAULT_BASELINE_FABRIC,
        );

        assert_eq!(
            result,
            Err(ConfigError::NegativeFabricModifier("cheap".to_string()))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut options = fabrics();
        options.push(FabricOption::new("pro", "Pro Dry 2", Money::from_minor(0, CLP)));

        assert_eq!(
            FabricTable::new(options, DEFAULT_BASELINE_FABRIC),
            Err(ConfigError::DuplicateFabric("pro".to_string()))
        );
    }

    #[test]
    fn ambiguous_baseline_is_rejected() {
        let mut options = fabrics();
        options.push(FabricOption::new("active-2", "active", Money::from_minor(0, CLP)));

        assert_eq!(
            FabricTable::new(options, DEFAULT_BASELINE_FABRIC),
            Err(ConfigError::MultipleBaselineFabrics("Active".to_string()))
        );
    }
}
