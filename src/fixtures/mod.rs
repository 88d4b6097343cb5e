//! Fixtures
//!
//! YAML-backed in-memory stores. A fixture set `<name>` is read from
//! `catalog/<name>.yml`, `orders/<name>.yml` and `designs/<name>.yml` under the base path.

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    designs::DesignRecord,
    fixtures::{catalog::CatalogFixture, designs::DesignsFixture, orders::OrdersFixture},
    pricing::ConfigError,
    roster::records::{
        ApparelSelection, DesignRequestMember, OrderItemRecord, PaymentContribution,
        PlayerSubmission,
    },
    store::{DesignStore, OrderStore, PricingStore, StoreError},
};

pub mod catalog;
pub mod designs;
pub mod orders;

pub use catalog::{parse_currency, parse_percentage, parse_price};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the catalog and a price
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The catalog tables failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No catalog loaded
    #[error("No catalog loaded")]
    NoCatalog,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Set name, used in error messages
    name: String,

    catalog: Option<Catalog<'static>>,
    orders: OrdersFixture,
    designs: Vec<DesignRecord>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            name: String::new(),
            catalog: None,
            orders: OrdersFixture::default(),
            designs: Vec::new(),
        }
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the set's files cannot be read, parsed or validated.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::new().load_set(name)
    }

    /// Load a complete fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if any of the set's files cannot be read, parsed or validated.
    pub fn load_set(mut self, name: &str) -> Result<Self, FixtureError> {
        self.load_catalog(name)?;
        self.load_orders(name)?;
        self.load_designs(name)?;

        Ok(self)
    }

    /// Load and validate `catalog/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the catalog is invalid.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogFixture = self.read("catalog", name)?;

        self.catalog = Some(fixture.try_into_catalog()?);
        self.name = name.to_string();

        Ok(self)
    }

    /// Load `orders/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.orders = self.read("orders", name)?;

        Ok(self)
    }

    /// Load `designs/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_designs(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: DesignsFixture = self.read("designs", name)?;

        self.designs = fixture.designs;

        Ok(self)
    }

    /// Loaded catalog
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] before [`Fixture::load_catalog`].
    pub fn catalog(&self) -> Result<&Catalog<'static>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Loaded orders
    pub fn orders(&self) -> &OrdersFixture {
        &self.orders
    }

    /// Loaded designs
    pub fn designs(&self) -> &[DesignRecord] {
        &self.designs
    }

    fn read<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "loading fixture");

        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

#[async_trait]
impl OrderStore for Fixture {
    async fn order_items(&self, order_id: &str) -> Result<Vec<OrderItemRecord>, StoreError> {
        let items = self.orders.items_for(order_id);

        if items.is_empty() {
            return Err(StoreError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            });
        }

        Ok(items)
    }

    async fn player_submissions(
        &self,
        order_id: &str,
    ) -> Result<Vec<PlayerSubmission>, StoreError> {
        Ok(self.orders.submissions_for(order_id))
    }

    async fn contributions(&self, order_id: &str) -> Result<Vec<PaymentContribution>, StoreError> {
        Ok(self.orders.contributions_for(order_id))
    }

    async fn design_request_members(
        &self,
        request_id: &str,
    ) -> Result<Vec<DesignRequestMember>, StoreError> {
        self.orders
            .design_requests
            .get(request_id)
            .map(|request| request.members.clone())
            .ok_or_else(|| StoreError::NotFound {
                entity: "design request",
                id: request_id.to_string(),
            })
    }

    async fn apparel_selections(
        &self,
        request_id: &str,
    ) -> Result<Vec<ApparelSelection>, StoreError> {
        self.orders
            .design_requests
            .get(request_id)
            .map(|request| request.selections.clone())
            .ok_or_else(|| StoreError::NotFound {
                entity: "design request",
                id: request_id.to_string(),
            })
    }
}

#[async_trait]
impl PricingStore for Fixture {
    async fn catalog(&self) -> Result<Catalog<'static>, StoreError> {
        self.catalog.clone().ok_or_else(|| StoreError::NotFound {
            entity: "catalog",
            id: self.name.clone(),
        })
    }
}

#[async_trait]
impl DesignStore for Fixture {
    async fn designs(&self) -> Result<Vec<DesignRecord>, StoreError> {
        Ok(self.designs.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write(dir: &TempDir, kind: &str, contents: &str) -> TestResult {
        fs::create_dir_all(dir.path().join(kind))?;
        fs::write(dir.path().join(kind).join("club.yml"), contents)?;

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() -> TestResult {
        let dir = TempDir::new()?;
        let result = Fixture::with_base_path(dir.path()).load_set("club");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() -> TestResult {
        let dir = TempDir::new()?;

        write(&dir, "catalog", "products: [")?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("club");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }

    #[test]
    fn catalog_is_required_before_use() {
        assert!(matches!(Fixture::new().catalog(), Err(FixtureError::NoCatalog)));
    }

    #[tokio::test]
    async fn fixture_serves_orders_by_id() -> TestResult {
        let dir = TempDir::new()?;

        write(
            &dir,
            "orders",
            r#"
order_items:
  - { id: i1, order_id: o1, product_id: jersey, unit_price: 12000 }
  - { id: i2, order_id: o2, product_id: jersey, unit_price: 12000 }
contributions:
  - { order_id: o1, payer_id: i1, amount: 12000, status: completed }
design_requests:
  dr1:
    members:
      - { member_id: m1, size: M }
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_orders("club")?;

        assert_eq!(fixture.order_items("o1").await?.len(), 1);
        assert_eq!(fixture.contributions("o1").await?.len(), 1);
        assert!(fixture.contributions("o2").await?.is_empty());
        assert_eq!(fixture.design_request_members("dr1").await?.len(), 1);
        assert!(fixture.apparel_selections("dr1").await?.is_empty());

        assert_eq!(
            fixture.order_items("o9").await,
            Err(StoreError::NotFound {
                entity: "order",
                id: "o9".to_string(),
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn pricing_store_reports_missing_catalog() {
        let result = PricingStore::catalog(&Fixture::new()).await;

        assert!(matches!(result, Err(StoreError::NotFound { entity: "catalog", .. })));
    }
}
