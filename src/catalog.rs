//! Catalog
//!
//! Products, fabrics and bundles for one pricing context, read-only once built.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;

use crate::{
    pricing::{ConfigError, bundles::Bundle, fabrics::FabricTable},
    products::{Product, ProductKey},
};

/// Read access to the tables a price calculation needs.
pub trait PricingSource<'a> {
    /// Look up a product by its external id.
    fn product(&self, id: &str) -> Option<&Product<'a>>;

    /// The fabric options.
    fn fabrics(&self) -> &FabricTable<'a>;
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    currency: &'a Currency,
    products: SlotMap<ProductKey, Product<'a>>,
    product_keys: FxHashMap<String, ProductKey>,
    fabrics: FabricTable<'a>,
    bundles: Vec<Bundle>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog in `currency`.
    pub fn new(currency: &'a Currency, fabrics: FabricTable<'a>) -> Self {
        Self {
            currency,
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            fabrics,
            bundles: Vec::new(),
        }
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateProduct`]: the id is already present.
    /// - [`ConfigError::ProductCurrencyMismatch`]: the product or its tiers use another currency.
    pub fn insert_product(&mut self, product: Product<'a>) -> Result<ProductKey, ConfigError> {
        if self.product_keys.contains_key(&product.id) {
            return Err(ConfigError::DuplicateProduct(product.id));
        }

        let foreign_currency = product.base_price.currency() != self.currency
            || product
                .tiers()
                .iter()
                .any(|tier| tier.price_per_unit().currency() != self.currency);

        if foreign_currency {
            return Err(ConfigError::ProductCurrencyMismatch(product.id));
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.product_keys.insert(id, key);

        Ok(key)
    }

    /// Add a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateBundle`] if the id is already present.
    pub fn insert_bundle(&mut self, bundle: Bundle) -> Result<(), ConfigError> {
        if self.bundle(bundle.id()).is_some() {
            return Err(ConfigError::DuplicateBundle(bundle.id().to_string()));
        }

        self.bundles.push(bundle);

        Ok(())
    }

    /// Catalog currency.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Look up a product by its generated key.
    pub fn product_by_key(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Iterate over all products.
    pub fn products(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.values()
    }

    /// Fabric options.
    pub fn fabric_table(&self) -> &FabricTable<'a> {
        &self.fabrics
    }

    /// Selectable bundles in configuration order.
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Look up a bundle by id.
    pub fn bundle(&self, id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|bundle| bundle.id() == id)
    }
}

impl<'a> PricingSource<'a> for Catalog<'a> {
    fn product(&self, id: &str) -> Option<&Product<'a>> {
        self.product_keys
            .get(id)
            .and_then(|key| self.products.get(*key))
    }

    fn fabrics(&self) -> &FabricTable<'a> {
        &self.fabrics
    }
}
