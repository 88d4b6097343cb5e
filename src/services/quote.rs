//! Quote service.

use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{
    pricing::{
        bundles::{BundleSelection, BundledQuote, apply_bundle},
        calculator::{PricingRequest, quote},
    },
    refresh::{LatestWins, ViewState},
    services::ServiceError,
    store::PricingStore,
};

/// Everything the quote depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteInput {
    /// Product, quantity and fabric
    pub request: PricingRequest,

    /// Active bundle
    pub bundle: BundleSelection,
}

/// Prices the current selection as quantity, fabric or bundle change.
pub struct QuoteService {
    pricing: Arc<dyn PricingStore>,
    view: LatestWins<BundledQuote<'static>>,
}

impl fmt::Debug for QuoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteService")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl QuoteService {
    /// Create a service.
    pub fn new(pricing: Arc<dyn PricingStore>) -> Self {
        Self {
            pricing,
            view: LatestWins::new(),
        }
    }

    /// Fetch the catalog and price `input` without publishing.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Store`]: the catalog could not be fetched.
    /// - [`ServiceError::Pricing`]: the request could not be priced.
    /// - [`ServiceError::Bundle`]: the active bundle does not apply to the product.
    pub async fn load(&self, input: &QuoteInput) -> Result<BundledQuote<'static>, ServiceError> {
        let catalog = self.pricing.catalog().await?;
        let priced = quote(&catalog, &input.request)?;
        let bundle = input.bundle.resolve(catalog.bundles());

        Ok(apply_bundle(priced, bundle)?)
    }

    /// Re-price `input` and publish the result unless a newer input was priced meanwhile.
    pub async fn refresh(&self, input: &QuoteInput) -> ViewState<BundledQuote<'static>> {
        let ticket = self.view.begin();

        debug!(
            product = %input.request.product_id,
            quantity = input.request.quantity,
            ticket = ticket.id(),
            "refreshing quote"
        );

        let outcome = self.load(input).await;

        if let Err(err) = &outcome {
            warn!(product = %input.request.product_id, error = %err, "quote refresh failed");
        }

        self.view.complete(ticket, outcome);
        self.view.snapshot()
    }

    /// Last published quote.
    pub fn view(&self) -> ViewState<BundledQuote<'static>> {
        self.view.snapshot()
    }
}
