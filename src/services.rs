//! Services
//!
//! Fetch, compute and publish. Each service runs the full pipeline on every refresh and publishes
//! through a [`LatestWins`](crate::refresh::LatestWins) slot, so a slow response can never replace
//! a newer one.

use thiserror::Error;

use crate::{
    breakdown::BreakdownError, pricing::PricingError, pricing::bundles::BundleError,
    store::StoreError,
};

pub mod breakdown;
pub mod quote;

pub use breakdown::{BreakdownRequest, BreakdownService, BreakdownView};
pub use quote::{QuoteInput, QuoteService};

/// Errors that can occur while refreshing a view.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Fetching inputs failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Pricing failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The active bundle could not be applied.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Aggregation failed.
    #[error(transparent)]
    Breakdown(#[from] BreakdownError),
}
