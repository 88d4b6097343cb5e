//! Stores
//!
//! Async ports to the external data the engine reads. The engine never writes back.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    designs::DesignRecord,
    roster::records::{
        ApparelSelection, DesignRequestMember, OrderItemRecord, PaymentContribution,
        PlayerSubmission,
    },
};

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record
        entity: &'static str,
        /// Requested identifier
        id: String,
    },

    /// The store could not be reached or returned unreadable data.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Team orders, their rosters and design requests.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Confirmed lines of an order.
    async fn order_items(&self, order_id: &str) -> Result<Vec<OrderItemRecord>, StoreError>;

    /// Player submissions for an order.
    async fn player_submissions(&self, order_id: &str)
    -> Result<Vec<PlayerSubmission>, StoreError>;

    /// Payment contributions for an order.
    async fn contributions(&self, order_id: &str) -> Result<Vec<PaymentContribution>, StoreError>;

    /// Roster rows of a design request.
    async fn design_request_members(
        &self,
        request_id: &str,
    ) -> Result<Vec<DesignRequestMember>, StoreError>;

    /// Garments selected for a design request.
    async fn apparel_selections(
        &self,
        request_id: &str,
    ) -> Result<Vec<ApparelSelection>, StoreError>;
}

/// Products, tiers, fabrics and bundles.
#[automock]
#[async_trait]
pub trait PricingStore: Send + Sync {
    /// Current pricing catalog.
    async fn catalog(&self) -> Result<Catalog<'static>, StoreError>;
}

/// The design catalogue.
#[automock]
#[async_trait]
pub trait DesignStore: Send + Sync {
    /// All designs.
    async fn designs(&self) -> Result<Vec<DesignRecord>, StoreError>;
}
