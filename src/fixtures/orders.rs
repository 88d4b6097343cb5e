//! Order Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::roster::records::{
    ApparelSelection, DesignRequestMember, OrderItemRecord, PaymentContribution, PlayerSubmission,
};

/// Orders file
#[derive(Debug, Default, Deserialize)]
pub struct OrdersFixture {
    /// Confirmed order lines across all orders
    #[serde(default)]
    pub order_items: Vec<OrderItemRecord>,

    /// Player submissions across all orders
    #[serde(default)]
    pub player_submissions: Vec<PlayerSubmission>,

    /// Payment contributions across all orders
    #[serde(default)]
    pub contributions: Vec<PaymentContribution>,

    /// Design requests by id
    #[serde(default)]
    pub design_requests: FxHashMap<String, DesignRequestFixture>,
}

/// Design request entry
#[derive(Debug, Default, Deserialize)]
pub struct DesignRequestFixture {
    /// Roster rows
    #[serde(default)]
    pub members: Vec<DesignRequestMember>,

    /// Selected garments
    #[serde(default)]
    pub selections: Vec<ApparelSelection>,
}

impl OrdersFixture {
    /// Lines of one order, in file order.
    pub fn items_for(&self, order_id: &str) -> Vec<OrderItemRecord> {
        self.order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Submissions for one order.
    pub fn submissions_for(&self, order_id: &str) -> Vec<PlayerSubmission> {
        self.player_submissions
            .iter()
            .filter(|submission| submission.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Contributions for one order.
    pub fn contributions_for(&self, order_id: &str) -> Vec<PaymentContribution> {
        self.contributions
            .iter()
            .filter(|contribution| contribution.order_id == order_id)
            .cloned()
            .collect()
    }
}
