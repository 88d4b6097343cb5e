//! Breakdown service.

use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    breakdown::{AggregationMode, ProductSizeBreakdown, aggregate},
    refresh::{LatestWins, ViewState},
    roster::{JerseyDisplay, RosterMember, RosterSource, normalize, sort_for_display},
    services::ServiceError,
    store::{OrderStore, PricingStore},
};

/// Which roster to break down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakdownRequest {
    /// A confirmed team order
    Order(String),

    /// A design request roster
    DesignRequest(String),
}

impl fmt::Display for BreakdownRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakdownRequest::Order(id) => write!(f, "order {id}"),
            BreakdownRequest::DesignRequest(id) => write!(f, "design request {id}"),
        }
    }
}

/// A computed roster view.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownView {
    /// What was broken down
    pub request: BreakdownRequest,

    /// Roster in display order
    pub members: Vec<RosterMember>,

    /// Per-product size breakdowns
    pub breakdowns: Vec<ProductSizeBreakdown<'static>>,
}

/// Builds size breakdowns from the order store.
pub struct BreakdownService {
    orders: Arc<dyn OrderStore>,
    pricing: Arc<dyn PricingStore>,
    display: JerseyDisplay,
    view: LatestWins<BreakdownView>,
}

impl fmt::Debug for BreakdownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakdownService")
            .field("display", &self.display)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl BreakdownService {
    /// Create a service.
    pub fn new(
        orders: Arc<dyn OrderStore>,
        pricing: Arc<dyn PricingStore>,
        display: JerseyDisplay,
    ) -> Self {
        Self {
            orders,
            pricing,
            display,
            view: LatestWins::new(),
        }
    }

    /// Fetch and compute a breakdown without publishing it.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Store`]: a fetch failed.
    /// - [`ServiceError::Breakdown`]: aggregation overflowed.
    pub async fn load(&self, request: &BreakdownRequest) -> Result<BreakdownView, ServiceError> {
        match request {
            BreakdownRequest::Order(order_id) => {
                let (catalog, items, submissions, contributions) = tokio::try_join!(
                    self.pricing.catalog(),
                    self.orders.order_items(order_id),
                    self.orders.player_submissions(order_id),
                    self.orders.contributions(order_id),
                )?;

                let source = RosterSource::Order {
                    items: &items,
                    submissions: &submissions,
                    contributions: &contributions,
                };

                let mut members = normalize(source, &self.display);
                let breakdowns = aggregate(&catalog, &members, AggregationMode::Order)?;

                sort_for_display(&mut members);

                Ok(BreakdownView {
                    request: request.clone(),
                    members,
                    breakdowns,
                })
            }
            BreakdownRequest::DesignRequest(request_id) => {
                let (catalog, rows, selections) = tokio::try_join!(
                    self.pricing.catalog(),
                    self.orders.design_request_members(request_id),
                    self.orders.apparel_selections(request_id),
                )?;

                let source = RosterSource::DesignRequest { members: &rows };

                let mut members = normalize(source, &self.display);
                let breakdowns =
                    aggregate(&catalog, &members, AggregationMode::DesignRequest(&selections))?;

                sort_for_display(&mut members);

                Ok(BreakdownView {
                    request: request.clone(),
                    members,
                    breakdowns,
                })
            }
        }
    }

    /// Recompute the breakdown and publish it if no newer refresh has started meanwhile.
    ///
    /// A failed refresh keeps the previously published breakdown.
    pub async fn refresh(&self, request: &BreakdownRequest) -> ViewState<BreakdownView> {
        let ticket = self.view.begin();

        debug!(%request, ticket = ticket.id(), "refreshing breakdown");

        let outcome = self.load(request).await;

        match &outcome {
            Ok(view) => info!(
                %request,
                members = view.members.len(),
                products = view.breakdowns.len(),
                "breakdown ready"
            ),
            Err(err) => warn!(%request, error = %err, "breakdown refresh failed"),
        }

        self.view.complete(ticket, outcome);
        self.view.snapshot()
    }

    /// Last published view.
    pub fn view(&self) -> ViewState<BreakdownView> {
        self.view.snapshot()
    }
}
