//! Refresh
//!
//! Results of pricing and roster fetches can arrive out of order. Every fetch takes a ticket
//! before it starts and only the most recently issued ticket may publish. Published values are
//! whole snapshots: a refresh replaces the previous value, it never edits it.

use std::{
    fmt,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::debug;

/// Identity of one fetch, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Issue number.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Where the view is in its fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing requested yet
    #[default]
    Idle,

    /// A fetch is in flight
    Loading,

    /// The latest fetch succeeded
    Ready,

    /// The latest fetch failed; the previous value, if any, is still shown
    Failed(String),
}

/// A consistent view of the latest published value.
#[derive(Debug)]
pub struct ViewState<T> {
    /// Last successfully published value
    pub value: Option<Arc<T>>,

    /// Fetch status
    pub status: ViewStatus,

    /// Ticket that produced `value`
    pub published_by: Option<RequestTicket>,
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            status: self.status.clone(),
            published_by: self.published_by,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            value: None,
            status: ViewStatus::Idle,
            published_by: None,
        }
    }
}

/// Last-write-wins publication slot.
#[derive(Debug)]
pub struct LatestWins<T> {
    issued: AtomicU64,
    state: RwLock<ViewState<T>>,
}

impl<T> Default for LatestWins<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            state: RwLock::new(ViewState::default()),
        }
    }
}

impl<T> LatestWins<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch and mark the view as loading.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let ticket = RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if self.is_latest(ticket) {
            state.status = ViewStatus::Loading;
        }

        ticket
    }

    /// Most recently issued ticket.
    pub fn latest(&self) -> Option<RequestTicket> {
        match self.issued.load(Ordering::SeqCst) {
            0 => None,
            issued => Some(RequestTicket(issued)),
        }
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish the outcome of the fetch holding `ticket`.
    ///
    /// Stale tickets are ignored. A failure keeps the previous value and records the error.
    /// Returns whether the outcome was applied.
    pub fn complete<E>(&self, ticket: RequestTicket, outcome: Result<T, E>) -> bool
    where
        E: fmt::Display,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if !self.is_latest(ticket) {
            debug!(ticket = ticket.0, "discarding stale result");

            return false;
        }

        match outcome {
            Ok(value) => {
                state.value = Some(Arc::new(value));
                state.status = ViewStatus::Ready;
                state.published_by = Some(ticket);
            }
            Err(err) => {
                state.status = ViewStatus::Failed(err.to_string());
            }
        }

        true
    }

    /// Current view.
    pub fn snapshot(&self) -> ViewState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current value.
    pub fn value(&self) -> Option<Arc<T>> {
        self.snapshot().value
    }
}
