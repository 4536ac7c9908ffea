//! Catalog view-model: the product list for the current gender.
//!
//! A refresh is split into `begin`/`finish` halves around the gateway
//! call. Every `begin` bumps a sequence number and the returned ticket
//! captures it; a `finish` whose ticket no longer matches the latest
//! sequence is discarded. That is the whole stale-response defense: if
//! the user switches gender while a fetch is in flight, the superseded
//! response can never overwrite the newer catalog, regardless of
//! network arrival order.

use tracing::{debug, warn};

use fitroom_core::{Gender, Product};

use crate::gateway::GatewayError;

/// Ticket identifying one outstanding catalog refresh.
#[derive(Debug, Clone, Copy)]
#[must_use = "a refresh ticket must be passed back to finish_refresh"]
pub struct RefreshTicket {
    seq: u64,
    gender: Gender,
}

impl RefreshTicket {
    /// The gender this refresh was issued for.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }
}

/// Product list scoped to the most recently requested gender.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    last_error: Option<String>,
    seq: u64,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh for `gender`, superseding any refresh still in
    /// flight for a previous gender.
    pub fn begin_refresh(&mut self, gender: Gender) -> RefreshTicket {
        self.seq += 1;
        RefreshTicket {
            seq: self.seq,
            gender,
        }
    }

    /// Apply the outcome of a refresh.
    ///
    /// Only the most recently issued ticket may mutate state; stale
    /// completions (success or failure) are dropped. A failed current
    /// refresh keeps the previous product list in place - a failure must
    /// never silently empty an already-populated catalog - and records
    /// the failure for observability.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Product>, GatewayError>,
    ) {
        if ticket.seq != self.seq {
            debug!(
                gender = %ticket.gender,
                "discarding superseded catalog refresh"
            );
            return;
        }

        match result {
            Ok(products) => {
                debug!(gender = %ticket.gender, count = products.len(), "catalog replaced");
                self.products = products;
                self.last_error = None;
            }
            Err(err) => {
                warn!(gender = %ticket.gender, error = %err, "catalog refresh failed; keeping previous products");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// The current product list (possibly stale if the last refresh
    /// failed).
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The failure message from the last refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
