//! Cart view-model: the authoritative cart contents.
//!
//! The service is the sole source of truth. Every mutation wholesale-
//! replaces the local cart with whatever the service returned; nothing
//! is ever computed client-side from deltas, so quantity and pricing
//! rules enforced server-side stay authoritative. Mutations are
//! serialized: at most one may be outstanding, which closes the window
//! where two in-flight replaces could land out of order. Non-mutating
//! reads carry a currency token instead; a read that resolves after a
//! newer read or a mutation has begun is discarded.

use tracing::{debug, warn};

use fitroom_core::CartLine;

use crate::gateway::GatewayError;

/// A cart mutation was requested while another is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a cart operation is already in progress")]
pub struct CartBusy;

/// Ticket for the single outstanding cart mutation.
///
/// Not `Copy` and consumed by the `finish_*` methods, so a mutation can
/// only be completed once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a cart ticket must be passed back to a finish method"]
pub struct CartTicket {
    _private: (),
}

/// Currency token for a non-mutating cart read.
#[derive(Debug, Clone, Copy)]
#[must_use = "a read ticket must be passed back to finish_fetch"]
pub struct CartReadTicket {
    seq: u64,
}

/// Local mirror of the server-side cart.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    pending: bool,
    last_error: Option<String>,
    seq: u64,
}

impl Cart {
    /// Create an empty cart mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a mutating call (`add` or `clear`).
    ///
    /// # Errors
    ///
    /// Returns [`CartBusy`] while another mutation is outstanding.
    pub fn begin_mutation(&mut self) -> Result<CartTicket, CartBusy> {
        if self.pending {
            return Err(CartBusy);
        }
        self.pending = true;
        // Mutations supersede any read still in flight.
        self.seq += 1;
        Ok(CartTicket { _private: () })
    }

    /// Complete a mutation that returns the new authoritative cart.
    ///
    /// On success the cart is wholesale-replaced; on failure the
    /// previous cart is left unchanged and the failure recorded.
    pub fn finish_replace(
        &mut self,
        _ticket: CartTicket,
        result: Result<Vec<CartLine>, GatewayError>,
    ) {
        self.pending = false;
        match result {
            Ok(lines) => {
                debug!(count = lines.len(), "cart replaced from server");
                self.lines = lines;
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "cart mutation failed; keeping previous cart");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Complete a `clear` mutation.
    ///
    /// Clearing is idempotent and total, so on success the cart is
    /// treated as empty without a second read.
    pub fn finish_clear(&mut self, _ticket: CartTicket, result: Result<(), GatewayError>) {
        self.pending = false;
        match result {
            Ok(()) => {
                self.lines.clear();
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "cart clear failed; keeping previous cart");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Start a non-mutating cart read.
    pub fn begin_fetch(&mut self) -> CartReadTicket {
        self.seq += 1;
        CartReadTicket { seq: self.seq }
    }

    /// Apply the outcome of a read started with [`Self::begin_fetch`].
    ///
    /// The outcome is discarded when a newer read or a mutation has
    /// begun since, so a slow read can never overwrite fresher server
    /// truth. On failure the previous contents are kept, like any other
    /// cart failure.
    pub fn finish_fetch(
        &mut self,
        ticket: CartReadTicket,
        result: Result<Vec<CartLine>, GatewayError>,
    ) {
        if ticket.seq != self.seq {
            debug!("discarding superseded cart read");
            return;
        }
        match result {
            Ok(lines) => {
                self.lines = lines;
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "cart fetch failed; keeping previous cart");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// The current cart lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether a mutation is in flight (for a transient busy marker).
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The failure message from the last cart call, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitroom_core::ProductId;

    fn line(id: i32, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            quantity,
        }
    }

    #[test]
    fn test_mutations_are_serialized() {
        let mut cart = Cart::new();

        let ticket = cart.begin_mutation().expect("first mutation starts");
        assert!(cart.is_pending());
        assert_eq!(cart.begin_mutation(), Err(CartBusy));

        cart.finish_replace(ticket, Ok(vec![line(1, 1)]));
        assert!(!cart.is_pending());
        assert!(cart.begin_mutation().is_ok());
    }

    #[test]
    fn test_add_reflects_server_truth_exactly() {
        let mut cart = Cart::new();

        // Adding the same product twice: the server returns the merged
        // line; the client never computes the increment itself.
        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_replace(ticket, Ok(vec![line(1, 1)]));

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_replace(ticket, Ok(vec![line(1, 2)]));

        assert_eq!(cart.lines(), &[line(1, 2)]);
    }

    #[test]
    fn test_failed_mutation_keeps_previous_cart() {
        let mut cart = Cart::new();

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_replace(ticket, Ok(vec![line(1, 1)]));

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_replace(ticket, Err(GatewayError::Service("nope".to_string())));

        assert_eq!(cart.lines(), &[line(1, 1)]);
        assert_eq!(cart.last_error(), Some("service error: nope"));
        assert!(!cart.is_pending());
    }

    #[test]
    fn test_clear_empties_without_second_read() {
        let mut cart = Cart::new();
        let read = cart.begin_fetch();
        cart.finish_fetch(read, Ok(vec![line(1, 2), line(4, 1)]));

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_clear(ticket, Ok(()));
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_clear_on_empty_cart_is_idempotent() {
        let mut cart = Cart::new();

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_clear(ticket, Ok(()));

        assert!(cart.lines().is_empty());
        assert!(cart.last_error().is_none());
    }

    #[test]
    fn test_failed_clear_keeps_previous_cart() {
        let mut cart = Cart::new();
        let read = cart.begin_fetch();
        cart.finish_fetch(read, Ok(vec![line(2, 1)]));

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_clear(ticket, Err(GatewayError::Service("down".to_string())));

        assert_eq!(cart.lines(), &[line(2, 1)]);
        assert!(cart.last_error().is_some());
    }

    #[test]
    fn test_read_started_before_mutation_is_discarded() {
        let mut cart = Cart::new();
        let read = cart.begin_fetch();

        let ticket = cart.begin_mutation().expect("mutation starts");
        cart.finish_replace(ticket, Ok(vec![line(1, 2)]));

        // The read resolves late with pre-mutation contents; the
        // mutation's replace must stand.
        cart.finish_fetch(read, Ok(Vec::new()));
        assert_eq!(cart.lines(), &[line(1, 2)]);
    }

    #[test]
    fn test_newer_read_supersedes_older_read() {
        let mut cart = Cart::new();
        let first = cart.begin_fetch();
        let second = cart.begin_fetch();

        cart.finish_fetch(second, Ok(vec![line(1, 1)]));
        cart.finish_fetch(first, Ok(vec![line(9, 9)]));

        assert_eq!(cart.lines(), &[line(1, 1)]);
    }
}
