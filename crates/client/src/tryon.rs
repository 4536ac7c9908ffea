//! Try-on orchestrator: lifecycle of the single tracked try-on request.
//!
//! State machine: `Idle -> Pending -> Succeeded | Failed`, with an
//! `invalidate` edge from every state back to `Idle`. Submission takes
//! the photo the request was built from; the session rejects the intent
//! before any network call when no photo is uploaded. A new
//! submission while a previous one is pending is allowed (no queueing,
//! no blocking) - but only the most recently submitted request's
//! outcome may reach visible state. Requests are never cancelled at the
//! transport level; their results are filtered by a sequence-number
//! currency check when they complete. Invalidation (photo replaced,
//! gender changed) clears the preview immediately and bumps the
//! sequence so any in-flight completion is dropped on arrival.

use tracing::debug;

use fitroom_core::{Gender, PhotoInput, ProductId};

use crate::gateway::GatewayError;

/// The inputs that defined a try-on request at submission time.
///
/// Carries the photo's filename rather than its bytes; the snapshot
/// stays cheap to clone and the machine never owns the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnRequest {
    /// Product the preview was requested for.
    pub product_id: ProductId,
    /// Gender filter active at submission.
    pub gender: Gender,
    /// Filename of the photo used.
    pub photo_name: String,
}

/// Visible try-on state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TryOnState {
    /// No request submitted, or the last one was invalidated.
    #[default]
    Idle,
    /// A request is in flight.
    Pending { request: TryOnRequest },
    /// The most recent request produced a preview image.
    Succeeded {
        request: TryOnRequest,
        image_ref: String,
    },
    /// The most recent request failed; `reason` is user-facing.
    Failed { request: TryOnRequest, reason: String },
}

/// Validation errors raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryOnError {
    /// Try-on was requested without an uploaded photo.
    #[error("upload a photo before requesting a try-on")]
    PhotoMissing,
}

/// Ticket identifying one submitted try-on request.
#[derive(Debug, Clone, Copy)]
#[must_use = "a try-on ticket must be passed back to finish"]
pub struct TryOnTicket {
    seq: u64,
}

/// The try-on state machine.
///
/// Tracks exactly one request as "current" at a time; the sequence
/// number is the sole concurrency-control primitive.
#[derive(Debug, Default)]
pub struct TryOn {
    state: TryOnState,
    seq: u64,
}

impl TryOn {
    /// Create the machine in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a try-on request, superseding any request still in
    /// flight.
    pub fn submit(
        &mut self,
        photo: &PhotoInput,
        product_id: ProductId,
        gender: Gender,
    ) -> TryOnTicket {
        self.seq += 1;
        self.state = TryOnState::Pending {
            request: TryOnRequest {
                product_id,
                gender,
                photo_name: photo.filename().to_string(),
            },
        };
        debug!(product_id = %product_id, gender = %gender, "try-on submitted");
        TryOnTicket { seq: self.seq }
    }

    /// Apply the outcome of a submitted request.
    ///
    /// Only the most recently submitted request may transition the
    /// machine; outcomes of superseded or invalidated requests - success
    /// and failure alike - are discarded.
    pub fn finish(&mut self, ticket: TryOnTicket, outcome: Result<String, GatewayError>) {
        if ticket.seq != self.seq {
            debug!("discarding outcome of superseded try-on request");
            return;
        }

        let TryOnState::Pending { request } = &self.state else {
            // A matching sequence implies Pending; anything else means
            // the ticket was already consumed.
            return;
        };
        let request = request.clone();

        self.state = match outcome {
            Ok(image_ref) => TryOnState::Succeeded { request, image_ref },
            Err(err) => TryOnState::Failed {
                request,
                reason: err.to_string(),
            },
        };
    }

    /// Force the machine back to `Idle` because a defining input (photo
    /// or gender) changed.
    ///
    /// Total over all states. Clears the visible preview immediately and
    /// ensures a later-arriving result for the invalidated request is
    /// dropped by the currency check.
    pub fn invalidate(&mut self) {
        self.seq += 1;
        self.state = TryOnState::Idle;
    }

    /// Current visible state.
    #[must_use]
    pub const fn state(&self) -> &TryOnState {
        &self.state
    }

    /// Whether a request for this specific product is pending.
    ///
    /// Drives the per-product busy indicator; purely a display concern
    /// on top of the machine.
    #[must_use]
    pub fn is_trying_on(&self, product_id: ProductId) -> bool {
        matches!(&self.state, TryOnState::Pending { request } if request.product_id == product_id)
    }
}
