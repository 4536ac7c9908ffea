//! Session coordinator: the single owned source-of-truth snapshot.
//!
//! Every user intent (select gender, set photo, try on, add to cart,
//! clear cart) maps to exactly one method here; the method runs the
//! sync `begin` transition, awaits the gateway, then runs the sync
//! `finish` transition under the lock again. The lock is never held
//! across an await, so overlapping intents interleave freely and the
//! currency tokens inside the view-models decide which completions are
//! allowed to touch visible state. No component outside this one
//! mutates the snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fitroom_core::{CartLine, Gender, PhotoInput, Product, ProductId};

use crate::cart::{Cart, CartBusy};
use crate::catalog::Catalog;
use crate::gateway::Gateway;
use crate::tryon::{TryOn, TryOnError, TryOnState};

/// A consistent, owned copy of the visible application state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Currently selected gender filter.
    pub gender: Gender,
    /// Filename of the uploaded photo, if any.
    pub photo_name: Option<String>,
    /// Product list for the current gender.
    pub products: Vec<Product>,
    /// Failure message from the last catalog refresh, if it failed.
    pub catalog_error: Option<String>,
    /// Authoritative cart contents.
    pub cart: Vec<CartLine>,
    /// Whether a cart mutation is in flight.
    pub cart_pending: bool,
    /// Failure message from the last cart call, if it failed.
    pub cart_error: Option<String>,
    /// Visible try-on state.
    pub try_on: TryOnState,
}

impl Snapshot {
    /// Whether a try-on request for this product is pending (drives the
    /// per-product busy indicator).
    #[must_use]
    pub fn is_trying_on(&self, product_id: ProductId) -> bool {
        matches!(&self.try_on, TryOnState::Pending { request } if request.product_id == product_id)
    }
}

struct SessionState {
    gender: Gender,
    photo: Option<PhotoInput>,
    catalog: Catalog,
    cart: Cart,
    tryon: TryOn,
}

/// Application state coordinator.
///
/// Owns the gateway and the canonical snapshot for the lifetime of the
/// session. Methods take `&self`; internal state sits behind a mutex
/// that is only held for synchronous transitions, never across a
/// suspension point.
pub struct Session<G> {
    gateway: G,
    state: Mutex<SessionState>,
}

impl<G: Gateway> Session<G> {
    /// Create a session with the default gender filter and no photo.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(SessionState {
                gender: Gender::default(),
                photo: None,
                catalog: Catalog::new(),
                cart: Cart::new(),
                tryon: TryOn::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial load: fetch the catalog for the current gender and the
    /// current cart. Failures are absorbed into the snapshot.
    pub async fn bootstrap(&self) {
        let (gender, ticket) = {
            let mut state = self.lock();
            let gender = state.gender;
            (gender, state.catalog.begin_refresh(gender))
        };

        let result = self.gateway.fetch_products(gender).await;
        self.lock().catalog.finish_refresh(ticket, result);

        let read = self.lock().cart.begin_fetch();
        let result = self.gateway.fetch_cart().await;
        self.lock().cart.finish_fetch(read, result);
    }

    /// Select a new gender filter.
    ///
    /// Invalidates the try-on state immediately (the selection was
    /// scoped to the old catalog), then re-issues the catalog refresh
    /// and re-reads the cart. A no-op when the gender is unchanged.
    pub async fn set_gender(&self, gender: Gender) {
        let ticket = {
            let mut state = self.lock();
            if state.gender == gender {
                None
            } else {
                state.gender = gender;
                state.tryon.invalidate();
                Some(state.catalog.begin_refresh(gender))
            }
        };
        let Some(ticket) = ticket else { return };

        let result = self.gateway.fetch_products(gender).await;
        self.lock().catalog.finish_refresh(ticket, result);

        let read = self.lock().cart.begin_fetch();
        let result = self.gateway.fetch_cart().await;
        self.lock().cart.finish_fetch(read, result);
    }

    /// Replace the uploaded photo, invalidating any try-on result.
    pub fn set_photo(&self, photo: PhotoInput) {
        let mut state = self.lock();
        state.photo = Some(photo);
        state.tryon.invalidate();
    }

    /// Remove the uploaded photo, invalidating any try-on result.
    pub fn clear_photo(&self) {
        let mut state = self.lock();
        state.photo = None;
        state.tryon.invalidate();
    }

    /// Request a try-on preview for a product.
    ///
    /// # Errors
    ///
    /// Returns [`TryOnError::PhotoMissing`] when no photo has been
    /// uploaded; no network call is made in that case. Gateway failures
    /// do not error here - they transition the visible state to
    /// `Failed` with a user-facing reason.
    pub async fn try_on(&self, product_id: ProductId) -> Result<(), TryOnError> {
        let (ticket, photo, gender) = {
            let mut state = self.lock();
            let photo = state.photo.clone().ok_or(TryOnError::PhotoMissing)?;
            let gender = state.gender;
            let ticket = state.tryon.submit(&photo, product_id, gender);
            (ticket, photo, gender)
        };

        let outcome = self.gateway.submit_try_on(&photo, product_id, gender).await;
        self.lock().tryon.finish(ticket, outcome);
        Ok(())
    }

    /// Add a product to the cart.
    ///
    /// The cart is wholesale-replaced with the service's response; a
    /// failed call keeps the previous cart and records the failure.
    ///
    /// # Errors
    ///
    /// Returns [`CartBusy`] while another cart mutation is in flight.
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<(), CartBusy> {
        let ticket = self.lock().cart.begin_mutation()?;
        let result = self.gateway.add_to_cart(product_id, quantity).await;
        self.lock().cart.finish_replace(ticket, result);
        Ok(())
    }

    /// Clear the cart.
    ///
    /// On success the cart is treated as empty without a second read;
    /// clearing an already-empty cart is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartBusy`] while another cart mutation is in flight.
    pub async fn clear_cart(&self) -> Result<(), CartBusy> {
        let ticket = self.lock().cart.begin_mutation()?;
        let result = self.gateway.clear_cart().await;
        self.lock().cart.finish_clear(ticket, result);
        Ok(())
    }

    /// A consistent copy of the visible state, the single read model
    /// exposed for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            gender: state.gender,
            photo_name: state.photo.as_ref().map(|p| p.filename().to_string()),
            products: state.catalog.products().to_vec(),
            catalog_error: state.catalog.last_error().map(String::from),
            cart: state.cart.lines().to_vec(),
            cart_pending: state.cart.is_pending(),
            cart_error: state.cart.last_error().map(String::from),
            try_on: state.tryon.state().clone(),
        }
    }

    /// The gateway this session talks through.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }
}
