//! Remote gateway to the try-on service.
//!
//! # Architecture
//!
//! - The service is the source of truth - NO local sync, direct API calls
//! - [`Gateway`] is the seam between orchestration logic and the network,
//!   so view-models and the session can be exercised against an
//!   in-memory implementation in tests
//! - [`HttpGateway`] is the production implementation over `reqwest`
//! - No automatic retries anywhere; every failure is a terminal outcome
//!   for that call, and retrying is a new user-initiated request
//!
//! # Example
//!
//! ```rust,ignore
//! use fitroom_client::{ClientConfig, Gateway, HttpGateway};
//! use fitroom_core::Gender;
//!
//! let gateway = HttpGateway::new(&config)?;
//! let products = gateway.fetch_products(Gender::Female).await?;
//! let cart = gateway.add_to_cart(products[0].id, 1).await?;
//! ```

mod http;
mod wire;

pub use http::HttpGateway;

use async_trait::async_trait;
use thiserror::Error;

use fitroom_core::{CartLine, Gender, PhotoInput, Product, ProductId};

/// Errors that can occur when calling the try-on service.
///
/// `Http` and `Status` are transport-level failures; `Service` means
/// the transport succeeded but the service reported a semantic error
/// (for example, try-on generation failed). The two must stay
/// distinguishable: a `Service` failure carries a user-facing message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status code.
    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport succeeded but the service reported an error payload.
    #[error("service error: {0}")]
    Service(String),

    /// Response was transport- and schema-successful but missing the
    /// data the contract promises.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Asynchronous boundary to the remote catalog/cart/try-on service.
///
/// All operations may suspend and may fail; callers apply results to
/// visible state only after checking their currency tokens, never
/// inside the gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch the product list for a gender.
    ///
    /// Result order is whatever the service returns; it is not assumed
    /// stable or sorted. Rows with values outside the closed gender
    /// enumeration are dropped defensively.
    async fn fetch_products(&self, gender: Gender) -> Result<Vec<Product>, GatewayError>;

    /// Read the current authoritative cart.
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, GatewayError>;

    /// Submit a try-on request and return the generated image reference.
    ///
    /// A transport-successful response carrying an error payload maps to
    /// [`GatewayError::Service`].
    async fn submit_try_on(
        &self,
        photo: &PhotoInput,
        product_id: ProductId,
        gender: Gender,
    ) -> Result<String, GatewayError>;

    /// Add a product to the cart; returns the new authoritative cart.
    ///
    /// The mutation is entirely server-side; the returned list replaces
    /// the local cart wholesale.
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Vec<CartLine>, GatewayError>;

    /// Clear the cart. Idempotent and total: on success the caller
    /// treats the cart as empty without a second read.
    async fn clear_cart(&self) -> Result<(), GatewayError>;
}
