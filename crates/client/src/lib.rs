//! Fitroom Client - state synchronization for the try-on shop service.
//!
//! The remote service owns the catalog, the cart, and try-on image
//! generation; this crate keeps a local snapshot of that state
//! consistent across overlapping, potentially stale asynchronous
//! operations.
//!
//! # Architecture
//!
//! - [`Gateway`] / [`HttpGateway`] - the network boundary; parsed
//!   results or typed failures, no retries
//! - [`Catalog`] - product list for the current gender, wholesale-
//!   replaced on refresh, stale responses discarded by sequence token
//! - [`Cart`] - authoritative cart mirror; every mutation replaces it
//!   with the service's response, mutations are serialized
//! - [`TryOn`] - the try-on request state machine, where the
//!   discard-if-superseded rule lives
//! - [`Session`] - composes the above, translating user intents into
//!   gateway calls and republishing one consistent [`Snapshot`]
//!
//! Currency tokens (sequence numbers) are the only concurrency-control
//! primitive; cancellation is advisory, never an abort of network I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitroom_client::{ClientConfig, HttpGateway, Session};
//! use fitroom_core::{Gender, PhotoInput, ProductId};
//!
//! let config = ClientConfig::from_env()?;
//! let session = Session::new(HttpGateway::new(&config)?);
//!
//! session.bootstrap().await;
//! session.set_photo(PhotoInput::new(photo_bytes, "me.jpg"));
//! session.try_on(ProductId::new(1)).await?;
//!
//! match &session.snapshot().try_on {
//!     TryOnState::Succeeded { image_ref, .. } => println!("{image_ref}"),
//!     _ => {}
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod gateway;
pub mod session;
pub mod tryon;

pub use cart::{Cart, CartBusy, CartReadTicket, CartTicket};
pub use catalog::{Catalog, RefreshTicket};
pub use config::{ClientConfig, ConfigError};
pub use gateway::{Gateway, GatewayError, HttpGateway};
pub use session::{Session, Snapshot};
pub use tryon::{TryOn, TryOnError, TryOnRequest, TryOnState, TryOnTicket};
