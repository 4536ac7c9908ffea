//! Fitroom Core - Shared domain types.
//!
//! This crate provides the types used across all Fitroom components:
//! - `client` - State-synchronization library talking to the try-on service
//! - `cli` - Command-line client binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The
//! remote try-on service is the source of truth for catalog and cart
//! contents; these types model its data, they never compute it.
//!
//! # Modules
//!
//! - [`types`] - Product ids, gender filter, prices, products, cart
//!   lines, and photo inputs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
