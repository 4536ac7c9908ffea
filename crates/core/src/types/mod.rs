//! Core types for Fitroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod gender;
pub mod id;
pub mod photo;
pub mod price;

pub use cart::CartLine;
pub use catalog::Product;
pub use gender::{Gender, GenderParseError};
pub use id::*;
pub use photo::PhotoInput;
pub use price::Price;
