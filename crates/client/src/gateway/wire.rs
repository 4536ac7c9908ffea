//! Wire payloads for the try-on service API.
//!
//! These mirror the JSON the service actually sends and are converted
//! into the domain types from `fitroom-core` at the gateway boundary.
//! Defensive rules live here: rows with an unknown gender or a negative
//! price are dropped with a warning instead of poisoning the whole
//! response.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use fitroom_core::{CartLine, Gender, Price, Product, ProductId};

/// A product row as the service serializes it.
#[derive(Debug, Deserialize)]
pub(super) struct ProductPayload {
    pub id: i32,
    pub name: String,
    pub image_name: String,
    pub price: Decimal,
    pub gender: String,
}

impl ProductPayload {
    /// Convert to a domain product, or `None` if the row violates the
    /// contract (unknown gender, negative price).
    fn into_product(self) -> Option<Product> {
        let gender = match self.gender.parse::<Gender>() {
            Ok(gender) => gender,
            Err(err) => {
                warn!(product_id = self.id, error = %err, "dropping product with unknown gender");
                return None;
            }
        };
        let Some(price) = Price::new(self.price) else {
            warn!(product_id = self.id, price = %self.price, "dropping product with negative price");
            return None;
        };
        Some(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            gender,
            image_name: self.image_name,
        })
    }
}

/// Convert a product listing, silently dropping contract-violating rows.
pub(super) fn convert_products(payloads: Vec<ProductPayload>) -> Vec<Product> {
    payloads
        .into_iter()
        .filter_map(ProductPayload::into_product)
        .collect()
}

/// A cart line as the service serializes it.
#[derive(Debug, Deserialize)]
pub(super) struct CartLinePayload {
    pub product_id: i32,
    pub quantity: u32,
}

pub(super) fn convert_cart(payloads: Vec<CartLinePayload>) -> Vec<CartLine> {
    payloads
        .into_iter()
        .map(|line| CartLine {
            product_id: ProductId::new(line.product_id),
            quantity: line.quantity,
        })
        .collect()
}

/// Try-on response body.
///
/// Both shapes arrive with HTTP 200: either `try_on_image_url` is set,
/// or `error` carries a user-facing message. The two are semantically
/// distinct even though the transport treats them the same.
#[derive(Debug, Deserialize)]
pub(super) struct TryOnPayload {
    pub try_on_image_url: Option<String>,
    pub error: Option<String>,
}
