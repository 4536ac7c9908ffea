//! Catalog product types.

use serde::{Deserialize, Serialize};

use super::gender::Gender;
use super::id::ProductId;
use super::price::Price;

/// A product in the catalog.
///
/// Immutable once fetched; the catalog as a whole is wholesale-replaced
/// on every refresh rather than merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque, stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Non-negative, currency-agnostic price.
    pub price: Price,
    /// Gender category the product belongs to.
    pub gender: Gender,
    /// Server-side image reference for the product thumbnail.
    pub image_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_deserializes_from_service_shape() {
        let json = r#"{
            "id": 1,
            "name": "Red Dress",
            "image_name": "dress1.png",
            "price": 1999.0,
            "gender": "female"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Red Dress");
        assert_eq!(product.gender, Gender::Female);
        assert_eq!(product.price.amount(), Decimal::new(1999, 0));
    }
}
