//! Cart line types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One line of the shopping cart: a product and its quantity.
///
/// The cart holds at most one line per distinct product id; adding an
/// already-present product increments the quantity server-side. The
/// client never computes cart contents from deltas - the full cart is
/// wholesale-replaced by whatever the service returns after each
/// mutation, so client and server cannot diverge silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Positive quantity, as reported by the service.
    pub quantity: u32,
}
