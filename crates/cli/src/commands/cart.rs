//! Cart management commands.
//!
//! # Usage
//!
//! ```bash
//! fitroom cart show
//! fitroom cart add --product 1 --quantity 2
//! fitroom cart clear
//! ```

use thiserror::Error;

use fitroom_client::{ClientConfig, ConfigError, Gateway, GatewayError, HttpGateway};
use fitroom_core::{CartLine, ProductId};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The service call failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

fn print_cart(lines: &[CartLine]) {
    if lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in lines {
        println!("product {:>4}  x {}", line.product_id, line.quantity);
    }
}

/// Print the current authoritative cart.
pub async fn show() -> Result<(), CartError> {
    let gateway = HttpGateway::new(&ClientConfig::from_env()?)?;
    let cart = gateway.fetch_cart().await?;
    print_cart(&cart);
    Ok(())
}

/// Add a product to the cart and print the cart the service returned.
pub async fn add(product: i32, quantity: u32) -> Result<(), CartError> {
    let gateway = HttpGateway::new(&ClientConfig::from_env()?)?;
    let cart = gateway.add_to_cart(ProductId::new(product), quantity).await?;
    print_cart(&cart);
    Ok(())
}

/// Clear the cart.
pub async fn clear() -> Result<(), CartError> {
    let gateway = HttpGateway::new(&ClientConfig::from_env()?)?;
    gateway.clear_cart().await?;
    println!("Cart cleared.");
    Ok(())
}
