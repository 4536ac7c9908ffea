//! Product listing command.
//!
//! # Usage
//!
//! ```bash
//! fitroom products --gender female
//! ```

use thiserror::Error;

use fitroom_client::{ClientConfig, ConfigError, Gateway, GatewayError, HttpGateway};
use fitroom_core::Gender;

/// Errors that can occur while listing products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The service call failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Print the catalog for a gender.
pub async fn list(gender: Gender) -> Result<(), CatalogError> {
    let config = ClientConfig::from_env()?;
    let gateway = HttpGateway::new(&config)?;

    let products = gateway.fetch_products(gender).await?;
    if products.is_empty() {
        println!("No products for {gender}.");
        return Ok(());
    }

    for product in &products {
        println!(
            "{:>4}  {:<24} {:>10}  {}",
            product.id, product.name, product.price, product.gender
        );
    }
    Ok(())
}
