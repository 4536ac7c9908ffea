//! Try-on preview command.
//!
//! # Usage
//!
//! ```bash
//! fitroom try-on --photo me.jpg --product 1 --gender female --output preview.png
//! ```

use std::path::Path;

use thiserror::Error;

use fitroom_client::{
    ClientConfig, ConfigError, GatewayError, HttpGateway, Session, TryOnError, TryOnState,
};
use fitroom_core::{Gender, PhotoInput, ProductId};

/// Errors that can occur while generating a preview.
#[derive(Debug, Error)]
pub enum TryOnCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The service call failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(#[from] TryOnError),

    /// Reading the photo or writing the preview failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service reported a generation failure.
    #[error("Try-on failed: {0}")]
    Generation(String),
}

/// Submit a try-on request and save the preview image.
pub async fn run(
    photo_path: &Path,
    product: i32,
    gender: Gender,
    output: &Path,
) -> Result<(), TryOnCommandError> {
    let gateway = HttpGateway::new(&ClientConfig::from_env()?)?;
    let session = Session::new(gateway.clone());

    let bytes = tokio::fs::read(photo_path).await?;
    let filename = photo_path
        .file_name()
        .map_or_else(|| "photo.png".to_string(), |n| n.to_string_lossy().into_owned());

    session.set_gender(gender).await;
    session.set_photo(PhotoInput::new(bytes, filename));
    session.try_on(ProductId::new(product)).await?;

    match &session.snapshot().try_on {
        TryOnState::Succeeded { image_ref, .. } => {
            let preview = gateway.fetch_asset(image_ref).await?;
            tokio::fs::write(output, preview).await?;
            println!("Preview saved to {}", output.display());
            Ok(())
        }
        TryOnState::Failed { reason, .. } => Err(TryOnCommandError::Generation(reason.clone())),
        // The result was invalidated before it arrived; nothing to save.
        TryOnState::Idle | TryOnState::Pending { .. } => Err(TryOnCommandError::Generation(
            "request was superseded before completing".to_string(),
        )),
    }
}
