//! HTTP implementation of the [`Gateway`] over `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use fitroom_core::{CartLine, Gender, PhotoInput, Product, ProductId};

use super::wire::{CartLinePayload, ProductPayload, TryOnPayload, convert_cart, convert_products};
use super::{Gateway, GatewayError};
use crate::config::ClientConfig;

/// Client for the try-on service HTTP API.
///
/// Cheaply cloneable via `Arc`; holds a single pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpGateway {
    inner: Arc<HttpGatewayInner>,
}

struct HttpGatewayInner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a new gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(HttpGatewayInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Check the status and parse the body, keeping a snippet of the raw
    /// text around for diagnostics when either step fails.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "try-on service returned non-success status"
            );
            return Err(GatewayError::Status(status));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    body = %text.chars().take(200).collect::<String>(),
                    "failed to parse try-on service response"
                );
                Err(GatewayError::Parse(err))
            }
        }
    }

    /// Fetch a static binary asset by its server-provided reference
    /// (a product `image_name` path or a try-on result URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the asset is missing.
    #[instrument(skip(self))]
    pub async fn fetch_asset(&self, reference: &str) -> Result<Vec<u8>, GatewayError> {
        let url = if reference.starts_with('/') {
            self.endpoint(reference)
        } else {
            self.endpoint(&format!("/{reference}"))
        };

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self), fields(gender = %gender))]
    async fn fetch_products(&self, gender: Gender) -> Result<Vec<Product>, GatewayError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/products"))
            .query(&[("gender", gender.as_str())])
            .send()
            .await?;

        let payloads: Vec<ProductPayload> = Self::read_json(response).await?;
        let products = convert_products(payloads);
        debug!(count = products.len(), "fetched product catalog");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, GatewayError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/cart"))
            .send()
            .await?;

        let payloads: Vec<CartLinePayload> = Self::read_json(response).await?;
        Ok(convert_cart(payloads))
    }

    #[instrument(skip(self, photo), fields(product_id = %product_id, gender = %gender))]
    async fn submit_try_on(
        &self,
        photo: &PhotoInput,
        product_id: ProductId,
        gender: Gender,
    ) -> Result<String, GatewayError> {
        let form = Form::new()
            .part(
                "person_photo",
                Part::bytes(photo.bytes().to_vec()).file_name(photo.filename().to_string()),
            )
            .text("product_id", product_id.to_string())
            .text("gender", gender.to_string());

        let response = self
            .inner
            .client
            .post(self.endpoint("/try-on"))
            .multipart(form)
            .send()
            .await?;

        let payload: TryOnPayload = Self::read_json(response).await?;

        // The service reports generation failures inside a 200 response;
        // that is a semantic failure, not a transport one.
        if let Some(message) = payload.error {
            return Err(GatewayError::Service(message));
        }
        payload.try_on_image_url.ok_or_else(|| {
            GatewayError::Malformed("try-on response missing try_on_image_url".to_string())
        })
    }

    #[instrument(skip(self), fields(product_id = %product_id, quantity))]
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Vec<CartLine>, GatewayError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/cart/add"))
            .json(&serde_json::json!({
                "product_id": product_id.as_i32(),
                "quantity": quantity,
            }))
            .send()
            .await?;

        let payloads: Vec<CartLinePayload> = Self::read_json(response).await?;
        Ok(convert_cart(payloads))
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<(), GatewayError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/cart/clear"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }
        // Acknowledgement body is ignored; clearing is idempotent and
        // total, so the caller treats the cart as empty without a read.
        Ok(())
    }
}
