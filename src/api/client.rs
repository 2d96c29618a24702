//! Inventory API client.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Method, Response};
use tracing::debug;

use crate::{
    api::{
        ApiError, RequestOptions, TokenStore,
        response::{read_empty, read_json},
    },
    entities::{Delivery, NewDelivery, Product, ProductOrder},
};

/// Remote inventory operations, one per entity and verb.
#[automock]
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /deliveries`
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, ApiError>;

    /// `GET /productOrders`
    async fn list_product_orders(&self) -> Result<Vec<ProductOrder>, ApiError>;

    /// `POST /products`
    async fn create_product(&self, product: &Product) -> Result<Product, ApiError>;

    /// `POST /deliveries`
    async fn create_delivery(&self, delivery: &NewDelivery) -> Result<Delivery, ApiError>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError>;

    /// `DELETE /deliveries/{id}`
    async fn delete_delivery(&self, delivery_id: i64) -> Result<(), ApiError>;

    /// `PUT /products/{id}` with the full replacement record.
    async fn update_product(
        &self,
        product_id: i64,
        product: &Product,
    ) -> Result<Product, ApiError>;

    /// `PUT /deliveries/{id}` with the full replacement record.
    async fn update_delivery(
        &self,
        delivery_id: i64,
        delivery: &Delivery,
    ) -> Result<Delivery, ApiError>;
}

/// Configuration for [`HttpInventoryApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `"http://localhost:8080"`.
    pub base_url: String,

    /// Bearer token source. Requests only carry the token when this is set.
    pub tokens: Option<Arc<dyn TokenStore>>,
}

/// [`InventoryApi`] over HTTP. No timeouts are configured beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    config: ApiConfig,
    http: Client,
}

impl HttpInventoryApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: ApiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            http: Client::new(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn options(&self, method: Method) -> RequestOptions {
        let options = RequestOptions::new(method);

        match self.config.tokens.as_deref() {
            Some(tokens) => options.bearer_token(tokens),
            None => options,
        }
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<Response, ApiError> {
        let url = format!("{}{path}", self.config.base_url);

        debug!(method = %options.method(), %url, "sending request");

        Ok(options.into_request(&self.http, &url).send().await?)
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        read_json(self.send("/products", self.options(Method::GET)).await?).await
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, ApiError> {
        read_json(self.send("/deliveries", self.options(Method::GET)).await?).await
    }

    async fn list_product_orders(&self) -> Result<Vec<ProductOrder>, ApiError> {
        read_json(self.send("/productOrders", self.options(Method::GET)).await?).await
    }

    async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        let options = self.options(Method::POST).json(product)?;

        read_json(self.send("/products", options).await?).await
    }

    async fn create_delivery(&self, delivery: &NewDelivery) -> Result<Delivery, ApiError> {
        let options = self.options(Method::POST).json(delivery)?;

        read_json(self.send("/deliveries", options).await?).await
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        let path = format!("/products/{product_id}");

        read_empty(self.send(&path, self.options(Method::DELETE)).await?).await
    }

    async fn delete_delivery(&self, delivery_id: i64) -> Result<(), ApiError> {
        let path = format!("/deliveries/{delivery_id}");

        read_empty(self.send(&path, self.options(Method::DELETE)).await?).await
    }

    async fn update_product(
        &self,
        product_id: i64,
        product: &Product,
    ) -> Result<Product, ApiError> {
        let options = self.options(Method::PUT).json(product)?;

        read_json(self.send(&format!("/products/{product_id}"), options).await?).await
    }

    async fn update_delivery(
        &self,
        delivery_id: i64,
        delivery: &Delivery,
    ) -> Result<Delivery, ApiError> {
        let options = self.options(Method::PUT).json(delivery)?;

        read_json(self.send(&format!("/deliveries/{delivery_id}"), options).await?).await
    }
}
