use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CartError;
use crate::models::order::{OrderDraft, PlacedOrder};

use super::traits::OrderApi;

/// Default backend base URL used during local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:12000/api";

/// [`OrderApi`] implementation against the storefront REST backend.
///
/// Endpoints: `POST /orders`, `GET /orders/{id}`,
/// `GET /orders/customer/{customerId}`.
pub struct RestOrderApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestOrderApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Attach a bearer token sent with every request.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Turn a non-success response into a `CartError::Api`, preferring the
    /// backend's `{ "message": ... }` body over the bare status text.
    async fn error_from_response(response: Response) -> CartError {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        CartError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl Default for RestOrderApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// ── Backend response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl OrderApi for RestOrderApi {
    async fn create_order(&self, draft: &OrderDraft) -> Result<PlacedOrder, CartError> {
        let response = self
            .request(Method::POST, "/orders")
            .json(draft)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let status = response.status().as_u16();
        response.json().await.map_err(|e| CartError::Api {
            status,
            message: format!("Failed to parse order response: {e}"),
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<PlacedOrder, CartError> {
        let response = self
            .request(Method::GET, &format!("/orders/{order_id}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let status = response.status().as_u16();
        response.json().await.map_err(|e| CartError::Api {
            status,
            message: format!("Failed to parse order response: {e}"),
        })
    }

    async fn fetch_customer_orders(
        &self,
        customer_id: &str,
    ) -> Result<Vec<PlacedOrder>, CartError> {
        let response = self
            .request(Method::GET, &format!("/orders/customer/{customer_id}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let status = response.status().as_u16();
        response.json().await.map_err(|e| CartError::Api {
            status,
            message: format!("Failed to parse order list response: {e}"),
        })
    }
}
