use async_trait::async_trait;

use crate::errors::CartError;
use crate::models::order::{OrderDraft, PlacedOrder};

/// Trait abstraction over the backend order endpoints.
///
/// The cart core only ever talks to orders through this trait, so tests run
/// against mocks and hosts can swap the HTTP client for a platform bridge
/// without touching checkout logic.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait OrderApi: Send + Sync {
    /// Submit an order-creation request. Returns the created order.
    async fn create_order(&self, draft: &OrderDraft) -> Result<PlacedOrder, CartError>;

    /// Fetch a single order by its identifier.
    async fn fetch_order(&self, order_id: &str) -> Result<PlacedOrder, CartError>;

    /// Fetch all orders placed by a customer.
    async fn fetch_customer_orders(&self, customer_id: &str)
        -> Result<Vec<PlacedOrder>, CartError>;
}
