use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::ShopGroup;

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Courier delivery to a shipping address
    Delivery,
    /// Customer picks up at the shop — no address required
    Pickup,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    MobileMoney,
}

/// Fulfillment status of a shop's sub-order, as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payment state of a placed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Where a delivery order ships to. All fields are required for delivery;
/// pickup orders carry no address at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

impl ShippingAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            zip_code: zip_code.into(),
        }
    }

    /// Are all address fields filled in?
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields still blank, using their wire spellings.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.street.trim().is_empty() {
            missing.push("street");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.state.trim().is_empty() {
            missing.push("state");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        if self.zip_code.trim().is_empty() {
            missing.push("zipCode");
        }
        missing
    }
}

/// Everything the customer chooses on the checkout screen: delivery method,
/// payment method, optional shipping address and notes.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    /// Required when `delivery_type` is `Delivery`, ignored for pickup
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Form for a delivery order shipped to `address`.
    pub fn delivery(address: ShippingAddress, payment_method: PaymentMethod) -> Self {
        Self {
            shipping_address: Some(address),
            delivery_type: DeliveryType::Delivery,
            payment_method,
            notes: None,
        }
    }

    /// Form for a pickup order — no shipping address needed.
    pub fn pickup(payment_method: PaymentMethod) -> Self {
        Self {
            shipping_address: None,
            delivery_type: DeliveryType::Pickup,
            payment_method,
            notes: None,
        }
    }

    /// Attach free-text order notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One item inside a shop's sub-order, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    /// Product identifier
    pub product: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,

    pub quantity: u32,

    /// Unit price snapshot from the cart line
    pub price: f64,
}

/// One shop's slice of the outbound order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOrderDraft {
    /// Shop identifier
    pub shop: String,

    pub items: Vec<OrderItemDraft>,

    /// Sum of price times quantity over this shop's items
    pub subtotal: f64,

    pub delivery_type: DeliveryType,

    pub delivery_fee: f64,
}

/// The full order-creation request sent to the backend.
///
/// Built by checkout from the shop-grouped cart plus the checkout form.
/// The `idempotency_key` is generated once per draft so a retried submission
/// after a timeout cannot create a duplicate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub shop_orders: Vec<ShopOrderDraft>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,

    pub delivery_type: DeliveryType,

    pub payment_method: PaymentMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub tax: f64,

    pub delivery_fee: f64,

    pub discount: f64,

    /// Request token — stable across retries of the same draft
    pub idempotency_key: Uuid,
}

impl OrderDraft {
    /// Grand total for display only: sum of sub-order subtotals plus tax and
    /// the flat delivery fee, minus any discount. The fee is counted once
    /// even though each sub-order echoes it. The backend recomputes the
    /// authoritative total.
    pub fn display_total(&self) -> f64 {
        let subtotals: f64 = self.shop_orders.iter().map(|so| so.subtotal).sum();
        subtotals + self.tax + self.delivery_fee - self.discount
    }

    /// Do two drafts describe the same order, ignoring the request token?
    /// Used to decide whether a retry may reuse a previous token.
    pub fn same_payload(&self, other: &OrderDraft) -> bool {
        self.shop_orders == other.shop_orders
            && self.shipping_address == other.shipping_address
            && self.delivery_type == other.delivery_type
            && self.payment_method == other.payment_method
            && self.notes == other.notes
            && self.tax == other.tax
            && self.delivery_fee == other.delivery_fee
            && self.discount == other.discount
    }
}

/// A successfully created order, as returned by the backend.
///
/// Deserialization is deliberately tolerant: only the identifier is
/// required, everything else defaults when the backend omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// Backend document identifier, used for post-checkout navigation
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub shop_orders: Vec<PlacedShopOrder>,
}

/// One shop's sub-order inside a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedShopOrder {
    #[serde(default)]
    pub shop: String,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub items: Vec<OrderItemDraft>,

    #[serde(default)]
    pub subtotal: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    #[serde(default)]
    pub delivery_fee: f64,
}

// ── Draft assembly helpers ──────────────────────────────────────────

impl ShopOrderDraft {
    /// Build one shop's sub-order from its cart group.
    pub fn from_group(group: &ShopGroup<'_>, delivery_type: DeliveryType, delivery_fee: f64) -> Self {
        Self {
            shop: group.shop_id.to_string(),
            items: group
                .lines
                .iter()
                .map(|line| OrderItemDraft {
                    product: line.product_id.clone(),
                    variant_id: line.variant_id.clone(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
            subtotal: group.subtotal,
            delivery_type,
            delivery_fee,
        }
    }
}
