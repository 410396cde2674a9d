use uuid::Uuid;

use crate::errors::CartError;
use crate::models::group::ShopGroup;
use crate::models::order::{CheckoutForm, DeliveryType, OrderDraft, ShopOrderDraft};
use crate::models::settings::CheckoutSettings;

/// Turns the shop-grouped cart plus the checkout form into an outbound
/// order-creation request.
///
/// A pure transform — it never calls the network itself and owns no state;
/// submission belongs to the caller.
pub struct CheckoutService;

impl CheckoutService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the order request from the grouped cart and the form.
    ///
    /// Rules:
    /// - Checkout with no groups (empty cart) is rejected.
    /// - Delivery orders require a complete shipping address.
    /// - Pickup orders carry no address and pay no delivery fee.
    ///
    /// Each call mints a fresh idempotency key; callers that retry the same
    /// submission should reuse the previously built draft instead of
    /// rebuilding it.
    pub fn build_order_request(
        &self,
        groups: &[ShopGroup<'_>],
        form: &CheckoutForm,
        settings: &CheckoutSettings,
    ) -> Result<OrderDraft, CartError> {
        if groups.is_empty() {
            return Err(CartError::ValidationError(
                "Cannot check out an empty cart".to_string(),
            ));
        }

        let shipping_address = match form.delivery_type {
            DeliveryType::Delivery => {
                let address = form.shipping_address.as_ref().ok_or_else(|| {
                    CartError::ValidationError(
                        "Shipping address is required for delivery orders".to_string(),
                    )
                })?;
                let missing = address.missing_fields();
                if !missing.is_empty() {
                    return Err(CartError::ValidationError(format!(
                        "Shipping address is missing: {}",
                        missing.join(", ")
                    )));
                }
                Some(address.clone())
            }
            DeliveryType::Pickup => None,
        };

        let delivery_fee = match form.delivery_type {
            DeliveryType::Delivery => settings.delivery_fee,
            DeliveryType::Pickup => 0.0,
        };

        let shop_orders: Vec<ShopOrderDraft> = groups
            .iter()
            .map(|group| ShopOrderDraft::from_group(group, form.delivery_type, delivery_fee))
            .collect();

        Ok(OrderDraft {
            shop_orders,
            shipping_address,
            delivery_type: form.delivery_type,
            payment_method: form.payment_method,
            notes: form.notes.clone(),
            tax: settings.tax,
            delivery_fee,
            discount: settings.discount,
            idempotency_key: Uuid::new_v4(),
        })
    }
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new()
    }
}
