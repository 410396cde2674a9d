// ═══════════════════════════════════════════════════════════════════
// API Tests — RestOrderApi construction, request/response wire shapes
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;

use storefront_cart_core::api::rest::{DEFAULT_BASE_URL, RestOrderApi};
use storefront_cart_core::api::traits::OrderApi;
use storefront_cart_core::models::line::{CartLine, LineDisplay};
use storefront_cart_core::models::order::{
    CheckoutForm, DeliveryType, OrderDraft, OrderStatus, PaymentMethod, PaymentStatus,
    PlacedOrder, ShippingAddress,
};
use storefront_cart_core::models::settings::CheckoutSettings;
use storefront_cart_core::services::checkout_service::CheckoutService;
use storefront_cart_core::services::grouping_service::GroupingService;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn line(product: &str, shop: &str, quantity: u32, price: f64) -> CartLine {
    CartLine::new(
        product,
        shop,
        quantity,
        price,
        LineDisplay::new(product, format!("{product}.jpg")),
    )
}

fn draft_for(lines: &[CartLine], form: &CheckoutForm) -> OrderDraft {
    let groups = GroupingService::new().group_by_shop(lines);
    CheckoutService::new()
        .build_order_request(&groups, form, &CheckoutSettings::default())
        .unwrap()
}

fn address() -> ShippingAddress {
    ShippingAddress::new("1 Main St", "Accra", "Greater Accra", "Ghana", "00233")
}

// ═══════════════════════════════════════════════════════════════════
// RestOrderApi — Construction
// ═══════════════════════════════════════════════════════════════════

mod client_construction {
    use super::*;

    #[test]
    fn new_keeps_base_url() {
        let api = RestOrderApi::new("https://shop.example.com/api");
        assert_eq!(api.base_url(), "https://shop.example.com/api");
    }

    #[test]
    fn new_trims_trailing_slashes() {
        let api = RestOrderApi::new("https://shop.example.com/api/");
        assert_eq!(api.base_url(), "https://shop.example.com/api");

        let api = RestOrderApi::new("https://shop.example.com/api///");
        assert_eq!(api.base_url(), "https://shop.example.com/api");
    }

    #[test]
    fn default_uses_local_backend() {
        assert_eq!(DEFAULT_BASE_URL, "http://localhost:12000/api");
        let api = RestOrderApi::default();
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn auth_token_does_not_change_base_url() {
        let api = RestOrderApi::new("https://shop.example.com/api").with_auth_token("jwt-token");
        assert_eq!(api.base_url(), "https://shop.example.com/api");
    }
}

// ═══════════════════════════════════════════════════════════════════
// OrderDraft — outbound wire shape
// ═══════════════════════════════════════════════════════════════════

mod draft_wire_shape {
    use super::*;

    #[test]
    fn delivery_draft_serializes_to_backend_schema() {
        let lines = vec![line("p1", "s1", 2, 5.0), line("p2", "s2", 1, 20.0)];
        let form = CheckoutForm::delivery(address(), PaymentMethod::MobileMoney);
        let value = serde_json::to_value(draft_for(&lines, &form)).unwrap();

        assert_eq!(value["deliveryType"], "delivery");
        assert_eq!(value["paymentMethod"], "mobile_money");
        assert_eq!(value["tax"], 0.0);
        assert_eq!(value["deliveryFee"], 5.0);
        assert_eq!(value["discount"], 0.0);
        assert!(value["idempotencyKey"].is_string());

        let addr = &value["shippingAddress"];
        assert_eq!(addr["street"], "1 Main St");
        assert_eq!(addr["city"], "Accra");
        assert_eq!(addr["state"], "Greater Accra");
        assert_eq!(addr["country"], "Ghana");
        assert_eq!(addr["zipCode"], "00233");

        let shop_orders = value["shopOrders"].as_array().unwrap();
        assert_eq!(shop_orders.len(), 2);
        assert_eq!(shop_orders[0]["shop"], "s1");
        assert_eq!(shop_orders[0]["subtotal"], 10.0);
        assert_eq!(shop_orders[0]["deliveryType"], "delivery");
        assert_eq!(shop_orders[0]["deliveryFee"], 5.0);

        let items = shop_orders[0]["items"].as_array().unwrap();
        assert_eq!(items[0]["product"], "p1");
        assert_eq!(items[0]["quantity"], 2);
        assert_eq!(items[0]["price"], 5.0);
    }

    #[test]
    fn pickup_draft_omits_address() {
        let lines = vec![line("p1", "s1", 1, 10.0)];
        let value =
            serde_json::to_value(draft_for(&lines, &CheckoutForm::pickup(PaymentMethod::Cash)))
                .unwrap();

        assert_eq!(value["deliveryType"], "pickup");
        assert_eq!(value["deliveryFee"], 0.0);
        assert!(value.get("shippingAddress").is_none());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn notes_appear_when_set() {
        let lines = vec![line("p1", "s1", 1, 10.0)];
        let form = CheckoutForm::pickup(PaymentMethod::Cash).with_notes("leave at the gate");
        let value = serde_json::to_value(draft_for(&lines, &form)).unwrap();
        assert_eq!(value["notes"], "leave at the gate");
    }

    #[test]
    fn variant_id_omitted_unless_present() {
        let plain = vec![line("p1", "s1", 1, 10.0)];
        let value =
            serde_json::to_value(draft_for(&plain, &CheckoutForm::pickup(PaymentMethod::Cash)))
                .unwrap();
        let item = &value["shopOrders"][0]["items"][0];
        assert!(item.get("variantId").is_none());

        let with_variant = vec![CartLine::with_variant(
            "p1",
            "s1",
            "xl",
            1,
            10.0,
            LineDisplay::new("p1", "p1.jpg"),
        )];
        let value = serde_json::to_value(draft_for(
            &with_variant,
            &CheckoutForm::pickup(PaymentMethod::Cash),
        ))
        .unwrap();
        assert_eq!(value["shopOrders"][0]["items"][0]["variantId"], "xl");
    }

    #[test]
    fn key_survives_serde_round_trip() {
        let lines = vec![line("p1", "s1", 1, 10.0)];
        let draft = draft_for(&lines, &CheckoutForm::pickup(PaymentMethod::Cash));

        let json = serde_json::to_string(&draft).unwrap();
        let back: OrderDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back.idempotency_key, draft.idempotency_key);
        assert!(back.same_payload(&draft));
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlacedOrder — inbound wire shape
// ═══════════════════════════════════════════════════════════════════

mod placed_order_parsing {
    use super::*;

    #[test]
    fn minimal_response_parses_with_defaults() {
        let order: PlacedOrder = serde_json::from_value(json!({ "_id": "abc123" })).unwrap();

        assert_eq!(order.id, "abc123");
        assert_eq!(order.order_number, None);
        assert_eq!(order.grand_total, None);
        assert_eq!(order.payment_status, None);
        assert_eq!(order.created_at, None);
        assert!(order.shop_orders.is_empty());
    }

    #[test]
    fn full_response_parses() {
        let order: PlacedOrder = serde_json::from_value(json!({
            "_id": "68ab4f2e9d1c",
            "orderNumber": "ORD-2025-0042",
            "grandTotal": 35.0,
            "paymentStatus": "paid",
            "createdAt": "2025-08-01T12:00:00Z",
            "shopOrders": [
                {
                    "shop": "s1",
                    "status": "shipped",
                    "items": [
                        { "product": "p1", "quantity": 2, "price": 5.0 },
                        { "product": "p2", "variantId": "xl", "quantity": 1, "price": 8.0 }
                    ],
                    "subtotal": 18.0,
                    "total": 23.0,
                    "deliveryFee": 5.0
                }
            ]
        }))
        .unwrap();

        assert_eq!(order.order_number.as_deref(), Some("ORD-2025-0042"));
        assert_eq!(order.grand_total, Some(35.0));
        assert_eq!(order.payment_status, Some(PaymentStatus::Paid));
        assert!(order.created_at.is_some());

        let sub = &order.shop_orders[0];
        assert_eq!(sub.shop, "s1");
        assert_eq!(sub.status, OrderStatus::Shipped);
        assert_eq!(sub.items.len(), 2);
        assert_eq!(sub.items[1].variant_id.as_deref(), Some("xl"));
        assert_eq!(sub.subtotal, 18.0);
        assert_eq!(sub.total, Some(23.0));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let order: PlacedOrder = serde_json::from_value(json!({
            "_id": "abc",
            "customer": "cust-1",
            "updatedAt": "2025-08-01T12:30:00Z",
            "__v": 0
        }))
        .unwrap();
        assert_eq!(order.id, "abc");
    }

    #[test]
    fn missing_id_fails() {
        let result: Result<PlacedOrder, _> =
            serde_json::from_value(json!({ "orderNumber": "ORD-1" }));
        assert!(result.is_err());
    }

    #[test]
    fn order_list_parses() {
        let orders: Vec<PlacedOrder> = serde_json::from_value(json!([
            { "_id": "a1" },
            { "_id": "a2", "paymentStatus": "refunded" }
        ]))
        .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].payment_status, Some(PaymentStatus::Refunded));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Enum wire values
// ═══════════════════════════════════════════════════════════════════

mod enum_wire_values {
    use super::*;

    #[test]
    fn delivery_type() {
        assert_eq!(
            serde_json::to_value(DeliveryType::Delivery).unwrap(),
            "delivery"
        );
        assert_eq!(serde_json::to_value(DeliveryType::Pickup).unwrap(), "pickup");
    }

    #[test]
    fn payment_method() {
        assert_eq!(serde_json::to_value(PaymentMethod::Card).unwrap(), "card");
        assert_eq!(serde_json::to_value(PaymentMethod::Cash).unwrap(), "cash");
        assert_eq!(
            serde_json::to_value(PaymentMethod::MobileMoney).unwrap(),
            "mobile_money"
        );
    }

    #[test]
    fn order_status_parses_all_states() {
        for raw in ["pending", "processing", "shipped", "delivered", "cancelled"] {
            let status: OrderStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status.to_string(), raw);
        }
    }

    #[test]
    fn payment_status_parses_all_states() {
        for raw in ["pending", "paid", "failed", "refunded"] {
            let status: PaymentStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status.to_string(), raw);
        }
    }

    #[test]
    fn statuses_default_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }
}

// ═══════════════════════════════════════════════════════════════════
// OrderApi trait compliance
// ═══════════════════════════════════════════════════════════════════

mod trait_compliance {
    use super::*;

    /// Verify the client implements Send + Sync (required by async-trait).
    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestOrderApi>();
    }

    /// Verify the client can be stored behind the trait object the store uses.
    #[test]
    fn client_as_trait_object() {
        let api: Box<dyn OrderApi> = Box::new(RestOrderApi::new("https://shop.example.com/api"));
        let _ = api;
    }
}
