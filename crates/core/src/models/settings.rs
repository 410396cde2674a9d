use serde::{Deserialize, Serialize};

/// Checkout pricing knobs, normally sourced from shop configuration.
///
/// The backend remains the price authority; these values only shape the
/// outbound request and the totals shown before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSettings {
    /// Flat fee applied when the order is delivered; pickup orders pay none.
    pub delivery_fee: f64,

    /// Tax added on top of the subtotals.
    pub tax: f64,

    /// Discount subtracted from the order total.
    pub discount: f64,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            delivery_fee: 5.0,
            tax: 0.0,
            discount: 0.0,
        }
    }
}
