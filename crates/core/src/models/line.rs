use serde::{Deserialize, Serialize};

/// Display metadata carried on every cart line so the UI can render the
/// cart without re-fetching product documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDisplay {
    /// Product name as shown in the cart
    pub name: String,

    /// Product image URL (may be empty if the product has none)
    #[serde(default)]
    pub image: String,
}

impl LineDisplay {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Identity of a cart line: product + shop + optional variant.
///
/// Two lines with the same key are the same logical line and merge on add.
/// A variant of a product is a distinct line from the plain product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub shop_id: String,
    pub variant_id: Option<String>,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, shop_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            shop_id: shop_id.into(),
            variant_id: None,
        }
    }

    /// Key for a specific variant of a product.
    pub fn with_variant(
        product_id: impl Into<String>,
        shop_id: impl Into<String>,
        variant_id: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            shop_id: shop_id.into(),
            variant_id: Some(variant_id.into()),
        }
    }
}

/// A single line in the shopping cart.
///
/// **Important**: the unit price is snapshotted at add time. Later price
/// changes in the catalog do not touch lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier
    pub product_id: String,

    /// Shop the product belongs to — drives checkout grouping
    pub shop_id: String,

    /// Optional variant identifier (size, color, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,

    /// Units of this product in the cart (always >= 1 once stored)
    pub quantity: u32,

    /// Unit price snapshot taken when the line was added
    pub price: f64,

    /// Name/image snapshot for rendering
    #[serde(flatten)]
    pub display: LineDisplay,
}

impl CartLine {
    pub fn new(
        product_id: impl Into<String>,
        shop_id: impl Into<String>,
        quantity: u32,
        price: f64,
        display: LineDisplay,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            shop_id: shop_id.into(),
            variant_id: None,
            quantity,
            price,
            display,
        }
    }

    /// Create a line for a specific product variant.
    pub fn with_variant(
        product_id: impl Into<String>,
        shop_id: impl Into<String>,
        variant_id: impl Into<String>,
        quantity: u32,
        price: f64,
        display: LineDisplay,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            shop_id: shop_id.into(),
            variant_id: Some(variant_id.into()),
            quantity,
            price,
            display,
        }
    }

    /// The identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            shop_id: self.shop_id.clone(),
            variant_id: self.variant_id.clone(),
        }
    }

    /// Does this line match the given key?
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id
            && self.shop_id == key.shop_id
            && self.variant_id == key.variant_id
    }

    /// Do two lines share the same identity (product + shop + variant)?
    pub fn same_identity(&self, other: &CartLine) -> bool {
        self.product_id == other.product_id
            && self.shop_id == other.shop_id
            && self.variant_id == other.variant_id
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
