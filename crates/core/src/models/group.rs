use super::line::CartLine;

/// A read-only partition of the cart by owning shop.
///
/// Derived from the ledger on demand and never persisted — checkout builds
/// one sub-order per group. Groups appear in first-occurrence order of their
/// shop in the ledger, so the view is stable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopGroup<'a> {
    /// Shop the lines belong to
    pub shop_id: &'a str,

    /// Lines owned by this shop, in ledger order
    pub lines: Vec<&'a CartLine>,

    /// Sum of price times quantity over this shop's lines
    pub subtotal: f64,
}
