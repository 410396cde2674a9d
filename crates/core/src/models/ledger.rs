use serde::{Deserialize, Serialize};

use crate::errors::CartError;

use super::line::{CartLine, LineKey};

/// The authoritative in-memory cart state: an ordered collection of lines.
///
/// Serializes as a bare JSON array of lines, which is exactly the shape
/// written to the persisted cart slot.
///
/// Invariants:
/// - no two lines share the same (product, shop, variant) identity;
/// - every stored line has `quantity >= 1` and a finite, non-negative price.
///
/// Aggregates (`total_items`, `total_price`) are recomputed from the lines
/// on every read so they can never drift from the actual contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a ledger from raw lines, e.g. lines decoded from storage.
    ///
    /// Lines that fail validation are dropped and duplicate identities are
    /// merged, so a hand-edited or stale persisted payload still yields a
    /// ledger that upholds the invariants.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut ledger = Self::new();
        for line in lines {
            let _ = ledger.add(line);
        }
        ledger
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same identity (product + shop + variant) already
    /// exists, its quantity grows by the candidate's full quantity and the
    /// existing price/display snapshot is kept. Otherwise the candidate is
    /// appended as a new line.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ValidationError(
                "Line quantity must be at least 1".to_string(),
            ));
        }
        if !line.price.is_finite() || line.price < 0.0 {
            return Err(CartError::ValidationError(format!(
                "Invalid unit price {}: must be finite and non-negative",
                line.price
            )));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.same_identity(&line)) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
        Ok(())
    }

    /// Remove the line matching the key. Returns whether a line was removed;
    /// removing an absent line is a no-op.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        match self.lines.iter().position(|l| l.matches(key)) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Set the quantity of the line matching the key.
    ///
    /// A quantity of zero is rejected as a no-op — dropping a line is an
    /// explicit `remove`, never a side effect of a quantity update. Returns
    /// whether the ledger changed.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.lines.iter_mut().find(|l| l.matches(key)) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Find the line matching the key, if any.
    pub fn find(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// All lines in stable insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total cart value: sum of price times quantity over all lines.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
