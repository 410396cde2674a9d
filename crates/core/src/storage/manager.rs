use tracing::warn;

use crate::errors::CartError;
use crate::models::ledger::CartLedger;
use crate::models::line::CartLine;

use super::slot::CartSlot;

/// High-level cart persistence: encode/decode the ledger and move it
/// through a [`CartSlot`].
///
/// Reads fail soft and writes are fire-and-forget — the in-memory ledger
/// stays authoritative for the session no matter what the slot does.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the ledger to its slot payload: a JSON array of lines.
    pub fn encode(ledger: &CartLedger) -> Result<String, CartError> {
        serde_json::to_string(ledger)
            .map_err(|e| CartError::Serialization(format!("Failed to serialize cart: {e}")))
    }

    /// Deserialize a slot payload back into a ledger.
    ///
    /// Decoded lines pass through ledger validation, so a payload with
    /// duplicate identities or zero quantities still yields a well-formed
    /// ledger rather than an invalid one.
    pub fn decode(payload: &str) -> Result<CartLedger, CartError> {
        let lines: Vec<CartLine> = serde_json::from_str(payload)?;
        Ok(CartLedger::from_lines(lines))
    }

    /// Load the cart from the slot at startup.
    ///
    /// A missing, unreadable, or corrupt payload degrades to an empty cart —
    /// bad persisted state must never prevent the app from starting.
    pub fn hydrate(slot: &dyn CartSlot) -> CartLedger {
        match slot.read() {
            Ok(Some(payload)) => match Self::decode(&payload) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!("Persisted cart is corrupt, starting empty: {e}");
                    CartLedger::new()
                }
            },
            Ok(None) => CartLedger::new(),
            Err(e) => {
                warn!("Cart slot read failed, starting empty: {e}");
                CartLedger::new()
            }
        }
    }

    /// Write the ledger to the slot after a mutation.
    ///
    /// Failures are logged and swallowed; the caller is never blocked on
    /// persistence and the in-memory cart keeps serving the session.
    pub fn persist(slot: &mut dyn CartSlot, ledger: &CartLedger) {
        let payload = match Self::encode(ledger) {
            Ok(p) => p,
            Err(e) => {
                warn!("Cart persistence failed, keeping in-memory state: {e}");
                return;
            }
        };
        if let Err(e) = slot.write(&payload) {
            warn!("Cart persistence failed, keeping in-memory state: {e}");
        }
    }
}
