use thiserror::Error;

/// Unified error type for the entire storefront-cart-core library.
/// Every fallible public function returns `Result<T, CartError>`.
#[derive(Debug, Error)]
pub enum CartError {
    // ── Storage / Persistence ───────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Order API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Cart validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CartError {
    fn from(e: std::io::Error) -> Self {
        CartError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CartError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so auth
        // tokens passed as query strings never end up in logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CartError::Network(sanitized)
    }
}
