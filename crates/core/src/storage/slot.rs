use crate::errors::CartError;

/// Key under which the serialized cart lives in the durable store.
pub const CART_SLOT_KEY: &str = "cart";

/// A durable key-value slot holding the serialized cart.
///
/// The web app keeps this in browser local storage; on native targets a
/// file-backed slot plays the same role. Implementations only move opaque
/// JSON payloads — (de)serialization stays in [`super::manager::StorageManager`].
pub trait CartSlot {
    /// Read the stored payload. `Ok(None)` means nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, CartError>;

    /// Overwrite the stored payload.
    fn write(&mut self, payload: &str) -> Result<(), CartError>;
}

// ── File-backed slot (native only) ──────────────────────────────────

/// Cart slot persisted as a JSON file on disk (native only).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSlot {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot at the conventional file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_SLOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CartSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, CartError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), CartError> {
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

// ── In-memory slot ──────────────────────────────────────────────────

/// Cart slot held in memory. The default for tests and for hosts that
/// bring their own storage bridge.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-seeded with a payload, as if a previous session had saved it.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// The currently stored payload, if any.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl CartSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, CartError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), CartError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}
