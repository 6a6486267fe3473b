//! Durable local cart persistence.
//!
//! The cart is one serialized JSON document behind a single key: read on
//! every `get`, overwritten wholesale on every mutation. There are no
//! partial or delta writes.

use crate::errors::StorefrontError;
use crate::models::cart::Cart;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Backing store for the serialized cart.
pub trait CartStorage: Send + Sync {
    /// Loads the persisted cart. `Ok(None)` means no cart exists yet; a
    /// corrupt payload is treated as absent (and logged), never as an
    /// error, so the storefront always recovers to a usable state.
    fn load(&self) -> Result<Option<Cart>, StorefrontError>;

    /// Overwrites the stored cart wholesale.
    fn save(&self, cart: &Cart) -> Result<(), StorefrontError>;

    /// Destroys the stored cart. Deleting an absent cart is a no-op.
    fn delete(&self) -> Result<(), StorefrontError>;
}

/// File-backed storage: one JSON document at a configured path.
///
/// Concurrent writers (multiple processes sharing the path) race with
/// last-writer-wins semantics; there is no lock or version check.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<Cart>, StorefrontError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(cart) => Ok(Some(cart)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding corrupt cart document");
                Ok(None)
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), StorefrontError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(cart)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), StorefrontError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests. Round-trips carts through their serialized
/// form so it exercises the same persistence path as the file store.
#[derive(Debug, Default)]
pub struct InMemoryCartStorage {
    slot: Mutex<Option<String>>,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for InMemoryCartStorage {
    fn load(&self) -> Result<Option<Cart>, StorefrontError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StorefrontError::storage("cart storage lock poisoned"))?;
        match slot.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), StorefrontError> {
        let raw = serde_json::to_string(cart)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorefrontError::storage("cart storage lock poisoned"))?;
        *slot = Some(raw);
        Ok(())
    }

    fn delete(&self) -> Result<(), StorefrontError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorefrontError::storage("cart storage lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}
