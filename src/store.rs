//! Cart persistence
//!
//! The cart survives restarts as a JSON object mapping product id to
//! quantity, written to a small file next to the service.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::cart::Cart;
use crate::domain::value_objects::Quantity;
use crate::{Result, ShopError};

#[derive(Clone, Debug)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved cart. A missing file means a fresh cart; an unreadable
    /// one is discarded with a warning.
    pub fn load(&self) -> Cart {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "could not read cart file, starting empty");
                return Cart::new();
            }
        };
        match serde_json::from_str::<BTreeMap<String, Quantity>>(&raw) {
            Ok(quantities) => Cart::from_quantities(quantities),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "discarding corrupt cart file");
                Cart::new()
            }
        }
    }

    pub fn save(&self, cart: &Cart) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ShopError::Storage(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(cart.quantities())
            .map_err(|e| ShopError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| ShopError::Storage(e.to_string()))?;
        Ok(())
    }
}
