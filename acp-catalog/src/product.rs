use acp_core::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A SKU in the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub sku: String,
    pub name: String,
    /// Unit price in minor units.
    pub price: i64,
}

impl CatalogEntry {
    pub fn new(sku: &str, name: &str, price: i64) -> Self {
        Self {
            sku: sku.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

/// Unit price lookup for catalog SKUs.
pub trait PriceOracle: Send + Sync {
    /// Fails with `UnknownSku` for identifiers not in the catalog.
    fn price_for(&self, sku: &str) -> CheckoutResult<i64>;
}

/// In-process catalog backed by a fixed table.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.sku.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, sku: &str) -> Option<&CatalogEntry> {
        self.entries.get(sku)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new([
            CatalogEntry::new("sku1", "Classic Tee", 1000),
            CatalogEntry::new("sku2", "Canvas Tote", 2500),
            CatalogEntry::new("sku3", "Wool Beanie", 1850),
            CatalogEntry::new("sku4", "Trail Backpack", 8999),
            CatalogEntry::new("sku5", "Rain Shell", 15900),
        ])
    }
}

impl PriceOracle for StaticCatalog {
    fn price_for(&self, sku: &str) -> CheckoutResult<i64> {
        self.entries
            .get(sku)
            .map(|entry| entry.price)
            .ok_or_else(|| CheckoutError::UnknownSku(sku.to_string()))
    }
}
