//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Ledger key under which the dataset collection is persisted.
pub const DEFAULT_COLLECTION_KEY: &str = "research";

/// Default reveal-authorization window length.
pub const DEFAULT_WINDOW_DURATION_DAYS: u32 = 30;

/// Session engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ledger key holding the serialized collection.
    pub collection_key: String,
    /// Address of the ledger contract backing persistence.
    pub ledger_address: String,
    /// Network the ledger lives on.
    pub network_id: u64,
    /// How long a reveal authorization window lasts.
    pub window_duration_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            ledger_address: String::new(),
            network_id: 0,
            window_duration_days: DEFAULT_WINDOW_DURATION_DAYS,
        }
    }
}

impl EngineConfig {
    pub fn with_ledger(mut self, address: impl Into<String>, network_id: u64) -> Self {
        self.ledger_address = address.into();
        self.network_id = network_id;
        self
    }

    pub fn with_collection_key(mut self, key: impl Into<String>) -> Self {
        self.collection_key = key.into();
        self
    }

    pub fn with_window_duration_days(mut self, days: u32) -> Self {
        self.window_duration_days = days;
        self
    }
}
