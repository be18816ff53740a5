//! Ledger gateway: full-snapshot persistence of the dataset collection.
//!
//! The external ledger is an append/replace key-value store reached through
//! [`LedgerClient`]. The gateway owns translation to and from bytes and
//! retains no state of its own. Every write is a full-collection overwrite
//! under a single key; there is no delta path and no optimistic-concurrency
//! check, so interleaved read-modify-write cycles are last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::dataset::DatasetRecord;
use crate::error::{EngineError, Result};

/// External append/replace key-value ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Read the bytes stored under `key`. An empty payload means no data.
    async fn read(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Replace the bytes stored under `key`.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> anyhow::Result<()>;
}

/// Serializes the dataset collection to and from ledger bytes.
pub struct LedgerGateway {
    client: Arc<dyn LedgerClient>,
    key: String,
}

impl LedgerGateway {
    pub fn new(client: Arc<dyn LedgerClient>, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted collection.
    ///
    /// Empty, non-UTF-8 or unparseable payloads are the normal "no data
    /// yet" state and yield an empty collection. Only a transport failure
    /// from the ledger itself is an error.
    pub async fn load(&self) -> Result<Vec<DatasetRecord>> {
        let bytes = self
            .client
            .read(&self.key)
            .await
            .map_err(|e| EngineError::Persistence(e.to_string()))?;

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(key = %self.key, "ledger payload is not UTF-8, treating as empty: {e}");
                return Ok(Vec::new());
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<DatasetRecord>>(&text) {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "loaded dataset collection");
                Ok(records)
            }
            Err(e) => {
                warn!(key = %self.key, "ledger payload failed to parse, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Persist the full collection, replacing whatever the ledger held.
    pub async fn save(&self, records: &[DatasetRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.client
            .write(&self.key, bytes)
            .await
            .map_err(|e| EngineError::Persistence(e.to_string()))?;
        debug!(key = %self.key, count = records.len(), "persisted dataset collection");
        Ok(())
    }
}

/// In-memory ledger for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn read(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.entries.lock().get(key).cloned().unwrap_or_default())
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> anyhow::Result<()> {
        self.entries.lock().insert(key.to_string(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataCategory, NewDataset};
    use crate::store::DatasetStore;

    fn gateway() -> LedgerGateway {
        LedgerGateway::new(Arc::new(InMemoryLedger::new()), "research")
    }

    fn populated_store() -> DatasetStore {
        let mut store = DatasetStore::new();
        for (title, seed) in [("alpha", 10.0), ("beta", 20.0)] {
            store
                .create(
                    NewDataset {
                        title: title.to_string(),
                        description: format!("{title} data"),
                        category: DataCategory::Other,
                        seed_value: seed,
                    },
                    "alice",
                )
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let gateway = gateway();
        let snapshot = populated_store().snapshot();

        gateway.save(&snapshot).await.unwrap();
        let loaded = gateway.load().await.unwrap();
        assert_eq!(loaded, snapshot);

        // Saving what was loaded and loading again is still equivalent.
        gateway.save(&loaded).await.unwrap();
        assert_eq!(gateway.load().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_empty_ledger_is_no_data() {
        assert!(gateway().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_no_data() {
        let client = Arc::new(InMemoryLedger::new());
        let gateway = LedgerGateway::new(client.clone(), "research");

        for payload in [
            b"not json at all".to_vec(),
            b"{\"an\":\"object\"}".to_vec(),
            b"   ".to_vec(),
            vec![0xff, 0xfe, 0x00],
        ] {
            client.write("research", payload).await.unwrap();
            assert!(gateway.load().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_write_failure_is_persistence_error() {
        struct BrokenLedger;

        #[async_trait]
        impl LedgerClient for BrokenLedger {
            async fn read(&self, _key: &str) -> anyhow::Result<Vec<u8>> {
                Ok(Vec::new())
            }
            async fn write(&self, _key: &str, _bytes: Vec<u8>) -> anyhow::Result<()> {
                Err(anyhow::anyhow!("ledger unavailable"))
            }
        }

        let gateway = LedgerGateway::new(Arc::new(BrokenLedger), "research");
        let err = gateway.save(&[]).await.unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));
        assert!(err.to_string().contains("ledger unavailable"));
    }
}
