//! Session engine.
//!
//! One `ResearchEngine` is one session: challenge parameters are generated
//! at construction and stay fixed until the engine is dropped. The engine
//! owns the dataset mirror and the audit trail, reaches the ledger through
//! the gateway and the wallet through the identity provider, and exposes
//! every operation as an explicit method returning a tagged result.
//!
//! Mutations follow read record, transform, write back, persist - one
//! mutation runs to completion before the next begins, and locks are never
//! held across an await on an external collaborator. Ledger writes are
//! full-snapshot overwrites with no optimistic-concurrency check, so
//! interleaved sessions are last-write-wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::actions::{ActionEntry, ActionKind, ActionLog};
use crate::auth::{verify_signature, ChallengeParams, RevealAttempt, RevealPhase};
use crate::codec;
use crate::compute::{self, Operation};
use crate::config::EngineConfig;
use crate::dataset::{DataCategory, DatasetRecord, NewDataset};
use crate::error::{EngineError, Result};
use crate::identity::IdentityProvider;
use crate::ledger::{LedgerClient, LedgerGateway};
use crate::store::DatasetStore;

/// Aggregate counters over the session's collection, computed without
/// touching any decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub datasets: usize,
    pub contributors: usize,
}

pub struct ResearchEngine {
    store: RwLock<DatasetStore>,
    actions: RwLock<ActionLog>,
    gateway: LedgerGateway,
    identity: Arc<dyn IdentityProvider>,
    params: ChallengeParams,
}

impl ResearchEngine {
    /// Create an engine for a fresh session.
    pub fn new(
        config: EngineConfig,
        ledger: Arc<dyn LedgerClient>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let params = ChallengeParams::generate(
            config.ledger_address.clone(),
            config.network_id,
            config.window_duration_days,
        );
        info!(key = %config.collection_key, "research engine session started");
        Self {
            store: RwLock::new(DatasetStore::new()),
            actions: RwLock::new(ActionLog::new()),
            gateway: LedgerGateway::new(ledger, config.collection_key),
            identity,
            params,
        }
    }

    /// Session challenge parameters, fixed for the engine's lifetime.
    pub fn challenge_params(&self) -> &ChallengeParams {
        &self.params
    }

    /// Refresh the in-process mirror from the ledger. Returns the number of
    /// records loaded; an empty or unreadable payload loads as zero.
    pub async fn load(&self) -> Result<usize> {
        let records = self.gateway.load().await?;
        let count = records.len();
        self.store.write().await.reset(records);
        Ok(count)
    }

    /// Register a dataset and persist the grown collection.
    pub async fn upload(&self, input: NewDataset) -> Result<DatasetRecord> {
        let creator = self.require_identity().await?;
        let (record, snapshot) = {
            let mut store = self.store.write().await;
            let record = store.create(input, &creator)?;
            (record, store.snapshot())
        };
        self.gateway.save(&snapshot).await?;
        self.actions
            .write()
            .await
            .record(ActionKind::Upload, format!("Uploaded data: {}", record.title));
        info!(id = record.id, title = %record.title, "dataset registered");
        Ok(record)
    }

    /// Run one operation against a dataset's protected value, write the
    /// re-encoded result back, and persist the full collection.
    pub async fn compute(&self, id: u64, operation: Operation) -> Result<DatasetRecord> {
        self.require_identity().await?;
        let (updated, snapshot) = {
            let mut store = self.store.write().await;
            let current = store.find_by_id(id)?.clone();
            let transformed = compute::apply(&current, operation)?;
            let updated = store.replace(id, |_| transformed)?;
            (updated, store.snapshot())
        };
        self.gateway.save(&snapshot).await?;
        self.actions.write().await.record(
            ActionKind::Compute,
            format!("Performed {} on: {}", operation, updated.title),
        );
        info!(id, operation = %operation, "computation applied");
        Ok(updated)
    }

    /// Reveal a dataset's plaintext value after a signed challenge.
    ///
    /// The signature is requested fresh on every call and verified against
    /// the provider's address; any denial path returns
    /// [`EngineError::AuthorizationDenied`] with no audit entry and no
    /// retained state.
    pub async fn reveal(&self, id: u64) -> Result<f64> {
        let record = self.store.read().await.find_by_id(id)?.clone();
        let mut attempt = RevealAttempt::new(id);

        let address = match self.identity.current_address().await {
            Some(address) => address,
            None => {
                attempt.transition(RevealPhase::Denied);
                return Err(EngineError::AuthorizationDenied(
                    "no active identity".to_string(),
                ));
            }
        };

        let message = self.params.challenge_message();
        attempt.transition(RevealPhase::AwaitingSignature);
        let signature = match self.identity.sign(&message).await {
            Ok(signature) => signature,
            Err(e) => {
                attempt.transition(RevealPhase::Denied);
                warn!(id, "signature request rejected: {e}");
                return Err(EngineError::AuthorizationDenied(format!(
                    "signature rejected: {e}"
                )));
            }
        };

        if !verify_signature(&address, &message, &signature) {
            attempt.transition(RevealPhase::Denied);
            warn!(id, "signature failed verification");
            return Err(EngineError::AuthorizationDenied(
                "signature verification failed".to_string(),
            ));
        }

        attempt.transition(RevealPhase::Granted);
        let value = codec::decode(&record.protected_value)?;
        self.actions.write().await.record(
            ActionKind::Decrypt,
            format!("Decrypted data: {}", record.title),
        );
        info!(id, attempt = %attempt.id, "plaintext revealed");
        Ok(value)
    }

    /// Insertion-ordered view of the current collection.
    pub async fn datasets(&self) -> Vec<DatasetRecord> {
        self.store.read().await.snapshot()
    }

    pub async fn find(&self, id: u64) -> Result<DatasetRecord> {
        Ok(self.store.read().await.find_by_id(id)?.clone())
    }

    /// Case-insensitive search over title and description with an optional
    /// category filter.
    pub async fn search(&self, query: &str, category: Option<DataCategory>) -> Vec<DatasetRecord> {
        self.store.read().await.search(query, category)
    }

    /// Audit trail, newest first.
    pub async fn actions(&self) -> Vec<ActionEntry> {
        self.actions.read().await.snapshot()
    }

    pub async fn stats(&self) -> CollectionStats {
        let snapshot = self.store.read().await.snapshot();
        CollectionStats {
            datasets: snapshot.len(),
            contributors: snapshot.iter().map(|r| r.contributors.len()).sum(),
        }
    }

    async fn require_identity(&self) -> Result<String> {
        self.identity
            .current_address()
            .await
            .ok_or_else(|| EngineError::AuthorizationDenied("no active identity".to_string()))
    }
}
