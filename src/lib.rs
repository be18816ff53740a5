//! Protected research dataset engine.
//!
//! Multiple parties register research datasets whose sensitive numeric
//! payload is protected by a reversible codec, persist them behind a single
//! key in an external key-value ledger, run a fixed set of transformations
//! against the protected payload without exposing the plaintext in transit,
//! and reveal the plaintext only after the caller signs a session challenge
//! message.
//!
//! This crate is a library consumed by an interaction layer; it has no CLI
//! or server surface of its own. The ledger and the wallet are collaborator
//! boundaries ([`ledger::LedgerClient`], [`identity::IdentityProvider`]).
//!
//! ## Module Structure
//!
//! - `codec`: reversible encode/decode of numeric payloads
//! - `dataset`: record types and the persisted wire shape
//! - `store`: in-process mirror of the session collection
//! - `ledger`: ledger client boundary and full-snapshot gateway
//! - `compute`: fixed operation set over protected values
//! - `auth`: challenge parameters, signatures, reveal attempts
//! - `identity`: wallet/identity provider boundary
//! - `actions`: session-scoped audit trail
//! - `config`: engine configuration
//! - `engine`: session engine tying the pieces together

/// Session-scoped audit trail
pub mod actions;

/// Challenge parameters and reveal authorization
pub mod auth;

/// Reversible protection codec
pub mod codec;

/// Fixed operation set over protected values
pub mod compute;

/// Engine configuration
pub mod config;

/// Dataset record types and wire shape
pub mod dataset;

/// Session engine
pub mod engine;

/// Error taxonomy
pub mod error;

/// Wallet/identity provider boundary
pub mod identity;

/// Ledger client boundary and gateway
pub mod ledger;

/// In-process dataset mirror
pub mod store;

/// Shared utilities
pub mod util;

pub use actions::{ActionEntry, ActionKind, ActionLog};
pub use auth::{
    generate_public_key, verify_signature, ChallengeParams, RevealAttempt, RevealPhase,
};
pub use codec::{decode, encode, TOKEN_PREFIX};
pub use compute::Operation;
pub use config::{EngineConfig, DEFAULT_COLLECTION_KEY, DEFAULT_WINDOW_DURATION_DAYS};
pub use dataset::{DataCategory, DatasetRecord, NewDataset};
pub use engine::{CollectionStats, ResearchEngine};
pub use error::{EngineError, Result};
pub use identity::{IdentityProvider, LocalKeypairSigner};
pub use ledger::{InMemoryLedger, LedgerClient, LedgerGateway};
pub use store::DatasetStore;
