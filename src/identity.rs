//! Identity provider boundary.
//!
//! The wallet side of the system supplies exactly two things: the active
//! identity address and a "sign this message" capability. Everything else
//! about key custody stays outside the engine.

use async_trait::async_trait;
use sp_core::crypto::Ss58Codec;
use sp_core::sr25519;
use sp_core::Pair as _;

/// Wallet-supplied identity.
///
/// `sign` may suspend indefinitely while the user decides, and may be
/// rejected outright; the engine never enforces a timeout on it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The active identity address, if any.
    async fn current_address(&self) -> Option<String>;

    /// Request a hex-encoded signature over `message`. An error means the
    /// user rejected the request or the provider is unavailable.
    async fn sign(&self, message: &str) -> anyhow::Result<String>;
}

/// Local sr25519 keypair acting as its own identity provider.
///
/// Signs every message it is handed without asking anyone, which makes it
/// suitable for tests and single-user tooling only.
pub struct LocalKeypairSigner {
    pair: sr25519::Pair,
}

impl LocalKeypairSigner {
    pub fn generate() -> Self {
        let (pair, _seed) = sr25519::Pair::generate();
        Self { pair }
    }

    /// SS58-encoded address of the keypair.
    pub fn address(&self) -> String {
        self.pair.public().to_ss58check()
    }
}

#[async_trait]
impl IdentityProvider for LocalKeypairSigner {
    async fn current_address(&self) -> Option<String> {
        Some(self.address())
    }

    async fn sign(&self, message: &str) -> anyhow::Result<String> {
        Ok(hex::encode(self.pair.sign(message.as_bytes()).0))
    }
}
