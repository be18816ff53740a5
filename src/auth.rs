//! Authorization for plaintext reveals.
//!
//! Provides:
//! - Session challenge parameters and the deterministic challenge message
//! - Sr25519 signature verification
//! - Reveal attempt state tracking
//!
//! A reveal is gated on a signature over the session's challenge message.
//! Authorization is requested fresh on every reveal; a prior grant is never
//! cached across calls.

use rand::RngCore;
use sp_core::crypto::Ss58Codec;
use sp_core::sr25519::{Public, Signature};
use tracing::debug;
use uuid::Uuid;

use crate::util::unix_timestamp;

/// Hex characters in a session public key, after the `0x` prefix.
const PUBLIC_KEY_HEX_CHARS: usize = 2000;

// ============================================================================
// CHALLENGE PARAMETERS
// ============================================================================

/// Session-scoped parameters every challenge message is built from.
///
/// Created once at session start and immutable for the session's lifetime.
#[derive(Debug, Clone)]
pub struct ChallengeParams {
    /// Freshly generated per session, opaque high-entropy string.
    pub public_key: String,
    pub ledger_address: String,
    pub network_id: u64,
    /// Start of the authorization window, Unix seconds.
    pub window_start: i64,
    pub window_duration_days: u32,
}

impl ChallengeParams {
    /// Create parameters for a fresh session with a newly generated public
    /// key and a window starting now.
    pub fn generate(
        ledger_address: impl Into<String>,
        network_id: u64,
        window_duration_days: u32,
    ) -> Self {
        Self {
            public_key: generate_public_key(),
            ledger_address: ledger_address.into(),
            network_id,
            window_start: unix_timestamp(),
            window_duration_days,
        }
    }

    /// Build the challenge message: one labelled field per line, fixed
    /// order, no trailing newline.
    pub fn challenge_message(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.ledger_address,
            self.network_id,
            self.window_start,
            self.window_duration_days
        )
    }
}

/// Generate a session public key: `0x` followed by 2000 hex characters of
/// fresh entropy.
pub fn generate_public_key() -> String {
    let mut bytes = [0u8; PUBLIC_KEY_HEX_CHARS / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

// ============================================================================
// SIGNATURE VERIFICATION
// ============================================================================

/// Verify an sr25519 signature.
///
/// # Arguments
/// * `address` - SS58-encoded public key of the signer
/// * `message` - The message that was signed (plaintext)
/// * `signature_hex` - Hex-encoded signature (64 bytes = 128 hex chars)
pub fn verify_signature(address: &str, message: &str, signature_hex: &str) -> bool {
    let public_key = match Public::from_ss58check(address) {
        Ok(pk) => pk,
        Err(e) => {
            debug!("failed to parse SS58 address: {e}");
            return false;
        }
    };

    let sig_hex = signature_hex
        .strip_prefix("0x")
        .unwrap_or(signature_hex)
        .to_lowercase();

    let sig_bytes = match hex::decode(&sig_hex) {
        Ok(b) => b,
        Err(e) => {
            debug!("failed to decode signature hex: {e}");
            return false;
        }
    };

    if sig_bytes.len() != 64 {
        debug!("invalid signature length: {} (expected 64)", sig_bytes.len());
        return false;
    }

    let mut sig_array = [0u8; 64];
    sig_array.copy_from_slice(&sig_bytes);
    let signature = Signature::from_raw(sig_array);

    use sp_core::Pair;
    sp_core::sr25519::Pair::verify(&signature, message.as_bytes(), &public_key)
}

// ============================================================================
// REVEAL ATTEMPTS
// ============================================================================

/// Phases of a single reveal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    AwaitingSignature,
    Granted,
    Denied,
}

/// One authorization-gated reveal attempt.
///
/// Attempts are independent of each other; two in-flight reveals, even for
/// the same record, do not coordinate.
#[derive(Debug, Clone)]
pub struct RevealAttempt {
    pub id: Uuid,
    pub record_id: u64,
    pub phase: RevealPhase,
    pub started_at: i64,
}

impl RevealAttempt {
    pub fn new(record_id: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id,
            phase: RevealPhase::Idle,
            started_at: unix_timestamp(),
        }
    }

    pub(crate) fn transition(&mut self, phase: RevealPhase) {
        debug!(attempt = %self.id, record_id = self.record_id, ?phase, "reveal attempt transition");
        self.phase = phase;
    }
}
