//! Service signing identity
//!
//! Wraps the process-wide Ed25519 signing key. The key is loaded once at
//! startup and only ever read afterwards, so concurrent signing needs no
//! locking. A missing or corrupt key file is a fatal configuration
//! error, not a per-request one.

use std::path::Path;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Ed25519 key pair identifying this service
pub struct SigningIdentity {
    signing_key: SigningKey,
}

impl SigningIdentity {
    /// Generate a new random identity
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create from an existing 32-byte seed
    pub fn from_seed_bytes(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load the identity from a hex-encoded seed file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let encoded = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CryptoError::KeyUnavailable(format!("{}: {e}", path.as_ref().display())))?;
        let mut seed: [u8; 32] = hex::decode(encoded.trim())
            .map_err(|e| CryptoError::KeyUnavailable(format!("seed is not valid hex: {e}")))?
            .try_into()
            .map_err(|_| CryptoError::KeyUnavailable("seed must be 32 bytes".to_string()))?;
        let identity = Self::from_seed_bytes(&seed);
        seed.zeroize();
        Ok(identity)
    }

    /// Load the identity from `path`, generating and persisting a fresh
    /// one if the file does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_seed_file(path);
        }
        let identity = Self::generate();
        let mut encoded = hex::encode(identity.signing_key.to_bytes());
        std::fs::write(path, &encoded)
            .map_err(|e| CryptoError::KeyUnavailable(format!("{}: {e}", path.display())))?;
        encoded.zeroize();
        Ok(identity)
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Get the public verifying key
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Get the public key as lowercase hex
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }
}

/// Parse a verifying key from its hex form
pub fn verifying_key_from_hex(encoded: &str) -> Result<VerifyingKey> {
    let bytes: [u8; 32] = hex::decode(encoded.trim())
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey("key must be 32 bytes".to_string()))?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}
