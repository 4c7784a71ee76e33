//! Signed response envelopes
//!
//! The signer wraps a query result in a versioned, timestamped envelope,
//! serializes it canonically and signs the exact bytes the client will
//! receive. Error results are signed the same way as successes, so a
//! client can verify the authenticity of failures too.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use sigchain_core::{Envelope, Status};

use crate::error::{CryptoError, Result};
use crate::identity::SigningIdentity;

/// A signed envelope together with its canonical bytes.
///
/// `body` is exactly what was signed; transports must send those bytes
/// unmodified or the signature will not verify.
#[derive(Debug, Clone)]
pub struct SignedResponse {
    /// The envelope that was serialized
    pub envelope: Envelope,
    /// Canonical serialization of `envelope`
    pub body: Vec<u8>,
    /// Ed25519 signature over `body`, base64url without padding
    pub signature: String,
}

/// Produces signed envelopes with the service identity.
///
/// Holds only read-only key material; cloning is cheap and concurrent
/// signing requires no synchronization.
#[derive(Clone)]
pub struct ResponseSigner {
    identity: Arc<SigningIdentity>,
}

impl ResponseSigner {
    /// Create a signer around a loaded identity
    pub fn new(identity: Arc<SigningIdentity>) -> Self {
        Self { identity }
    }

    /// Wrap `results` in an envelope and sign its canonical bytes
    pub fn sign(&self, status: Status, results: serde_json::Value) -> Result<SignedResponse> {
        let envelope = Envelope::new(status, results);
        let body = envelope.to_canonical_bytes()?;
        let signature = URL_SAFE_NO_PAD.encode(self.identity.sign(&body));
        Ok(SignedResponse {
            envelope,
            body,
            signature,
        })
    }

    /// Public key clients verify against, lowercase hex
    pub fn public_key_hex(&self) -> String {
        self.identity.public_key_hex()
    }

    /// Public verifying key
    pub fn verifying_key(&self) -> VerifyingKey {
        self.identity.verifying_key()
    }
}

/// Verify a signed response offline and recover its envelope.
///
/// `body` must be the exact bytes received; `signature` is the
/// base64url-encoded detached signature that accompanied them.
pub fn verify_response(
    public_key: &VerifyingKey,
    body: &[u8],
    signature: &str,
) -> Result<Envelope> {
    let raw: [u8; 64] = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| CryptoError::InvalidSignature)?
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature)?;
    public_key
        .verify(body, &Signature::from_bytes(&raw))
        .map_err(|_| CryptoError::InvalidSignature)?;
    Ok(Envelope::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signer() -> ResponseSigner {
        ResponseSigner::new(Arc::new(SigningIdentity::generate()))
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let signed = signer
            .sign(Status::Ok, json!({"current-hash": "abc", "summary-hash": null}))
            .unwrap();

        let envelope =
            verify_response(&signer.verifying_key(), &signed.body, &signed.signature).unwrap();
        assert_eq!(envelope, signed.envelope);
        assert_eq!(envelope.status, Status::Ok);
    }

    #[test]
    fn test_error_envelopes_are_signed() {
        let signer = signer();
        let signed = signer
            .sign(Status::Error, json!("No record found matching this hash."))
            .unwrap();

        let envelope =
            verify_response(&signer.verifying_key(), &signed.body, &signed.signature).unwrap();
        assert_eq!(envelope.status, Status::Error);
        assert_eq!(
            envelope.results,
            json!("No record found matching this hash.")
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let signer = signer();
        let signed = signer.sign(Status::Ok, json!(["a"])).unwrap();

        let mut body = signed.body.clone();
        let last = body.len() - 2;
        body[last] ^= 0x01;
        assert!(matches!(
            verify_response(&signer.verifying_key(), &body, &signed.signature),
            Err(CryptoError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = signer();
        let other = SigningIdentity::generate();
        let signed = signer.sign(Status::Ok, json!(["a"])).unwrap();

        assert!(verify_response(&other.verifying_key(), &signed.body, &signed.signature).is_err());
    }

    #[test]
    fn test_signature_covers_exact_body() {
        let signer = signer();
        let signed = signer.sign(Status::Ok, json!({"k": "v"})).unwrap();
        // The body re-serializes to itself, so no re-canonicalization is
        // ever needed before verification
        let envelope = Envelope::from_slice(&signed.body).unwrap();
        assert_eq!(envelope.to_canonical_bytes().unwrap(), signed.body);
    }
}
