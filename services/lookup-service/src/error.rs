//! Error types for the Lookup Service
//!
//! Recoverable query failures never surface here; the dispatcher signs
//! them into error envelopes. The only error a handler can return is a
//! signing failure, which cannot produce a signed body at all.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use sigchain_crypto::CryptoError;

/// Handler-level failures
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The signing capability failed; no signed response can be built
    #[error("Signing failure: {0}")]
    Signing(#[from] CryptoError),
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "internal_error",
            "message": "An internal error occurred"
        }))
    }
}
