//! REST API handlers for the Lookup Service
//!
//! Each route maps one query kind onto the dispatcher. The response body
//! is exactly the canonical envelope bytes that were signed; the
//! signature rides in the `Body-Signature-Ed25519` header.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, HttpResponseBuilder, Result};
use serde::Serialize;

use sigchain_chain::{QueryError, SignedQuery, StoreError};

use crate::error::ServiceError;
use crate::AppState;

/// Response header carrying the detached Ed25519 signature
pub const SIGNATURE_HEADER: &str = "Body-Signature-Ed25519";

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/chain")
            .route("/export", web::get().to(export_chain))
            .route("/lasthash", web::get().to(last_hash))
            .route("/lookup/{hash}", web::get().to(lookup_hash))
            .route("/since/{hash}", web::get().to(since_hash))
            // Anything else lands in the dispatcher and comes back as a
            // signed "Unknown method" envelope
            .route("/{method}", web::get().to(dispatch_bare))
            .route("/{method}/{hash}", web::get().to(dispatch_with_hash)),
    );
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    /// Public key clients verify response signatures against
    public_key: String,
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "lookup-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        public_key: state.query.public_key_hex(),
    })
}

/// Full chain export
async fn export_chain(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let result = state.query.dispatch("export", None)?;
    Ok(signed_response(result))
}

/// Newest entry's hash pair
async fn last_hash(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let result = state.query.dispatch("lasthash", None)?;
    Ok(signed_response(result))
}

/// Single entry by current or summary hash
async fn lookup_hash(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let hash = path.into_inner();
    let result = state.query.dispatch("hash", Some(&hash))?;
    Ok(signed_response(result))
}

/// Everything strictly after a known hash
async fn since_hash(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let hash = path.into_inner();
    let result = state.query.dispatch("since", Some(&hash))?;
    Ok(signed_response(result))
}

async fn dispatch_bare(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let method = path.into_inner();
    let result = state.query.dispatch(&method, None)?;
    Ok(signed_response(result))
}

async fn dispatch_with_hash(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServiceError> {
    let (method, hash) = path.into_inner();
    let result = state.query.dispatch(&method, Some(&hash))?;
    Ok(signed_response(result))
}

/// Map the dispatch outcome to an HTTP status and emit the signed bytes
/// unmodified
fn signed_response(result: SignedQuery) -> HttpResponse {
    let status = match &result.failure {
        None => StatusCode::OK,
        Some(QueryError::Store(StoreError::NotFound | StoreError::EmptyChain)) => {
            StatusCode::NOT_FOUND
        }
        Some(QueryError::MissingHash | QueryError::UnknownMethod(_)) => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponseBuilder::new(status)
        .content_type("application/json")
        .insert_header((SIGNATURE_HEADER, result.signed.signature))
        .body(result.signed.body)
}
