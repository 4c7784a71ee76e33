//! Lookup Service
//!
//! Serves read access to the sigchain ledger. Every response, success
//! or error, is a signed envelope; the detached signature travels in the
//! `Body-Signature-Ed25519` header so clients can verify authenticity
//! without trusting the transport.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod api;
mod error;

use sigchain_chain::{ChainQueryService, SledChainStore};
use sigchain_crypto::{ResponseSigner, SigningIdentity};

/// Lookup Service CLI arguments
#[derive(Parser, Debug)]
#[command(name = "lookup-service")]
#[command(about = "Sigchain signed ledger lookup service")]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Storage path for the chain database
    #[arg(long, default_value = "./data/chain")]
    storage_path: String,

    /// Path to the hex-encoded Ed25519 seed; generated if absent
    #[arg(long, default_value = "./data/signing-key")]
    signing_key: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Application state shared across handlers
pub struct AppState {
    pub query: Arc<ChainQueryService>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting Lookup Service");
    info!("Storage path: {}", args.storage_path);

    // A missing or corrupt signing key is fatal: no response can be
    // produced without it.
    if let Some(parent) = std::path::Path::new(&args.signing_key).parent() {
        std::fs::create_dir_all(parent).context("Failed to create key directory")?;
    }
    let identity = Arc::new(
        SigningIdentity::load_or_create(&args.signing_key)
            .context("Failed to load signing key")?,
    );
    info!("Response signing key: {}", identity.public_key_hex());

    let store = Arc::new(
        SledChainStore::open(&args.storage_path).context("Failed to open chain store")?,
    );
    let query = Arc::new(ChainQueryService::new(
        store,
        ResponseSigner::new(identity),
    ));

    let app_state = web::Data::new(AppState { query });

    info!("Binding to {}:{}", args.host, args.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure_routes)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    Ok(())
}
