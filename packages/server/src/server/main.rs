// Main entry point for API server

use anyhow::{Context, Result};
use brevo::{BrevoOptions, BrevoService};
use server_core::domains::auth::JwtService;
use server_core::kernel::{
    BaseOtpStore, BrevoMailer, BrevoSms, FacebookTokenVerifier, GoogleTokenVerifier,
    InMemoryOtpStore, PgOtpStore, PgPreferenceStore, PgUserStore, ServerDeps,
};
use server_core::server::build_app;
use server_core::{Config, OtpStoreKind};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AstroMatch API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Delivery channels
    let brevo = Arc::new(BrevoService::new(BrevoOptions {
        api_key: config.brevo_api_key.clone(),
        email_sender: config.email_sender.clone(),
        sms_sender: config.sms_sender.clone(),
    }));

    let otp_store: Arc<dyn BaseOtpStore> = match config.otp_store {
        OtpStoreKind::Postgres => Arc::new(PgOtpStore::new(pool.clone())),
        OtpStoreKind::Memory => {
            tracing::warn!(
                "OTP_STORE=memory: challenges will not survive restarts and \
                 must not be used with multiple server instances"
            );
            Arc::new(InMemoryOtpStore::new())
        }
    };

    let deps = Arc::new(ServerDeps {
        users: Arc::new(PgUserStore::new(pool.clone())),
        preferences: Arc::new(PgPreferenceStore::new(pool.clone())),
        otp_store,
        mailer: Arc::new(BrevoMailer(brevo.clone())),
        sms: Arc::new(BrevoSms(brevo)),
        google: Arc::new(GoogleTokenVerifier::new(config.google_client_id.clone())),
        facebook: Arc::new(FacebookTokenVerifier::new()),
        jwt_service: Arc::new(JwtService::new(&config.jwt_secret)),
    });

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
