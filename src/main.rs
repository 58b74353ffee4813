use solaris_mission_control::config::Config;
use solaris_mission_control::db::Database;
use solaris_mission_control::handlers::{build_router, AppState};
use solaris_mission_control::lead_storage::PgLeadStore;
use solaris_mission_control::mailer::ResendMailer;
use solaris_mission_control::services::SubmissionService;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Wires configuration, the lazily connected lead store, the Resend client
/// and the HTTP routes, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solaris_mission_control=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // The pool is opened by the first submission, not here
    let db = Arc::new(Database::new(
        config.database_url.clone(),
        config.db_max_connections,
    ));
    let store = Arc::new(PgLeadStore::new(db));
    tracing::info!("Lead store ready (connects on first use)");

    let mailer = Arc::new(ResendMailer::from_config(&config)?);
    tracing::info!("✓ Resend client initialized: {}", config.resend_base_url);

    let app_state = Arc::new(AppState {
        submissions: SubmissionService::from_config(&config, store, mailer),
        forwarded_for_header: config.forwarded_for_header.clone(),
        legacy_error_status: config.legacy_error_status,
    });

    let app = build_router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
