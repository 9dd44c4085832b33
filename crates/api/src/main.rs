use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inflio_api::clients::context7::Context7Client;
use inflio_api::clients::generation::GenerationClient;
use inflio_api::config::ServerConfig;
use inflio_api::router::build_app_router;
use inflio_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inflio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = inflio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    inflio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    inflio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Object storage ---
    let storage = inflio_storage::S3Provider::from_env(config.public_storage_url.clone()).await;
    tracing::info!("Object storage client created");

    // --- Outbound clients ---
    let http = reqwest::Client::new();
    let generation = GenerationClient::new(
        http.clone(),
        config.generation_api_base.clone(),
        config.generation_api_key.clone(),
    );
    let context7 = Context7Client::new(
        http.clone(),
        config.context7_base_url.clone(),
        config.context7_api_key.clone(),
    );
    if !context7.is_configured() {
        tracing::info!("Context7 key absent; search will answer from the static table");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
        generation: Arc::new(generation),
        context7: Arc::new(context7),
        http,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Server ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve when SIGINT (Ctrl+C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
