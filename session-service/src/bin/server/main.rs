use std::sync::Arc;

use session_service::config::Config;
use session_service::inbound::http::router::create_router;
use session_service::outbound::credential::PgCredentialService;
use session_service::outbound::repositories::PgPasswordResetStore;
use session_service::outbound::repositories::PgUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cookie_name = %config.session.cookie_name,
        cookie_path = %config.session.cookie_path,
        cookie_expiry_seconds = config.session.cookie_expiry_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PgUserStore::new(pg_pool.clone()));
    let credential_service = Arc::new(PgCredentialService::new(pg_pool.clone()));
    let password_resets = Arc::new(PgPasswordResetStore::new(pg_pool));

    let application = create_router(
        user_store,
        credential_service,
        password_resets,
        config.session.cookie_settings(),
    );

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(listener, application).await?;

    Ok(())
}
