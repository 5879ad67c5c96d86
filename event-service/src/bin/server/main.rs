use std::sync::Arc;

use auth::Authenticator;
use event_service::config::Config;
use event_service::config::StorageBackend;
use event_service::domain::event::service::EventService;
use event_service::domain::session::service::SessionService;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::memory::InMemoryEventRepository;
use event_service::outbound::memory::InMemorySessionStore;
use event_service::outbound::memory::InMemoryUserRepository;
use event_service::outbound::repositories::PostgresEventRepository;
use event_service::outbound::repositories::PostgresSessionStore;
use event_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "event-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage_backend = ?config.storage.backend,
        session_ttl_days = config.jwt.session_ttl_days,
        token_header = %config.auth.token_header,
        "Configuration loaded"
    );

    if config.jwt.secret.is_empty() {
        anyhow::bail!("jwt.secret must be set (JWT__SECRET)");
    }

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.session_ttl(),
    ));

    let http_application = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
            let event_repository = Arc::new(PostgresEventRepository::new(pg_pool.clone()));
            let session_store = Arc::new(PostgresSessionStore::new(pg_pool));

            create_router(
                Arc::new(UserService::new(
                    Arc::clone(&user_repository),
                    Arc::clone(&authenticator),
                )),
                Arc::new(EventService::new(event_repository)),
                Arc::new(SessionService::new(
                    user_repository,
                    session_store,
                    Arc::clone(&authenticator),
                )),
                &config.auth.token_header,
            )?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");

            let user_repository = Arc::new(InMemoryUserRepository::new());

            create_router(
                Arc::new(UserService::new(
                    Arc::clone(&user_repository),
                    Arc::clone(&authenticator),
                )),
                Arc::new(EventService::new(Arc::new(InMemoryEventRepository::new()))),
                Arc::new(SessionService::new(
                    user_repository,
                    Arc::new(InMemorySessionStore::new()),
                    Arc::clone(&authenticator),
                )),
                &config.auth.token_header,
            )?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
