use std::sync::Arc;

use facility_auth_access::{RoleResolver, SessionService};
use facility_auth_server::clients::{AllocationsClient, StaffRoster, UserOfficeClient};
use facility_auth_server::config::ServerConfig;
use facility_auth_server::{AppState, routes};
use facility_auth_tokens::TokenCodec;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Create database connection pool for the staff roster
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    // One outbound HTTP client shared by every upstream collaborator
    let http = reqwest::Client::builder()
        .build()
        .expect("failed to create HTTP client");

    let user_office = Arc::new(UserOfficeClient::new(http.clone(), config.uows.clone()));
    let resolver = RoleResolver::new(
        Arc::new(StaffRoster::new(db_pool)),
        user_office.clone(),
    );
    let sessions = SessionService::new(
        TokenCodec::new(&config.jwt_secret),
        config.tokens.access_ttl(),
        config.tokens.refresh_ttl(),
        user_office,
        resolver,
    );
    let allocations = Arc::new(AllocationsClient::new(http, config.allocations.clone()));

    let state = Arc::new(AppState::new(
        sessions,
        allocations,
        config.api_key.clone(),
        config.secure_cookies,
    ));

    let app = routes::router(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .expect("server error");
}
