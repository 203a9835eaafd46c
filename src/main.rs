use anyhow::Context;
use pet_adoption_booking::{
    adapters::mock::IdentityResolver as StaticIdentityResolver,
    adapters::postgres::{PostgresBookingRepository, PostgresPetRegistry, PostgresUserDirectory},
    api::{handlers::AppState, router::create_router},
    application::booking::{ClaimStrategy, ServiceDependencies},
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pet_adoption_booking=debug,tower_http=debug,axum=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!(
        claim_strategy = config.policy.claim_strategy.as_str(),
        transition_policy = config.policy.transition_policy.as_str(),
        auth_tokens = config.auth_tokens.len(),
        "configuration loaded"
    );

    if config.policy.claim_strategy == ClaimStrategy::CheckThenSet {
        tracing::warn!(
            "check-then-set claim strategy: concurrent requests for one pet can both be booked"
        );
    }

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    // Initialize adapters
    let service_deps = ServiceDependencies {
        pet_registry: Arc::new(PostgresPetRegistry::new(pool.clone())),
        booking_repository: Arc::new(PostgresBookingRepository::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool)),
        policy: config.policy,
    };

    // Tokens are issued by the external auth service and configured here
    let identity_resolver = Arc::new(StaticIdentityResolver::new(
        config
            .auth_tokens
            .into_iter()
            .map(|grant| (grant.token, grant.identity)),
    ));

    let app_state = Arc::new(AppState {
        service_deps,
        identity_resolver,
        contact_number: config.contact_number,
    });

    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
