use std::net::SocketAddr;
use std::path::Path;

use sqlx::migrate::Migrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rewards_core::{AppState, config::Config, create_app, db, startup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database pool
    let pool = db::create_pool(&config).await?;

    // Run migrations
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;
    tracing::info!("Database migrations completed");

    let report = startup::validate_environment(&config, &pool).await?;
    report.print();
    if !report.is_valid() {
        anyhow::bail!("Startup validation failed");
    }

    let app = create_app(AppState::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
