//! blog-server entry point
//!
//! `blog-server` serves the API and pages; `blog-server seed` writes demo data
//! and exits.

use blog_server::{AppState, Config, api, logger, seed};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(config.log_dir.as_deref());
    shared::error::expose_internal_details(config.expose_error_details);

    let state = AppState::new(&config).await?;

    match std::env::args().nth(1).as_deref() {
        Some("seed") => {
            let report = seed::run(&state.pool)
                .await
                .map_err(|e| e.context("Seed failed"))?;
            println!(
                "Seed complete: {} user(s), {} post(s) created",
                report.users_created, report.posts_created
            );
            return Ok(());
        }
        Some(other) => return Err(format!("unknown command '{other}' (expected: seed)").into()),
        None => {}
    }

    tracing::info!(
        "Starting blog-server (env: {}, db: {})",
        config.environment,
        config.database_url
    );

    let app = api::build_app(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("blog-server HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("blog-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
