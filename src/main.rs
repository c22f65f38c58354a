use anyhow::Context;
use loopcalc::{api, config::Config};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    tracing::info!(
        opener_mode = %config.opener_mode,
        solver_tolerance = config.solver.tolerance,
        solver_max_iterations = config.solver.max_iterations,
        sweep_samples = config.sweep_samples,
        "Calculator configured"
    );

    let app = api::create_router(api::AppState::new(config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
