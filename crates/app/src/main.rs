use engine::{Engine, loader};
use server::ServerState;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "momo_api={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let transactions = loader::load(&settings.server.seed);
    if transactions.is_empty() {
        tracing::warn!(
            "no transactions loaded from {}, serving an empty store",
            settings.server.seed
        );
    }
    let engine = Engine::builder().transactions(transactions).build();
    tracing::info!("{} transactions available", engine.len().await);

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    server::run_with_listener(ServerState::new(engine), listener, shutdown_signal()).await?;
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down server...");
}
