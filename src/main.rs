use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hook_relay::dispatch::{LogSink, MemoryHookStore};
use hook_relay::server::{AppState, build_router};
use hook_relay::services::Registry;
use hook_relay::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hook_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();

    let store = match &settings.hooks_file {
        Some(path) => MemoryHookStore::load(path)
            .with_context(|| format!("loading hooks from {}", path.display()))?,
        None => {
            tracing::warn!("HOOK_RELAY_HOOKS_FILE not set, no hooks are registered");
            MemoryHookStore::new()
        }
    };
    tracing::info!(hooks = store.len(), "Loaded hooks");

    let registry = Registry::new(settings.shortener());
    let app = build_router(AppState::new(registry, store, LogSink));

    let listener = tokio::net::TcpListener::bind(settings.listen_addr)
        .await
        .with_context(|| format!("binding {}", settings.listen_addr))?;
    tracing::info!("listening on {}", settings.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
