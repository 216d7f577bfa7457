use anyhow::Context;
use bookshelf_app::modules;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.name,
        "bookshelf bootstrap starting"
    );

    let store = bookshelf_db::connect(&settings.database)
        .await
        .with_context(|| format!("failed to connect to MongoDB at {}", settings.database.uri))?;
    tracing::info!(database = %store.database_name(), "store connection established");

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &store, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    let served =
        bookshelf_http::start_server(&registry, &settings, bookshelf_http::shutdown_signal()).await;

    let stopped = registry.stop_modules().await;
    store.shutdown().await;

    served?;
    stopped
}
