use anyhow::Context;
use hrbase::{api, default_plan, Backend, Config, CredentialChecker, Migrator, SupabaseBackend};
use std::net::SocketAddr;
use std::sync::Arc;

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

    let backend: Arc<dyn Backend> = Arc::new(
        SupabaseBackend::from_config(&config).context("Failed to build Supabase client")?,
    );

    let initialization = if config.init_on_start {
        let report = Migrator::from_config(backend.clone(), &config)
            .run(&default_plan())
            .await;
        Some(report)
    } else {
        tracing::info!("Schema initialization disabled by INIT_ON_START");
        None
    };

    let checker = Arc::new(CredentialChecker::new(backend));
    let app = api::create_router(api::AppState::new(checker, initialization));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
