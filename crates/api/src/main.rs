use anyhow::Context;

use catalog_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = Config::from_env().context("failed to load configuration")?;

    let state = catalog_api::app::services::build_state(&config)
        .await
        .context("failed to open product store")?;
    let app = catalog_api::app::build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    catalog_api::app::serve(listener, app).await?;
    Ok(())
}
