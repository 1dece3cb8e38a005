use anyhow::Context;
use workforce_infra::config::AppConfig;
use workforce_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let format: LogFormat = config.log.format.parse()?;
    workforce_observability::init_with(&config.log.level, format);

    if config.uses_dev_secret() {
        tracing::warn!("auth.jwt_secret not set; using insecure dev default");
    }

    let app = workforce_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
