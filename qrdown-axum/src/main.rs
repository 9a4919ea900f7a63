use anyhow::Result;
use qrdown_axum::ServerConfig;
use qrdown_blob::{BlobAdapter, S3CompatibleStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env();

    let store = S3CompatibleStore::from_env().await;
    info!(
        bucket = %store.config().bucket,
        region = %store.config().region,
        "object store configured"
    );

    let app = qrdown_axum::build(BlobAdapter::new(store), &config);

    let addr = config.addr();
    info!("listening on http://{addr}");

    app.listen(addr).await?;

    Ok(())
}
