use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use nankan_analytics::adapters::http::app_router;
use nankan_analytics::adapters::{FileBlobStore, HttpExpiryNotifier, InMemoryBlobStore};
use nankan_analytics::application::MembershipStore;
use nankan_analytics::config::{AppConfig, StorageBackend, StorageConfig};
use nankan_analytics::ports::BlobStore;
use nankan_analytics::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let blobs = blob_store(&config.storage);
    info!(
        backend = ?config.storage.backend,
        namespace = blobs.namespace(),
        "membership store ready"
    );

    let store = MembershipStore::new(blobs);
    let notifier = Arc::new(HttpExpiryNotifier::from_config(&config.notification)?);
    let app = app_router(&config, store, notifier);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn blob_store(config: &StorageConfig) -> Arc<dyn BlobStore> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryBlobStore::with_namespace(&config.namespace)),
        StorageBackend::File => Arc::new(FileBlobStore::new(&config.base_path, &config.namespace)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
