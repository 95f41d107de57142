use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use sugoi::config::StoreConfig;
use sugoi::share::{InMemoryShareStore, RedisShareStore, ShareRecordStore, StoreError};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Construct the store client once per process from configuration.
pub(crate) async fn build_store(
    config: &StoreConfig,
) -> Result<Arc<dyn ShareRecordStore>, StoreError> {
    match config {
        StoreConfig::Memory => {
            warn!("using in-memory share store; records are lost on restart");
            Ok(Arc::new(InMemoryShareStore::default()))
        }
        StoreConfig::Redis { url } => {
            let store = RedisShareStore::connect(url).await?;
            info!("using redis share store");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_builds_an_empty_store() {
        let store = build_store(&StoreConfig::Memory)
            .await
            .expect("memory store builds");
        assert!(store
            .get_all("love:missing")
            .await
            .expect("reads")
            .is_none());
    }
}
