use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use url::Url;

use crate::share::domain::{LoveSubmission, Scores, ShareId};
use crate::share::store::{InMemoryShareStore, RecordFields, ShareRecordStore, StoreError};
use crate::share::{share_router, ShareService};

pub(super) const FIXED_NOW: i64 = 1_735_689_600_000;

pub(super) fn fixed_clock() -> i64 {
    FIXED_NOW
}

pub(super) fn site_url() -> Url {
    Url::parse("https://sugoi.vercel.app").expect("valid site url")
}

pub(super) fn scores() -> Scores {
    Scores::new(80.0, 50.0, 25.0, 60.0)
}

pub(super) fn submission() -> LoveSubmission {
    LoveSubmission {
        name: "Rust".to_string(),
        link: Some("https://www.rust-lang.org".to_string()),
        comment: Some("Fearless concurrency".to_string()),
        id: None,
        scores: scores(),
    }
}

pub(super) fn build_service() -> (ShareService<InMemoryShareStore>, Arc<InMemoryShareStore>) {
    let store = Arc::new(InMemoryShareStore::default());
    let service = ShareService::new(store.clone()).with_clock(fixed_clock);
    (service, store)
}

pub(super) fn same_id() -> ShareId {
    ShareId("SAMEid7".to_string())
}

pub(super) fn router_with_store<S>(store: Arc<S>) -> axum::Router
where
    S: ShareRecordStore + 'static,
{
    let service = ShareService::new(store).with_clock(fixed_clock);
    share_router(Arc::new(service), site_url())
}

/// Store that fails every call, standing in for an unreachable backend.
pub(super) struct UnavailableStore;

#[async_trait]
impl ShareRecordStore for UnavailableStore {
    async fn set(&self, _key: &str, _fields: RecordFields) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_all(&self, _key: &str) -> Result<Option<RecordFields>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// In-memory store that counts writes.
#[derive(Default)]
pub(super) struct CountingStore {
    pub(super) inner: InMemoryShareStore,
    pub(super) writes: AtomicUsize,
}

impl CountingStore {
    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShareRecordStore for CountingStore {
    async fn set(&self, key: &str, fields: RecordFields) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, fields).await
    }

    async fn get_all(&self, key: &str) -> Result<Option<RecordFields>, StoreError> {
        self.inner.get_all(key).await
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
