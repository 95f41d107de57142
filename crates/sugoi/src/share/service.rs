use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{Love, LoveSubmission, ShareId, ValidatedLove};
use super::store::{is_share_ready, love_key, ShareRecordStore, StoreError};
use super::validation::{validate_submission, ValidationError};

/// Orchestrates validation, id assignment, and persistence of shared love records.
pub struct ShareService<S: ?Sized> {
    store: Arc<S>,
    generate_id: fn() -> ShareId,
    clock: fn() -> i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl<S> ShareService<S>
where
    S: ShareRecordStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            generate_id: ShareId::generate,
            clock: now_millis,
        }
    }

    /// Replace the id source, e.g. to force collisions in tests.
    pub fn with_id_generator(mut self, generate_id: fn() -> ShareId) -> Self {
        self.generate_id = generate_id;
        self
    }

    /// Replace the epoch-millisecond clock.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and persist a new record, returning it exactly as stored.
    ///
    /// Reusing an id overwrites the earlier record (last write wins).
    pub async fn create(&self, submission: LoveSubmission) -> Result<Love, ShareServiceError> {
        let validated = validate_submission(&submission)?;
        self.create_validated(validated).await
    }

    /// Persist a submission that already passed validation.
    pub async fn create_validated(
        &self,
        validated: ValidatedLove,
    ) -> Result<Love, ShareServiceError> {
        let generated = validated.id.is_none();
        let id = validated.id.unwrap_or_else(self.generate_id);
        let love = Love {
            share_path: Some(id.share_path()),
            id,
            name: validated.name,
            link: validated.link,
            comment: validated.comment,
            created_at: (self.clock)(),
            scores: validated.scores,
        };

        let key = love_key(&love.id);
        self.store.set(&key, love.to_fields()).await?;

        info!(id = %love.id, generated, "shared love record");
        Ok(love)
    }

    /// Look up a share-ready record by id.
    pub async fn get_by_share_id(&self, id: &str) -> Result<Love, ShareServiceError> {
        let key = love_key(id);
        debug!(%key, "looking up shared love");

        let fields = self
            .store
            .get_all(&key)
            .await?
            .ok_or_else(|| ShareServiceError::NotFound(id.to_string()))?;

        if !is_share_ready(&fields) {
            warn!(%key, "stored love has no share path; treating as not found");
            return Err(ShareServiceError::NotFound(id.to_string()));
        }

        Ok(Love::from_fields(&key, fields)?)
    }
}

/// Error raised by the share service.
#[derive(Debug, thiserror::Error)]
pub enum ShareServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("love `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
