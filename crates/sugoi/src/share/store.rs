use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::domain::{Love, Scores, ShareId};

/// Flat field/value mapping stored under one key.
pub type RecordFields = BTreeMap<String, String>;

const KEY_PREFIX: &str = "love:";

const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_LINK: &str = "link";
const FIELD_COMMENT: &str = "comment";
const FIELD_CREATED_AT: &str = "createdAt";
const FIELD_SCORES: &str = "scores";
const FIELD_SHARE_PATH: &str = "sharePath";

/// Store key of a love record.
pub fn love_key(id: impl fmt::Display) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Hash-map style persistence port.
///
/// `set` overwrites whatever lived at the key; `get_all` reports absence as `None`.
/// Writes are atomic per key, with no guarantees across keys.
#[async_trait]
pub trait ShareRecordStore: Send + Sync {
    async fn set(&self, key: &str, fields: RecordFields) -> Result<(), StoreError>;
    async fn get_all(&self, key: &str) -> Result<Option<RecordFields>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored record at `{key}` is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

/// A record is share-ready once it carries a non-empty `sharePath`.
pub fn is_share_ready(fields: &RecordFields) -> bool {
    fields
        .get(FIELD_SHARE_PATH)
        .is_some_and(|share_path| !share_path.is_empty())
}

impl Love {
    /// Flatten into store fields; absent optionals are omitted and scores are a JSON object.
    pub fn to_fields(&self) -> RecordFields {
        let mut fields = RecordFields::new();
        fields.insert(FIELD_ID.to_string(), self.id.to_string());
        fields.insert(FIELD_NAME.to_string(), self.name.clone());
        if let Some(link) = &self.link {
            fields.insert(FIELD_LINK.to_string(), link.clone());
        }
        if let Some(comment) = &self.comment {
            fields.insert(FIELD_COMMENT.to_string(), comment.clone());
        }
        fields.insert(FIELD_CREATED_AT.to_string(), self.created_at.to_string());
        fields.insert(FIELD_SCORES.to_string(), encode_scores(&self.scores));
        if let Some(share_path) = &self.share_path {
            fields.insert(FIELD_SHARE_PATH.to_string(), share_path.clone());
        }
        fields
    }

    pub fn from_fields(key: &str, mut fields: RecordFields) -> Result<Self, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            key: key.to_string(),
            reason,
        };
        let mut required = |field: &str| {
            fields
                .remove(field)
                .ok_or_else(|| corrupt(format!("missing `{field}`")))
        };

        let id = ShareId(required(FIELD_ID)?);
        let name = required(FIELD_NAME)?;
        let created_at = required(FIELD_CREATED_AT)?
            .parse::<i64>()
            .map_err(|err| corrupt(format!("`{FIELD_CREATED_AT}` is not an integer: {err}")))?;
        let scores = serde_json::from_str::<Scores>(&required(FIELD_SCORES)?)
            .map_err(|err| corrupt(format!("`{FIELD_SCORES}` is not a scores object: {err}")))?;

        Ok(Self {
            id,
            name,
            link: fields.remove(FIELD_LINK).filter(|link| !link.is_empty()),
            comment: fields.remove(FIELD_COMMENT).filter(|comment| !comment.is_empty()),
            created_at,
            scores,
            share_path: fields
                .remove(FIELD_SHARE_PATH)
                .filter(|share_path| !share_path.is_empty()),
        })
    }
}

fn encode_scores(scores: &Scores) -> String {
    serde_json::json!({
        "love": scores.love,
        "usefulness": scores.usefulness,
        "usage": scores.usage,
        "value": scores.value,
    })
    .to_string()
}

/// Process-local store, used when no external backend is configured and in tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryShareStore {
    records: Arc<Mutex<HashMap<String, RecordFields>>>,
}

impl InMemoryShareStore {
    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ShareRecordStore for InMemoryShareStore {
    async fn set(&self, key: &str, fields: RecordFields) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        guard.insert(key.to_string(), fields);
        Ok(())
    }

    async fn get_all(&self, key: &str) -> Result<Option<RecordFields>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }
}
