//! Love scoring and sharing: validate a submission, persist it under a short id,
//! and serve it back with share links computed at display time.

pub mod domain;
pub mod id;
pub mod links;
pub mod redis_store;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Love, LoveSubmission, Scores, ShareId, ValidatedLove};
pub use links::ShareCard;
pub use redis_store::RedisShareStore;
pub use router::{share_router, ShareState};
pub use scoring::{breakdown, format_total, total, ScoreBreakdown};
pub use service::{ShareService, ShareServiceError};
pub use store::{
    is_share_ready, love_key, InMemoryShareStore, RecordFields, ShareRecordStore, StoreError,
};
pub use validation::{
    validate_metadata, validate_payload, validate_submission, FieldIssue, ShareMetadata,
    ValidationError,
};
