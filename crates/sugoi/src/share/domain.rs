use std::fmt;

use serde::{Deserialize, Serialize};

use super::scoring;

/// Opaque 7-character identifier of a shared love record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(pub(crate) String);

impl ShareId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical public path of the record, never configurable per record.
    pub fn share_path(&self) -> String {
        format!("/share/{}", self.0)
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four slider ratings, each expected in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub love: f64,
    pub usefulness: f64,
    pub usage: f64,
    pub value: f64,
}

impl Scores {
    pub fn new(love: f64, usefulness: f64, usage: f64, value: f64) -> Self {
        Self {
            love,
            usefulness,
            usage,
            value,
        }
    }

    /// Weighted total, rounded to two decimals.
    pub fn total(&self) -> f64 {
        scoring::total(self)
    }

    pub(crate) fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("love", self.love),
            ("usefulness", self.usefulness),
            ("usage", self.usage),
            ("value", self.value),
        ]
    }
}

/// Raw creation payload as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveSubmission {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub scores: Scores,
}

/// Submission that passed validation; empty optional strings are normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLove {
    pub id: Option<ShareId>,
    pub name: String,
    pub link: Option<String>,
    pub comment: Option<String>,
    pub scores: Scores,
}

/// Persisted love record.
///
/// `share_path` doubles as the "share ready" marker: the read path never
/// exposes a record without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Love {
    pub id: ShareId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    pub scores: Scores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_path: Option<String>,
}

impl Love {
    pub fn is_shareable(&self) -> bool {
        self.share_path.is_some()
    }

    pub fn total(&self) -> f64 {
        self.scores.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn love_serializes_with_camel_case_and_omits_absent_fields() {
        let love = Love {
            id: ShareId("abc1234".to_string()),
            name: "Rust".to_string(),
            link: None,
            comment: Some("fearless".to_string()),
            created_at: 1_700_000_000_000,
            scores: Scores::new(100.0, 100.0, 50.0, 25.0),
            share_path: Some("/share/abc1234".to_string()),
        };

        let value = serde_json::to_value(&love).expect("serializes");
        assert_eq!(
            value,
            json!({
                "id": "abc1234",
                "name": "Rust",
                "comment": "fearless",
                "createdAt": 1_700_000_000_000_i64,
                "scores": { "love": 100.0, "usefulness": 100.0, "usage": 50.0, "value": 25.0 },
                "sharePath": "/share/abc1234",
            })
        );
    }

    #[test]
    fn submission_accepts_missing_optional_fields() {
        let submission: LoveSubmission = serde_json::from_value(json!({
            "name": "Code",
            "scores": { "love": 0, "usefulness": 50, "usage": 0, "value": 0 },
        }))
        .expect("deserializes");

        assert_eq!(submission.link, None);
        assert_eq!(submission.comment, None);
        assert_eq!(submission.id, None);
        assert_eq!(submission.scores.usefulness, 50.0);
    }

    #[test]
    fn share_path_is_derived_from_id() {
        assert_eq!(ShareId("Xy_-123".to_string()).share_path(), "/share/Xy_-123");
    }
}
