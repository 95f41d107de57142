use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::domain::{LoveSubmission, Scores, ShareId, ValidatedLove};
use super::id::SHARE_ID_LEN;

pub const NAME_MAX_LEN: usize = 64;
pub const COMMENT_MIN_LEN: usize = 2;
pub const COMMENT_MAX_LEN: usize = 256;
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// A single failing field, addressed by its JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    pub fn new<P: Into<String>>(
        path: impl IntoIterator<Item = P>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> String {
        self.path.join(".")
    }
}

/// Every failing field of a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input: {}", .issues.iter().map(FieldIssue::field).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(issue: FieldIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn fields(&self) -> Vec<String> {
        self.issues.iter().map(FieldIssue::field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

/// Normalized share metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMetadata {
    pub name: String,
    pub link: Option<String>,
    pub comment: Option<String>,
}

/// Check `name`, `link` and `comment`, collecting every failure.
pub fn validate_metadata(
    name: &str,
    link: Option<&str>,
    comment: Option<&str>,
) -> Result<ShareMetadata, ValidationError> {
    let mut issues = Vec::new();
    let metadata = check_metadata(name, link, comment, &mut issues);
    finish(metadata, issues)
}

/// Full creation-payload check: metadata, optional client id, and score ranges.
pub fn validate_submission(
    submission: &LoveSubmission,
) -> Result<ValidatedLove, ValidationError> {
    let mut issues = Vec::new();

    let metadata = check_metadata(
        &submission.name,
        submission.link.as_deref(),
        submission.comment.as_deref(),
        &mut issues,
    );
    let id = check_id(submission.id.as_deref(), &mut issues);
    check_scores(&submission.scores, &mut issues);

    let metadata = finish(metadata, issues)?;
    Ok(ValidatedLove {
        id,
        name: metadata.name,
        link: metadata.link,
        comment: metadata.comment,
        scores: submission.scores,
    })
}

/// Check a decoded JSON creation body. Missing or mistyped fields are reported
/// alongside rule failures of the fields that did decode, in field order.
pub fn validate_payload(body: &Value) -> Result<ValidatedLove, ValidationError> {
    let Some(object) = body.as_object() else {
        return Err(ValidationError::single(FieldIssue::new(
            Vec::<String>::new(),
            expected("object", body),
        )));
    };

    let mut issues = Vec::new();

    let name = match object.get("name") {
        None => {
            issues.push(FieldIssue::new(["name"], REQUIRED));
            None
        }
        Some(Value::String(name)) => {
            check_name(name, &mut issues);
            Some(name.clone())
        }
        Some(other) => {
            issues.push(FieldIssue::new(["name"], expected("string", other)));
            None
        }
    };
    let link = optional_string(object, "link", &mut issues);
    let link = check_link(link, &mut issues);
    let comment = optional_string(object, "comment", &mut issues);
    let comment = check_comment(comment, &mut issues);
    let id = optional_string(object, "id", &mut issues);
    let id = check_id(id, &mut issues);
    let scores = decode_scores(object.get("scores"), &mut issues);
    if let Some(scores) = &scores {
        check_scores(scores, &mut issues);
    }

    match (name, scores) {
        (Some(name), Some(scores)) if issues.is_empty() => Ok(ValidatedLove {
            id,
            name,
            link,
            comment,
            scores,
        }),
        _ => Err(ValidationError { issues }),
    }
}

const REQUIRED: &str = "Required";

fn check_metadata(
    name: &str,
    link: Option<&str>,
    comment: Option<&str>,
    issues: &mut Vec<FieldIssue>,
) -> ShareMetadata {
    check_name(name, issues);
    ShareMetadata {
        name: name.to_string(),
        link: check_link(link, issues),
        comment: check_comment(comment, issues),
    }
}

fn check_name(name: &str, issues: &mut Vec<FieldIssue>) {
    let name_len = name.chars().count();
    if name_len == 0 {
        issues.push(FieldIssue::new(["name"], "Must be 1 or more characters long"));
    } else if name_len > NAME_MAX_LEN {
        issues.push(FieldIssue::new(
            ["name"],
            format!("String must contain at most {NAME_MAX_LEN} character(s)"),
        ));
    }
}

fn check_link(link: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<String> {
    let link = non_empty(link)?;
    if Url::parse(link).is_err() {
        issues.push(FieldIssue::new(["link"], "Invalid url"));
    }
    Some(link.to_string())
}

fn check_comment(comment: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<String> {
    let comment = non_empty(comment)?;
    let len = comment.chars().count();
    if len < COMMENT_MIN_LEN {
        issues.push(FieldIssue::new(
            ["comment"],
            format!("String must contain at least {COMMENT_MIN_LEN} character(s)"),
        ));
    } else if len > COMMENT_MAX_LEN {
        issues.push(FieldIssue::new(
            ["comment"],
            format!("String must contain at most {COMMENT_MAX_LEN} character(s)"),
        ));
    }
    Some(comment.to_string())
}

fn check_id(id: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<ShareId> {
    let parsed = ShareId::parse(id?);
    if parsed.is_none() {
        issues.push(FieldIssue::new(
            ["id"],
            format!("String must contain exactly {SHARE_ID_LEN} URL-safe character(s)"),
        ));
    }
    parsed
}

fn check_scores(scores: &Scores, issues: &mut Vec<FieldIssue>) {
    for (field, score) in scores.fields() {
        if !score.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            issues.push(FieldIssue::new(
                ["scores", field],
                format!("Number must be between {SCORE_MIN} and {SCORE_MAX}"),
            ));
        }
    }
}

/// Absent is fine; `null` and non-strings are not.
fn optional_string<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a str> {
    match object.get(field)? {
        Value::String(value) => Some(value.as_str()),
        other => {
            issues.push(FieldIssue::new([field], expected("string", other)));
            None
        }
    }
}

fn decode_scores(value: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Option<Scores> {
    let object = match value {
        None => {
            issues.push(FieldIssue::new(["scores"], REQUIRED));
            return None;
        }
        Some(Value::Object(object)) => object,
        Some(other) => {
            issues.push(FieldIssue::new(["scores"], expected("object", other)));
            return None;
        }
    };

    let mut number = |field: &str| match object.get(field) {
        None => {
            issues.push(FieldIssue::new(["scores", field], REQUIRED));
            None
        }
        Some(Value::Number(number)) => number.as_f64(),
        Some(other) => {
            issues.push(FieldIssue::new(["scores", field], expected("number", other)));
            None
        }
    };

    let love = number("love");
    let usefulness = number("usefulness");
    let usage = number("usage");
    let value = number("value");
    Some(Scores::new(love?, usefulness?, usage?, value?))
}

fn expected(kind: &str, received: &Value) -> String {
    let received = match received {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("Expected {kind}, received {received}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn finish<T>(value: T, issues: Vec<FieldIssue>) -> Result<T, ValidationError> {
    if issues.is_empty() {
        Ok(value)
    } else {
        Err(ValidationError { issues })
    }
}
