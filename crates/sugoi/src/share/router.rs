use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::error;
use url::Url;

use super::links::ShareCard;
use super::service::{ShareService, ShareServiceError};
use super::store::ShareRecordStore;
use super::validation::{validate_payload, ValidationError};

/// Shared handler state: the service plus the public site URL for absolute links.
pub struct ShareState<S: ?Sized> {
    pub service: Arc<ShareService<S>>,
    pub site_url: Arc<Url>,
}

impl<S: ?Sized> Clone for ShareState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            site_url: Arc::clone(&self.site_url),
        }
    }
}

/// Router builder exposing share creation and retrieval.
pub fn share_router<S>(service: Arc<ShareService<S>>, site_url: Url) -> Router
where
    S: ShareRecordStore + ?Sized + 'static,
{
    let state = ShareState {
        service,
        site_url: Arc::new(site_url),
    };

    Router::new()
        .route("/api/create", post(create_handler::<S>))
        .route("/share/{id}", get(share_handler::<S>))
        .with_state(state)
}

/// Creation endpoint. The body is decoded by hand so clients that omit a JSON
/// content type are still served. Unparseable JSON is a server-side failure;
/// a parseable body of the wrong shape reports every failing field.
pub(crate) async fn create_handler<S>(State(state): State<ShareState<S>>, body: Bytes) -> Response
where
    S: ShareRecordStore + ?Sized + 'static,
{
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!(
                error = %err,
                category = ?err.classify(),
                "failed to parse create request body"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let validated = match validate_payload(&payload) {
        Ok(validated) => validated,
        Err(error) => return validation_response(error),
    };

    match state.service.create_validated(validated).await {
        Ok(love) => (StatusCode::OK, axum::Json(love)).into_response(),
        Err(ShareServiceError::Validation(error)) => validation_response(error),
        Err(other) => {
            error!(error = %other, "failed to create shared love");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) async fn share_handler<S>(
    State(state): State<ShareState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: ShareRecordStore + ?Sized + 'static,
{
    match state.service.get_by_share_id(&id).await {
        Ok(love) => {
            let card = ShareCard::build(&state.site_url, love);
            (StatusCode::OK, axum::Json(card)).into_response()
        }
        Err(ShareServiceError::NotFound(_)) => {
            let payload = json!({
                "error": "not found",
                "id": id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, %id, "failed to load shared love");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn validation_response(error: ValidationError) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(error.issues)).into_response()
}
