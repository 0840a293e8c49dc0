use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::warn;

use crate::error::panic_response;

use super::domain::LoanApplicationRequest;
use super::service::{ApplicationIdGenerator, Clock, PrequalificationError, PrequalificationService};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Body of every 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadRequestBody {
    pub message: String,
    pub reason: String,
}

impl BadRequestBody {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            message: INVALID_BODY_MESSAGE.to_string(),
            reason: reason.into(),
        }
    }
}

fn bad_request(reason: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(BadRequestBody::new(reason))).into_response()
}

/// Router exposing the submission endpoint. Handler panics become a generic 500.
pub fn prequalification_router<G, C>(service: Arc<PrequalificationService<G, C>>) -> Router
where
    G: ApplicationIdGenerator + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/loans", post(submit_handler::<G, C>))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(service)
}

pub(crate) async fn submit_handler<G, C>(
    State(service): State<Arc<PrequalificationService<G, C>>>,
    payload: Result<Json<LoanApplicationRequest>, JsonRejection>,
) -> Response
where
    G: ApplicationIdGenerator + 'static,
    C: Clock + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable submission body");
            return bad_request(rejection.body_text());
        }
    };

    match service.submit(&request) {
        Ok(decision) => (StatusCode::OK, Json(decision)).into_response(),
        Err(PrequalificationError::Validation(error)) => bad_request(error.to_string()),
    }
}
