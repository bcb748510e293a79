use std::fmt::Display;

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use crate::gateway::ErrorCode;
use crate::state::AppState;

pub mod callback;
pub mod payment;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by the inbound API surface itself, as opposed to gateway
/// failures which travel inside a successful response body.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(message) => write!(f, "validation: {message}"),
            ApiError::Internal(detail) => write!(f, "internal: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error) = match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, ErrorCode::Validation, message)
            }
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Internal,
                format!("Server error: {detail}"),
            ),
        };
        let body = axum::Json(serde_json::json!({
            "success": false,
            "error": error,
            "error_code": code,
        }));
        (status, body).into_response()
    }
}

/// Json extractor that rejects malformed bodies with the api's own error
/// shape instead of axum's plain-text default.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.to_string()))?;
        Ok(Self(value))
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/health", get(payment::health))
        .route("/initiate-payment", post(payment::initiate_payment))
        .route("/format-phone", post(payment::format_phone))
        .route("/callback", post(callback::acknowledge))
}

/// Static contribution page served at the root.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
