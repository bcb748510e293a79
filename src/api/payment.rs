use std::sync::Arc;

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ApiError, Json, Result};
use crate::config::AppConfig;
use crate::gateway::stk::StkPushOutcome;
use crate::gateway::{DarajaGateway, phone};

const MIN_AMOUNT: i64 = 1;
const MAX_AMOUNT: i64 = 100_000;
const DEFAULT_DESCRIPTION: &str = "Chama Contribution";

#[derive(Debug, Deserialize)]
pub struct InitiatePaymentRequest {
    #[serde(default)]
    phone: Option<String>,
    amount: i64,
    reference: String,
    #[serde(default)]
    description: Option<String>,
}

/// Validates a payment intent and submits it to the gateway. Gateway
/// failures still produce a 200 with `success: false` so the web client
/// can always read the outcome body.
#[instrument(skip_all)]
pub async fn initiate_payment(
    State(gateway): State<DarajaGateway>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<axum::Json<StkPushOutcome>> {
    let phone = request.phone.as_deref().map(str::trim).unwrap_or_default();
    if phone.is_empty() {
        return Err(ApiError::Validation("Phone number is required".to_string()));
    }
    if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&request.amount) {
        return Err(ApiError::Validation(
            "Amount must be between 1 and 100,000".to_string(),
        ));
    }
    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);

    info!(reference = %request.reference, amount = request.amount, "initiating stk push");
    let outcome = gateway
        .stk_push(phone, request.amount, &request.reference, description)
        .await;
    Ok(axum::Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct FormatPhoneRequest {
    #[serde(default)]
    phone: String,
}

#[derive(Debug, Serialize)]
pub struct FormatPhoneResponse {
    original: String,
    formatted: String,
    valid: bool,
}

/// Previews phone normalization without touching the gateway.
pub async fn format_phone(
    Json(request): Json<FormatPhoneRequest>,
) -> axum::Json<FormatPhoneResponse> {
    let formatted = phone::normalize(&request.phone);
    let valid = formatted.len() == 12 && formatted.starts_with("254");
    axum::Json(FormatPhoneResponse {
        original: request.phone,
        formatted,
        valid,
    })
}

pub async fn health(State(config): State<Arc<AppConfig>>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "chama_name": config.chama_name,
        "deployed": true,
        "environment": config.environment.to_string(),
        "phone_formatting": "flexible",
    }))
}
