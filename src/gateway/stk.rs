use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DarajaGateway, ErrorCode, Result, auth, mask, phone};

const TRANSACTION_TYPE: &str = "CustomerPayBillOnline";
const DEFAULT_CUSTOMER_MESSAGE: &str = "Check your phone to complete payment";

/// Request body for the STK push endpoint. Field names follow the gateway's
/// wire casing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct StkPushRequest<'a> {
    business_short_code: &'a str,
    password: &'a str,
    timestamp: &'a str,
    transaction_type: &'a str,
    amount: i64,
    party_a: &'a str,
    party_b: &'a str,
    phone_number: &'a str,
    #[serde(rename = "CallBackURL")]
    callback_url: &'a str,
    account_reference: &'a str,
    transaction_desc: &'a str,
}

/// The synchronous acknowledgement the gateway returns when it accepts a
/// push request. Fields are optional so a sparse body still parses; the
/// asynchronous result arrives later on the callback endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StkPushAck {
    #[serde(rename = "MerchantRequestID")]
    merchant_request_id: Option<String>,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: Option<String>,
    #[serde(rename = "CustomerMessage")]
    customer_message: Option<String>,
}

/// Result of an initiate call, relayed to the web client as-is.
#[derive(Debug, Serialize)]
pub struct StkPushOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl StkPushOutcome {
    fn accepted(response: serde_json::Value, ack: StkPushAck, formatted_phone: String) -> Self {
        Self {
            success: true,
            response: Some(response),
            customer_message: Some(
                ack.customer_message
                    .unwrap_or_else(|| DEFAULT_CUSTOMER_MESSAGE.to_string()),
            ),
            checkout_request_id: ack.checkout_request_id,
            merchant_request_id: ack.merchant_request_id,
            formatted_phone: Some(formatted_phone),
            error: None,
            error_code: None,
        }
    }

    fn failed(code: ErrorCode, error: String, formatted_phone: String) -> Self {
        Self {
            success: false,
            response: None,
            customer_message: None,
            checkout_request_id: None,
            merchant_request_id: None,
            formatted_phone: Some(formatted_phone),
            error: Some(error),
            error_code: Some(code),
        }
    }
}

impl DarajaGateway {
    /// Runs the full push-payment flow: normalize the payer's number, fetch
    /// an access token, submit the push request and fold the result into a
    /// wire-ready outcome. Never returns an error; failures are encoded in
    /// the outcome so the handler can relay them verbatim.
    pub async fn stk_push(
        &self,
        phone: &str,
        amount: i64,
        reference: &str,
        description: &str,
    ) -> StkPushOutcome {
        let formatted_phone = phone::normalize(phone);

        let token = match self.access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("daraja authentication failed: {e}");
                return StkPushOutcome::failed(
                    ErrorCode::UpstreamAuth,
                    "authentication failed".to_string(),
                    formatted_phone,
                );
            }
        };

        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        let password = auth::stk_password(&self.config.shortcode, &self.config.passkey, &timestamp);
        let request = StkPushRequest {
            business_short_code: &self.config.shortcode,
            password: &password,
            timestamp: &timestamp,
            transaction_type: TRANSACTION_TYPE,
            amount,
            party_a: &formatted_phone,
            party_b: &self.config.shortcode,
            phone_number: &formatted_phone,
            callback_url: &self.config.callback_url,
            account_reference: reference,
            transaction_desc: description,
        };

        match self.submit(&token, &request).await {
            Ok((response, ack)) => StkPushOutcome::accepted(response, ack, formatted_phone),
            Err(e) => {
                warn!("stk push failed: {e}");
                StkPushOutcome::failed(e.code(), format!("STK Push failed: {e}"), formatted_phone)
            }
        }
    }

    async fn submit(
        &self,
        token: &str,
        request: &StkPushRequest<'_>,
    ) -> Result<(serde_json::Value, StkPushAck)> {
        debug!(
            "sending stk push request: {}",
            mask::secure_serializable(request)
        );
        let url = format!("{}/mpesa/stkpush/v1/processrequest", self.config.base_url);
        let res = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let status = res.status();
        if status != reqwest::StatusCode::OK {
            return Err(super::GatewayError::Status {
                status: status.as_u16(),
                body: res.text().await.unwrap_or_default(),
            });
        }
        let response: serde_json::Value = res.json().await?;
        debug!("stk push response: {}", mask::secure_value(&response));
        let ack: StkPushAck = serde_json::from_value(response.clone())?;
        Ok((response, ack))
    }
}
