use axum::body::Bytes;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::gateway::mask;

/// The acknowledgement shape Daraja expects from a result callback.
#[derive(Debug, Serialize)]
pub struct CallbackAck {
    #[serde(rename = "ResultCode")]
    result_code: u8,
    #[serde(rename = "ResultDesc")]
    result_desc: &'static str,
}

const ACK_SUCCESS: CallbackAck = CallbackAck {
    result_code: 0,
    result_desc: "Success",
};
const ACK_ERROR: CallbackAck = CallbackAck {
    result_code: 1,
    result_desc: "Error",
};

/// Receives the asynchronous payment result and acknowledges it.
///
/// The body is taken as raw bytes so an unparseable payload can still be
/// answered with the error acknowledgement instead of a framework
/// rejection. Payloads are logged masked; nothing is persisted.
#[instrument(skip_all)]
pub async fn acknowledge(body: Bytes) -> (StatusCode, axum::Json<CallbackAck>) {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(payload) => {
            info!("payment result callback: {}", mask::secure_value(&payload));
            (StatusCode::OK, axum::Json(ACK_SUCCESS))
        }
        Err(e) => {
            warn!("unreadable callback payload: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(ACK_ERROR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn valid_payload_is_acknowledged() {
        let body = Bytes::from(
            serde_json::json!({
                "Body": {
                    "stkCallback": {
                        "MerchantRequestID": "29115-34620561-1",
                        "CheckoutRequestID": "ws_CO_191220191020363925",
                        "ResultCode": 0,
                        "ResultDesc": "The service request is processed successfully.",
                    }
                }
            })
            .to_string(),
        );
        let (status, ack) = acknowledge(body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&ack.0).unwrap(),
            serde_json::json!({ "ResultCode": 0, "ResultDesc": "Success" })
        );
    }

    #[tokio::test]
    async fn unparseable_payload_is_answered_with_error_ack() {
        let (status, ack) = acknowledge(Bytes::from_static(b"<xml>not json</xml>")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&ack.0).unwrap(),
            serde_json::json!({ "ResultCode": 1, "ResultDesc": "Error" })
        );
    }
}
