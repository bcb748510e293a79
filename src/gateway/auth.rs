use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use axum_extra::headers::{self, HeaderMapExt};
use base64::{Engine, prelude::BASE64_STANDARD};
use serde::Deserialize;

use super::{DarajaGateway, GatewayError, Result};

/// Basic-auth headers for the OAuth token endpoint.
pub fn basic_auth_headers(consumer_key: &str, consumer_secret: &str) -> HeaderMap {
    let credentials = BASE64_STANDARD.encode(format!("{consumer_key}:{consumer_secret}"));
    let mut map = HeaderMap::new();
    map.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {credentials}")).expect("header value is ascii"),
    );
    map.typed_insert(headers::ContentType::json());
    map
}

/// Computes the STK push password: base64 of shortcode, passkey and the
/// request timestamp concatenated in that order.
pub fn stk_password(shortcode: &str, passkey: &str, timestamp: &str) -> String {
    BASE64_STANDARD.encode(format!("{shortcode}{passkey}{timestamp}"))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl DarajaGateway {
    /// Fetches a fresh OAuth access token.
    ///
    /// Tokens are not cached; every payment request authenticates from
    /// scratch so an expired token can never poison a later request.
    pub async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/oauth/v1/generate?grant_type=client_credentials",
            self.config.base_url
        );
        let res = self
            .client
            .get(url)
            .headers(basic_auth_headers(
                &self.config.consumer_key,
                &self.config.consumer_secret,
            ))
            .send()
            .await?;
        let status = res.status();
        if status != reqwest::StatusCode::OK {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: res.text().await.unwrap_or_default(),
            });
        }
        let token: TokenResponse = res.json().await?;
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_encodes_credentials() {
        let headers = basic_auth_headers("key", "secret");
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Basic a2V5OnNlY3JldA=="
        );
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn password_is_base64_of_concatenation() {
        let password = stk_password(
            "174379",
            "bfb279f9aa9bdbcf158e97dd71a467cd2e0c893059b10f78e6b72ada1ed2c919",
            "20260101093045",
        );
        assert_eq!(
            password,
            "MTc0Mzc5YmZiMjc5ZjlhYTliZGJjZjE1OGU5N2RkNzFhNDY3Y2QyZTBjODkzMDU5YjEwZjc4ZTZiNzJhZGExZWQyYzkxOTIwMjYwMTAxMDkzMDQ1"
        );
    }
}
