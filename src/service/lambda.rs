//! AWS Lambda proxy integration.
//!
//! Requests arrive as API Gateway (REST or HTTP API) or function URL proxy
//! events; all of them carry `headers`, `body` and `isBase64Encoded`.

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::base::types::{InboundRequest, Res};

/// The parts of a Lambda proxy request the bot reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayRequest {
    /// Normalizes header names and decodes the body.
    pub fn into_inbound(self) -> Res<InboundRequest> {
        let headers = self.headers.unwrap_or_default().into_iter().map(|(k, v)| (k.to_ascii_lowercase(), v)).collect();

        let body = match self.body {
            Some(body) if self.is_base64_encoded => String::from_utf8(STANDARD.decode(body.as_bytes())?)?,
            Some(body) => body,
            None => String::new(),
        };

        Ok(InboundRequest { headers, body })
    }
}

/// A Lambda proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    /// An empty-bodied response.
    pub fn status(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn ok() -> Self {
        Self::status(200)
    }

    /// A 200 response carrying a JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        let mut response = Self::ok();
        response.headers.insert("content-type".to_string(), "application/json".to_string());
        response.body = value.to_string();
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_proxy_payload() {
        let request: GatewayRequest = serde_json::from_value(serde_json::json!({
            "version": "2.0",
            "rawPath": "/slack/events",
            "headers": { "X-Slack-Signature": "v0=abc", "Content-Type": "application/json" },
            "body": "eyJ0eXBlIjoidXJsX3ZlcmlmaWNhdGlvbiJ9",
            "isBase64Encoded": true
        }))
        .unwrap();

        let inbound = request.into_inbound().unwrap();

        assert_eq!(inbound.header("x-slack-signature"), Some("v0=abc"));
        assert_eq!(inbound.header("content-type"), Some("application/json"));
        assert_eq!(inbound.body, r#"{"type":"url_verification"}"#);
    }

    #[test]
    fn tolerates_null_headers_and_body() {
        let request: GatewayRequest = serde_json::from_value(serde_json::json!({ "headers": null, "body": null })).unwrap();

        let inbound = request.into_inbound().unwrap();

        assert!(inbound.headers.is_empty());
        assert!(inbound.body.is_empty());
    }

    #[test]
    fn rejects_invalid_base64() {
        let request = GatewayRequest {
            headers: None,
            body: Some("%%%".to_string()),
            is_base64_encoded: true,
        };

        assert!(request.into_inbound().is_err());
    }

    #[test]
    fn serializes_proxy_response() {
        let response = GatewayResponse::json(&serde_json::json!({ "challenge": "abc" }));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["body"], r#"{"challenge":"abc"}"#);
    }
}
