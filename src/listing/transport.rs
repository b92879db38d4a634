// src/listing/transport.rs

use crate::listing::request::OutboundRequest;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("property_search/", env!("CARGO_PKG_VERSION"));

/// Raw upstream answer. Status classification happens in the controller.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body re-indented when it is JSON, as received otherwise.
    pub fn pretty_body(&self) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

/// The request never completed (DNS, connect, timeout, reading the body).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Performs one upstream call.
pub trait Transport: Send + Sync {
    fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let resp = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .json(&request.body)
            .send()
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| TransportError(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn json_bodies_are_reindented_and_text_is_kept() {
        assert_eq!(response(200, r#"{"a":1}"#).pretty_body(), "{\n  \"a\": 1\n}");
        assert_eq!(response(502, "Bad Gateway").pretty_body(), "Bad Gateway");
    }

    #[test]
    fn only_2xx_is_success() {
        assert!(response(200, "").is_success());
        assert!(response(204, "").is_success());
        assert!(!response(301, "").is_success());
        assert!(!response(500, "").is_success());
    }
}
