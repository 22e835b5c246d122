//! reqwest-backed transport.
//!
//! The controllers speak plain form posts (`application/x-www-form-urlencoded`)
//! and answer with a JSON body, usually labelled `text/plain`, so the body is
//! read as text and parsed here rather than trusting the content type.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::transport::ActionTransport;
use super::types::{ActionRequest, ActionResponse, Endpoint, TransportError};

pub const DEFAULT_APPLIANCE_URL: &str = "http://localhost:5555";
pub const DEFAULT_SYSTEM_URL: &str = "http://localhost:1234";

/// HTTP transport for both controller endpoints.
pub struct HttpActionClient {
    appliance_url: String,
    system_url: String,
    client: reqwest::Client,
}

impl HttpActionClient {
    pub fn new(
        appliance_url: String,
        system_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            appliance_url,
            system_url,
            client,
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Appliance => &self.appliance_url,
            Endpoint::System => &self.system_url,
        }
    }
}

#[async_trait]
impl ActionTransport for HttpActionClient {
    async fn send(
        &self,
        endpoint: Endpoint,
        request: &ActionRequest,
    ) -> Result<ActionResponse, TransportError> {
        let url = self.url_for(endpoint);
        debug!("POST {} action={} ({} params)", endpoint, request.action(), request.pairs().len() - 1);

        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(request.pairs())
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} endpoint answered HTTP {} to action={}", endpoint, status, request.action());
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(ActionResponse::from_value(value))
    }
}
