//! reqwest-backed gateway to a REMS instance

use super::gateway::{Gateway, Method, TransportError};
use crate::config::Environment;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("rems-copy/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

const API_KEY_HEADER: &str = "x-rems-api-key";
const USER_ID_HEADER: &str = "x-rems-user-id";

/// HTTP gateway for one environment
pub struct HttpGateway {
    environment: Environment,
    http_client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(environment: Environment) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            environment,
            http_client,
        })
    }

    fn network_error(&self, method: Method, path: &str, err: reqwest::Error) -> TransportError {
        TransportError::Network {
            environment: self.environment.name.clone(),
            method,
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Value, TransportError> {
        let response = request
            .header(API_KEY_HEADER, &self.environment.api_key)
            .header(USER_ID_HEADER, &self.environment.acting_user)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.network_error(method, path, e))?;

        let status = response.status();
        tracing::debug!(
            environment = %self.environment.name,
            method = %method,
            path = %path,
            status = status.as_u16(),
            "REMS API response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                environment: self.environment.name.clone(),
                method,
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.network_error(method, path, e))?;

        // Some endpoints answer 200 with an empty body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode {
            environment: self.environment.name.clone(),
            method,
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    fn environment(&self) -> &str {
        &self.environment.name
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Value, TransportError> {
        let url = self.environment.endpoint(path);
        tracing::debug!(url = %url, "GET");
        let request = self.http_client.get(&url).query(query);
        self.send(Method::Get, path, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError> {
        let url = self.environment.endpoint(path);
        tracing::debug!(url = %url, "POST");
        let request = self.http_client.post(&url).json(body);
        self.send(Method::Post, path, request).await
    }

    async fn put(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError> {
        let url = self.environment.endpoint(path);
        tracing::debug!(url = %url, "PUT");
        let request = self.http_client.put(&url).json(body);
        self.send(Method::Put, path, request).await
    }
}
