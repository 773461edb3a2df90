// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with bearer authentication and error mapping.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;

/// HTTP client for the reservation API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ApiConfig,
    session: Arc<dyn Session>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: ApiConfig, session: Arc<dyn Session>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Builds a request against an API path, with the bearer token attached
    /// when the session holds one.
    pub fn build_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        let mut req = self.client.request(method, &url);

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Executes a request and maps HTTP errors.
    ///
    /// A 401 notifies the session before returning [`ApiError::Unauthorized`];
    /// other non-2xx statuses surface the body's `detail` field when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(resp),
            StatusCode::UNAUTHORIZED => {
                self.session.on_unauthorized();
                Err(ApiError::Unauthorized)
            }
            status => {
                let text = resp.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    detail: extract_detail(&text)
                        .unwrap_or_else(|| format!("request failed with status {status}")),
                })
            }
        }
    }
}

/// Pulls the `detail` field out of an error body, if it is JSON and has one.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(ToString::to_string)
}
