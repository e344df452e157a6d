// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::time::Duration;

use super::request::OptimizationRequest;

/// The public openrouteservice optimization endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openrouteservice.org/optimization";

/// Upper bound on the whole HTTP exchange. The optimization call is the
/// only blocking operation of a run and must not hang it forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error conditions which may occur during [Client::optimize].
/// Both variants are fatal for the run; no retry is attempted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP exchange itself failed, including timeouts.
    #[error("optimization request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("optimization service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },
}

/// Thin blocking HTTP client for the optimization endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl Client {
    /// Creates a client for the given endpoint, authorizing with the
    /// provided API token (sent verbatim in the `Authorization` header).
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, Error> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            inner,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Submits the request and returns the decoded response document.
    ///
    /// The response is kept as a generic JSON value: it is persisted
    /// verbatim by the pipeline, and only the `routes` array is read
    /// further (see [routes_from_document](super::routes_from_document)).
    pub fn optimize(&self, request: &OptimizationRequest) -> Result<serde_json::Value, Error> {
        let response = self
            .inner
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}
