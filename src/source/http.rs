//! ==============================================================================
//! source/http.rs - readings over http
//! ==============================================================================
//!
//! GET the endpoint, insist on a 2xx, decode the body as a json array of
//! readings. no retries: the next tick is the retry.
//!
//! ==============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::ReadingSource;
use crate::config::EndpointConfig;
use crate::domain::Reading;
use crate::error::FetchError;

#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(endpoint.timeout_ms))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            url: endpoint.url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReadingSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Reading>, FetchError> {
        let request_failed = |source| FetchError::Request {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_failed)?;
        let batch: Vec<Reading> = serde_json::from_slice(&body)?;
        Ok(batch)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
