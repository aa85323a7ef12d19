//! Data acquisition from a phone running phyphox with remote access enabled.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::errors::PhyphoxError;
use crate::helpers;
use crate::http_client::{HttpClient, CLIENT_TIMEOUT_DEFAULT};
use crate::ports::PhyphoxPort;

/// Constants for HTTP endpoints.
const GET_CMD: &str = "/get?";

/// Phyphox REST API client
pub struct Phyphox {
    client: HttpClient,
}

impl Phyphox {
    /// Creates a new `Phyphox` instance connected to `base_url` with the default request timeout.
    /// Returns an ClientBuild error if Http client to connect to Phyphox API cannot be created
    pub fn new(base_url: &str) -> Result<Self, PhyphoxError> {
        Self::with_timeout(base_url, CLIENT_TIMEOUT_DEFAULT)
    }

    /// Creates a new `Phyphox` instance whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, PhyphoxError> {
        let client = HttpClient::new(base_url, timeout)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PhyphoxPort for Phyphox {
    async fn fetch(&self, channels: &[&str]) -> Result<Value, PhyphoxError> {
        let query = helpers::build_query(channels);
        self.client.fetch_json(&format!("{GET_CMD}{}", query)).await
    }

    fn describe(&self) -> String {
        format!("phyphox at {}", self.client.base_url())
    }
}
