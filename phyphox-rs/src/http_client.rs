use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::time::Duration;

use crate::errors::PhyphoxError;

pub(crate) const CLIENT_TIMEOUT_DEFAULT: Duration = Duration::from_secs(2);

pub(crate) struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, PhyphoxError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PhyphoxError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `path` and decodes the body as JSON.
    ///
    /// # Errors
    /// - FetchData on timeout, connection error or a non-success status
    /// - IncorrectDataFormat if the body is not valid JSON
    pub(crate) async fn fetch_json(&self, path: &str) -> Result<Value, PhyphoxError> {
        // Example of data returned by Phyphox
        //  /get?accX&accY&accZ&acc_time
        // {"buffer":{"accX":{"buffer":[0.17797988891601563],"size":0,"updateMode":"single"},
        //            "accY":{"buffer":[0.2908451843261719],"size":0,"updateMode":"single"},
        //            "accZ":{"buffer":[9.756411437988282],"size":0,"updateMode":"single"},
        //            "acc_time":{"buffer":[2.5006562499329448],"size":0,"updateMode":"single"}},
        // "status":{"countDown":0,"measuring":true,"session":"11114880","timedRun":false}}
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| PhyphoxError::FetchData(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| PhyphoxError::FetchData(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| PhyphoxError::IncorrectDataFormat(e.to_string()))
    }
}
