use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PhyphoxError;

/// Transport to a phyphox device.
#[async_trait]
pub trait PhyphoxPort: Send + Sync {
    /// Requests the latest samples of `channels` and returns the raw JSON response.
    ///
    /// # Errors
    /// - FetchData if the device can't be reached, times out or answers with an error status
    /// - IncorrectDataFormat if the response body is not JSON
    async fn fetch(&self, channels: &[&str]) -> Result<Value, PhyphoxError>;

    /// Human readable description of the device, used in logs.
    fn describe(&self) -> String;
}
