use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::errors::PhyphoxError;
use crate::ports::PhyphoxPort;

type Response = Result<Value, PhyphoxError>;

/// Device that replays a fixed script of responses, then keeps returning a fallback.
///
/// Every call is timestamped so callers can check the pacing of a polling loop.
pub struct ScriptedPhyphox {
    script: Mutex<VecDeque<Response>>,
    fallback: Response,
    delay: Option<Duration>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedPhyphox {
    pub fn new(script: Vec<Response>, fallback: Response) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Device answering every request with `payload`.
    pub fn repeating(payload: Value) -> Self {
        Self::new(vec![], Ok(payload))
    }

    /// Device that is never reachable.
    pub fn unreachable() -> Self {
        Self::new(
            vec![],
            Err(PhyphoxError::FetchData("Connection refused".to_string())),
        )
    }

    /// Makes every request take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Instants at which `fetch` was called, in call order.
    pub fn calls(&self) -> Vec<Instant> {
        Self::lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        Self::lock(&self.calls).len()
    }
}

#[async_trait]
impl PhyphoxPort for ScriptedPhyphox {
    async fn fetch(&self, _channels: &[&str]) -> Result<Value, PhyphoxError> {
        Self::lock(&self.calls).push(Instant::now());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = Self::lock(&self.script).pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn describe(&self) -> String {
        "scripted phyphox".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let device = ScriptedPhyphox::new(
            vec![
                Err(PhyphoxError::FetchData("timeout".to_string())),
                Ok(json!({ "buffer": {} })),
            ],
            Ok(json!({ "fallback": true })),
        );

        assert!(device.fetch(&[]).await.is_err());
        assert_eq!(device.fetch(&[]).await.unwrap(), json!({ "buffer": {} }));
        assert_eq!(device.fetch(&[]).await.unwrap(), json!({ "fallback": true }));
        assert_eq!(device.fetch(&[]).await.unwrap(), json!({ "fallback": true }));
        assert_eq!(device.call_count(), 4);
    }

    #[tokio::test]
    async fn test_unreachable() {
        let device = ScriptedPhyphox::unreachable();
        assert!(matches!(
            device.fetch(&[]).await,
            Err(PhyphoxError::FetchData(_))
        ));
    }
}
