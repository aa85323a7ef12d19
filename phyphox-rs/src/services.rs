use chrono::Local;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use uuid::Uuid;

use common::buffers::RollingBuffer;
use common::SensorSnapshot;
use publisher::{ConsumerQueue, Publisher};

use crate::adapters::{mock::PhyphoxMock, production::Phyphox};
use crate::constants::SENSOR_CHANNELS;
use crate::errors::PhyphoxError;
use crate::helpers;
use crate::models::acquisition::{AcquisitionConfig, AcquisitionStats, CollectionState};
use crate::ports::PhyphoxPort;

/// Background acquisition of sensor snapshots from a phyphox device.
///
/// Every successful poll is appended to the shared [`RollingBuffer`] and then published to
/// every subscribed [`ConsumerQueue`]. Failed polls are logged and retried forever; nothing
/// is stored for them.
pub struct AcquisitionService<C>
where
    C: PhyphoxPort + 'static,
{
    client: Arc<C>,
    buffer: Arc<RollingBuffer<SensorSnapshot>>,
    publisher: Publisher<Arc<SensorSnapshot>>,
    config: AcquisitionConfig,
    stats: Arc<AcquisitionStats>,
    state: Mutex<CollectionState>,
    stop_requested: Arc<AtomicBool>,
    abort_signal: Arc<Notify>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<C> AcquisitionService<C>
where
    C: PhyphoxPort + 'static,
{
    /// Creates an idle service that stores snapshots into `buffer` and fans them out through `publisher`.
    pub fn new(
        client: C,
        buffer: Arc<RollingBuffer<SensorSnapshot>>,
        publisher: Publisher<Arc<SensorSnapshot>>,
        config: AcquisitionConfig,
    ) -> Self {
        Self {
            client: Arc::new(client),
            buffer,
            publisher,
            config,
            stats: Arc::new(AcquisitionStats::default()),
            state: Mutex::new(CollectionState::Idle),
            stop_requested: Arc::new(AtomicBool::new(false)),
            abort_signal: Arc::new(Notify::new()),
            handle: Mutex::new(None),
        }
    }

    /// Creates an idle service with its own buffer of `buffer_capacity` snapshots and no subscribers.
    pub fn with_capacity(client: C, buffer_capacity: usize, config: AcquisitionConfig) -> Self {
        Self::new(
            client,
            Arc::new(RollingBuffer::new(buffer_capacity)),
            Publisher::new(),
            config,
        )
    }

    fn lock_state(&self) -> MutexGuard<'_, CollectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handle(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawns the acquisition loop on the current tokio runtime.
    ///
    /// Starting a running service does nothing.
    ///
    /// # Errors
    /// InvalidState if the service was already stopped. A stopped service can't be restarted.
    ///
    /// # Panics
    /// If called outside a tokio runtime.
    pub fn start(&self) -> Result<(), PhyphoxError> {
        let mut state = self.lock_state();
        match *state {
            CollectionState::Running => {
                debug!("Acquisition already running");
                return Ok(());
            }
            CollectionState::Stopped => {
                return Err(PhyphoxError::InvalidState(
                    "Acquisition was stopped and can't be restarted".to_string(),
                ))
            }
            CollectionState::Idle => {}
        }

        let worker = AcquisitionLoop {
            client: Arc::clone(&self.client),
            buffer: Arc::clone(&self.buffer),
            publisher: self.publisher.clone(),
            config: self.config.clone(),
            stats: Arc::clone(&self.stats),
            stop_requested: Arc::clone(&self.stop_requested),
            abort_signal: Arc::clone(&self.abort_signal),
        };
        *self.lock_handle() = Some(tokio::spawn(worker.run()));
        *state = CollectionState::Running;
        info!("Acquisition started from {}", self.client.describe());
        Ok(())
    }

    /// Stops the acquisition loop and waits for it to exit.
    ///
    /// The loop notices the request at its next iteration boundary, or immediately if it is
    /// sleeping. If it hasn't exited after `shutdown_grace` (a fetch is stuck, for instance)
    /// the task is aborted. Stopping twice is a no-op. Stopping an idle service only marks it stopped.
    pub async fn stop(&self) {
        let handle = {
            let mut state = self.lock_state();
            match *state {
                CollectionState::Stopped => return,
                CollectionState::Idle => {
                    *state = CollectionState::Stopped;
                    info!("Acquisition stopped before it was started");
                    return;
                }
                CollectionState::Running => *state = CollectionState::Stopped,
            }
            self.stop_requested.store(true, Ordering::SeqCst);
            self.abort_signal.notify_one();
            self.lock_handle().take()
        };

        let Some(mut handle) = handle else {
            return;
        };
        let grace = self.config.shutdown_grace;
        match tokio::time::timeout(grace, &mut handle).await {
            Ok(Ok(())) => info!("Acquisition stopped"),
            Ok(Err(e)) => error!("Acquisition loop ended abnormally: {}", e),
            Err(_) => {
                warn!("Acquisition loop didn't stop within {:?}. Aborting it", grace);
                handle.abort();
            }
        }
    }

    pub fn state(&self) -> CollectionState {
        *self.lock_state()
    }

    pub fn stats(&self) -> &AcquisitionStats {
        &self.stats
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Shared history the loop writes into.
    pub fn buffer(&self) -> Arc<RollingBuffer<SensorSnapshot>> {
        Arc::clone(&self.buffer)
    }

    /// Most recent snapshot, if any poll succeeded yet.
    pub fn latest(&self) -> Option<Arc<SensorSnapshot>> {
        self.buffer.latest()
    }

    /// Last `count` snapshots (the whole history if `None`), oldest first.
    pub fn history(&self, count: Option<usize>) -> Vec<Arc<SensorSnapshot>> {
        self.buffer.history(count)
    }

    /// Registers a consumer that receives every snapshot published from now on.
    pub fn subscribe(&self) -> (Uuid, Arc<ConsumerQueue<Arc<SensorSnapshot>>>) {
        self.publisher.subscribe()
    }

    pub fn publisher(&self) -> &Publisher<Arc<SensorSnapshot>> {
        &self.publisher
    }

    pub fn describe(&self) -> String {
        self.client.describe()
    }
}

impl<C> Drop for AcquisitionService<C>
where
    C: PhyphoxPort + 'static,
{
    fn drop(&mut self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        self.abort_signal.notify_one();
        if let Some(handle) = self.lock_handle().take() {
            debug!("Acquisition service dropped while running");
            handle.abort();
        }
    }
}

/// State moved into the spawned polling task.
struct AcquisitionLoop<C: PhyphoxPort> {
    client: Arc<C>,
    buffer: Arc<RollingBuffer<SensorSnapshot>>,
    publisher: Publisher<Arc<SensorSnapshot>>,
    config: AcquisitionConfig,
    stats: Arc<AcquisitionStats>,
    stop_requested: Arc<AtomicBool>,
    abort_signal: Arc<Notify>,
}

impl<C: PhyphoxPort> AcquisitionLoop<C> {
    async fn run(self) {
        info!("Fetching data...");
        while !self.stop_requested.load(Ordering::SeqCst) {
            let wait = match self.poll_once().await {
                Ok(snapshot) => {
                    self.store(snapshot);
                    self.config.sampling_interval
                }
                Err(e) if e.is_transport() => {
                    self.stats.record_transport_error();
                    warn!("{}. Retrying in {:?}", e, self.config.transport_backoff);
                    self.config.transport_backoff
                }
                Err(e) => {
                    self.stats.record_parse_error();
                    warn!("{}. Retrying in {:?}", e, self.config.parse_backoff);
                    self.config.parse_backoff
                }
            };

            tokio::select! {
                _ = self.abort_signal.notified() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }
        debug!("Acquisition loop exited");
    }

    async fn poll_once(&self) -> Result<SensorSnapshot, PhyphoxError> {
        self.stats.record_poll();
        let payload = self.client.fetch(&SENSOR_CHANNELS).await?;
        if helpers::measuring_status(&payload) == Some(false) {
            debug!("Device reports it is not measuring");
        }
        helpers::parse_snapshot(&payload, Local::now())
    }

    // history is updated before consumers are notified
    fn store(&self, snapshot: SensorSnapshot) {
        debug!("{}", snapshot);
        let snapshot = Arc::new(snapshot);
        self.buffer.push(Arc::clone(&snapshot));
        self.publisher.publish(snapshot);
        self.stats.record_snapshot();
    }
}

/// Starts polling a phyphox device at `base_url`.
///
/// Every request gives up after `timeout`. The returned service is already running; call
/// [`AcquisitionService::stop`] to end it.
///
/// An error ClientBuild is returned if http client connecting with phyphox app REST API cannot be created.
///
/// # Panics
/// If called outside a tokio runtime.
pub fn run_service(
    base_url: &str,
    timeout: Duration,
    buffer_capacity: usize,
    config: AcquisitionConfig,
) -> Result<Arc<AcquisitionService<Phyphox>>, PhyphoxError> {
    let phyphox = Phyphox::with_timeout(base_url, timeout)?;
    let service = Arc::new(AcquisitionService::with_capacity(
        phyphox,
        buffer_capacity,
        config,
    ));
    service.start()?;
    Ok(service)
}

/// Starts polling a synthetic device whose clock advances `capture_sampling_period_millis` per poll.
///
/// Returns a ClientBuild error if the noise generator can't be configured.
///
/// # Panics
/// If called outside a tokio runtime.
pub fn run_mock_service(
    capture_sampling_period_millis: u64,
    add_sensor_noise: bool,
    buffer_capacity: usize,
    config: AcquisitionConfig,
) -> Result<Arc<AcquisitionService<PhyphoxMock>>, PhyphoxError> {
    let phyphox = PhyphoxMock::new(capture_sampling_period_millis, add_sensor_noise)?;
    let service = Arc::new(AcquisitionService::with_capacity(
        phyphox,
        buffer_capacity,
        config,
    ));
    service.start()?;
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::ScriptedPhyphox;
    use serde_json::{json, Value};
    use std::time::Instant;

    fn fast_config() -> AcquisitionConfig {
        AcquisitionConfig {
            sampling_interval: Duration::from_millis(10),
            transport_backoff: Duration::from_millis(60),
            parse_backoff: Duration::from_millis(30),
            shutdown_grace: Duration::from_millis(500),
        }
    }

    fn gravity_payload(z: f64) -> Value {
        let entry = |v: f64| json!({ "buffer": [v] });
        json!({
            "buffer": {
                "graX": entry(0.0),
                "graY": entry(0.0),
                "graZ": entry(z),
                "graT": entry(1.5),
            }
        })
    }

    async fn wait_until(mut cond: impl FnMut() -> bool, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        cond()
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let service =
            AcquisitionService::with_capacity(ScriptedPhyphox::unreachable(), 10, fast_config());
        assert_eq!(service.state(), CollectionState::Idle);

        service.start().unwrap();
        assert_eq!(service.state(), CollectionState::Running);
        // second start is a no-op
        service.start().unwrap();
        assert_eq!(service.state(), CollectionState::Running);

        service.stop().await;
        assert_eq!(service.state(), CollectionState::Stopped);
        service.stop().await;
        assert_eq!(service.state(), CollectionState::Stopped);

        assert!(matches!(
            service.start(),
            Err(PhyphoxError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_stop_idle_service() {
        let service =
            AcquisitionService::with_capacity(ScriptedPhyphox::unreachable(), 10, fast_config());
        service.stop().await;
        assert_eq!(service.state(), CollectionState::Stopped);
        assert!(service.start().is_err());
    }

    #[tokio::test]
    async fn test_transport_failures_back_off_then_recover() {
        let fetch_error = || Err(PhyphoxError::FetchData("Connection refused".to_string()));
        let device = ScriptedPhyphox::new(
            vec![fetch_error(), fetch_error(), fetch_error(), Ok(gravity_payload(9.8))],
            fetch_error(),
        );
        let config = fast_config();
        let service = AcquisitionService::with_capacity(device, 10, config.clone());
        service.start().unwrap();

        assert!(wait_until(|| service.stats().snapshots() == 1, Duration::from_secs(2)).await);
        service.stop().await;

        assert_eq!(service.history(None).len(), 1);
        assert_eq!(service.stats().transport_errors() + 1, service.stats().polls());
        assert!(service.stats().transport_errors() >= 3);

        let calls = service.client.calls();
        for pair in calls.windows(2).take(3) {
            assert!(pair[1] - pair[0] >= config.transport_backoff);
        }
    }

    #[tokio::test]
    async fn test_parse_failure_uses_parse_backoff() {
        let device = ScriptedPhyphox::new(
            vec![Ok(json!([1, 2, 3]))],
            Ok(gravity_payload(9.8)),
        );
        let config = fast_config();
        let service = AcquisitionService::with_capacity(device, 10, config.clone());
        service.start().unwrap();

        assert!(wait_until(|| service.stats().snapshots() >= 1, Duration::from_secs(2)).await);
        service.stop().await;

        assert_eq!(service.stats().parse_errors(), 1);
        assert_eq!(service.stats().transport_errors(), 0);
        let calls = service.client.calls();
        assert!(calls[1] - calls[0] >= config.parse_backoff);
    }

    #[tokio::test]
    async fn test_snapshots_reach_buffer_and_subscribers() {
        let service = AcquisitionService::with_capacity(
            ScriptedPhyphox::repeating(gravity_payload(9.8)),
            3,
            fast_config(),
        );
        let (_, queue) = service.subscribe();
        service.start().unwrap();

        assert!(wait_until(|| service.stats().snapshots() >= 5, Duration::from_secs(2)).await);
        service.stop().await;

        let history = service.history(None);
        assert_eq!(history.len(), 3);
        let latest = service.latest().unwrap();
        assert!(Arc::ptr_eq(&latest, history.last().unwrap()));
        assert_eq!(latest.gravity().vector().z(), 9.8);
        assert!(!latest.acceleration().presence().x());

        let delivered = queue.try_drain_all();
        assert_eq!(delivered.len() as u64, service.stats().snapshots());
        assert!(Arc::ptr_eq(delivered.last().unwrap(), &latest));
    }

    #[tokio::test]
    async fn test_stop_interrupts_sleep() {
        let config = AcquisitionConfig {
            sampling_interval: Duration::from_secs(30),
            ..fast_config()
        };
        let service = AcquisitionService::with_capacity(
            ScriptedPhyphox::repeating(gravity_payload(9.8)),
            10,
            config,
        );
        service.start().unwrap();
        assert!(wait_until(|| service.stats().snapshots() == 1, Duration::from_secs(2)).await);

        let started = Instant::now();
        service.stop().await;
        assert!(started.elapsed() < Duration::from_millis(400));
        assert_eq!(service.client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stop_abandons_stuck_fetch() {
        let config = AcquisitionConfig {
            shutdown_grace: Duration::from_millis(100),
            ..fast_config()
        };
        let device = ScriptedPhyphox::repeating(gravity_payload(9.8)).with_delay(Duration::from_secs(30));
        let service = AcquisitionService::with_capacity(device, 10, config);
        service.start().unwrap();
        assert!(wait_until(|| service.client.call_count() == 1, Duration::from_secs(2)).await);

        let started = Instant::now();
        service.stop().await;
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(service.state(), CollectionState::Stopped);
        assert!(service.history(None).is_empty());
    }

    #[tokio::test]
    async fn test_dropping_running_service_stops_polling() {
        let service = AcquisitionService::with_capacity(
            ScriptedPhyphox::repeating(gravity_payload(9.8)),
            10,
            fast_config(),
        );
        let (_, queue) = service.subscribe();
        service.start().unwrap();
        assert!(wait_until(|| queue.len() >= 2, Duration::from_secs(2)).await);

        drop(service);
        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_drop = queue.len();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(queue.len(), after_drop);
    }

    #[tokio::test]
    async fn test_run_mock_service() {
        let service = run_mock_service(100, false, 50, fast_config()).unwrap();
        assert_eq!(service.state(), CollectionState::Running);
        assert!(wait_until(|| service.latest().is_some(), Duration::from_secs(2)).await);
        service.stop().await;
        assert!(service.latest().unwrap().is_complete());
    }
}
