use log::{error, info};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }

    /// Waits for Ctrl+C, or for `run_for` to elapse if given, then fires the signal once.
    async fn listen_for_shutdown(&self, run_for: Option<Duration>) {
        self.wait_then_notify(run_for, signal::ctrl_c()).await;
    }

    // an interrupt that can't be listened for still stops the session
    async fn wait_then_notify<F>(&self, run_for: Option<Duration>, interrupt: F)
    where
        F: Future<Output = io::Result<()>>,
    {
        match run_for {
            Some(time_to_live) => {
                tokio::time::sleep(time_to_live).await;
                info!("Run time of {:?} elapsed. Sending stop signal...", time_to_live);
            }
            None => match interrupt.await {
                Ok(()) => info!("Ctrl+C received. Sending stop signal..."),
                Err(e) => error!("Error while waiting for Ctrl+C: {}. Sending stop signal...", e),
            },
        }
        // notify_one keeps a permit, so a waiter that subscribes late still wakes up
        self.notify.notify_one();
    }
}

/// Spawns a task that notifies `notify` on Ctrl+C or after `run_for`.
pub fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for: Option<Duration>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify);
        shutdown_signal.listen_for_shutdown(run_for).await;
    })
}
