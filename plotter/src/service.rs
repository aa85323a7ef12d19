use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consumer::WindowedConsumer;
use crate::renderers::Renderer;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(50);

/// Runs a [`WindowedConsumer`] and a [`Renderer`] on a dedicated thread.
pub struct PlotService;

impl PlotService {
    /// Spawns the refresh thread. Every `refresh_period` the consumer drains its queue and the
    /// renderer redraws the series. Render failures are logged and the thread keeps going.
    pub fn start<R>(consumer: WindowedConsumer, renderer: R, refresh_period: Duration) -> PlotHandle
    where
        R: Renderer + 'static,
    {
        let stop_requested = Arc::new(AtomicBool::new(false));
        let thread = thread::spawn({
            let stop_requested = Arc::clone(&stop_requested);
            move || refresh_loop(consumer, renderer, refresh_period, stop_requested)
        });
        info!("Plot refresh started every {:?}", refresh_period);
        PlotHandle {
            stop_requested,
            thread: Some(thread),
        }
    }
}

fn refresh_loop<R: Renderer>(
    mut consumer: WindowedConsumer,
    mut renderer: R,
    period: Duration,
    stop_requested: Arc<AtomicBool>,
) -> WindowedConsumer {
    let mut failing = false;
    while !stop_requested.load(Ordering::SeqCst) {
        let start_time = Instant::now();

        let drained = consumer.refresh();
        match renderer.render(consumer.series()) {
            Ok(()) if failing => {
                info!("Renderer recovered");
                failing = false;
            }
            Ok(()) => {}
            Err(e) if !failing => {
                warn!("Render failed: {}", e);
                failing = true;
            }
            Err(e) => debug!("Render still failing: {}", e),
        }
        if drained > 0 {
            debug!("Plotted {} new snapshots", drained);
        }

        let elapsed_time = start_time.elapsed();
        let sleep_time = if elapsed_time < period {
            period - elapsed_time
        } else {
            Duration::new(0, 0)
        };
        thread::sleep(sleep_time);
    }
    consumer
}

/// Handle on a running plot thread. Dropping it stops the thread without waiting for it.
pub struct PlotHandle {
    stop_requested: Arc<AtomicBool>,
    thread: Option<JoinHandle<WindowedConsumer>>,
}

impl PlotHandle {
    /// Stops the refresh thread and waits for it, at most one refresh period.
    /// Returns the consumer with its final series, or `None` if the thread panicked.
    pub fn stop(mut self) -> Option<WindowedConsumer> {
        self.stop_requested.store(true, Ordering::SeqCst);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(consumer) => {
                info!("Plot refresh stopped");
                Some(consumer)
            }
            Err(_) => {
                error!("Plot thread panicked");
                None
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .map(|thread| !thread.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for PlotHandle {
    fn drop(&mut self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }
}
