use std::sync::Arc;

use common::SensorSnapshot;
use publisher::ConsumerQueue;

use crate::series::WindowedSeries;

/// Drains a consumer queue into a [`WindowedSeries`] at the caller's pace.
pub struct WindowedConsumer {
    queue: Arc<ConsumerQueue<Arc<SensorSnapshot>>>,
    series: WindowedSeries,
}

impl WindowedConsumer {
    pub fn new(queue: Arc<ConsumerQueue<Arc<SensorSnapshot>>>, window_size: usize) -> Self {
        Self {
            queue,
            series: WindowedSeries::new(window_size),
        }
    }

    /// Moves everything queued so far into the series, in arrival order.
    /// Returns the number of snapshots drained. Never blocks.
    pub fn refresh(&mut self) -> usize {
        let snapshots = self.queue.try_drain_all();
        for snapshot in &snapshots {
            self.series.push(snapshot);
        }
        snapshots.len()
    }

    pub fn series(&self) -> &WindowedSeries {
        &self.series
    }
}
