//! # Crate collector
//!
//! Wires the phyphox acquisition service, the live plot and the CSV export into one run:
//! start polling, plot until Ctrl+C (or a fixed run time), stop, export what the buffer holds.

pub mod config;
pub mod errors;
pub mod export;

use chrono::Local;
use log::info;
use std::sync::Arc;
use tokio::sync::Notify;

use phyphox_rs::adapters::{Phyphox, PhyphoxMock};
use phyphox_rs::models::shutdown::listen_for_shutdown;
use phyphox_rs::ports::PhyphoxPort;
use phyphox_rs::AcquisitionService;
use plotter::{ConsoleRenderer, GnuplotRenderer, PlotHandle, PlotService, WindowedConsumer};

pub use config::CollectorConfig;
pub use errors::{CollectorError, ExportError};
pub use export::{CsvPersistence, ExportReport, ExportRow, Persistence};

/// Runs a whole collection session and returns what was exported, if anything.
pub async fn run(config: CollectorConfig) -> Result<Option<ExportReport>, CollectorError> {
    if config.mock {
        let device = PhyphoxMock::new(config.sampling_interval_ms, true)?;
        collect(device, &config).await
    } else {
        let device = Phyphox::with_timeout(&config.url, config.timeout())?;
        collect(device, &config).await
    }
}

async fn collect<C>(
    device: C,
    config: &CollectorConfig,
) -> Result<Option<ExportReport>, CollectorError>
where
    C: PhyphoxPort + 'static,
{
    let service = AcquisitionService::with_capacity(
        device,
        config.buffer_capacity,
        config.acquisition(),
    );
    info!("Collecting from {}. Press Ctrl+C to stop", service.describe());

    let plot = start_plot(&service, config);
    service.start()?;

    let shutdown = Arc::new(Notify::new());
    listen_for_shutdown(Arc::clone(&shutdown), config.run_for());
    shutdown.notified().await;

    info!("Stopping data collection...");
    service.stop().await;
    if let Some(plot) = plot {
        plot.stop();
    }

    let persistence = CsvPersistence::new(&config.output_dir);
    let report = export::export(&service.buffer(), &persistence, Local::now())?;
    Ok(report)
}

fn start_plot<C>(service: &AcquisitionService<C>, config: &CollectorConfig) -> Option<PlotHandle>
where
    C: PhyphoxPort + 'static,
{
    if config.headless {
        return None;
    }
    let (_, queue) = service.subscribe();
    let consumer = WindowedConsumer::new(queue, config.window_size);
    let handle = if config.console {
        PlotService::start(consumer, ConsoleRenderer::new(), config.refresh_period())
    } else {
        PlotService::start(consumer, GnuplotRenderer::new(), config.refresh_period())
    };
    Some(handle)
}
