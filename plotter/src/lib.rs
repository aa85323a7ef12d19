//! # Crate plotter
//!
//! Live view of the snapshots produced by an acquisition service.
//!
//! A [`WindowedConsumer`] drains its own consumer queue and keeps the last `M` values
//! of every channel. A [`PlotService`] refreshes it on a dedicated thread and hands the
//! series to a [`Renderer`]: gnuplot windows, or a single console line.

mod consumer;
pub mod renderers;
mod series;
mod service;

pub use consumer::WindowedConsumer;
pub use renderers::{ConsoleRenderer, GnuplotRenderer, RenderError, Renderer};
pub use series::{GroupSeries, WindowedSeries};
pub use service::{PlotHandle, PlotService, DEFAULT_REFRESH_PERIOD};
