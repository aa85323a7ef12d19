use std::io::{self, Stdout, Write};

use common::SensorGroup;

use super::{RenderError, Renderer};
use crate::series::WindowedSeries;

/// Rewrites a single terminal line with the latest value of every group.
pub struct ConsoleRenderer<W: Write + Send = Stdout> {
    out: W,
}

impl ConsoleRenderer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn summary(series: &WindowedSeries) -> Option<String> {
        let parts = SensorGroup::ALL
            .into_iter()
            .map(|group| {
                series.group(group).latest().map(|[x, y, z]| {
                    format!("{}: [{:6.2}, {:6.2}, {:6.2}]", group.short_name(), x, y, z)
                })
            })
            .collect::<Option<Vec<String>>>()?;
        Some(parts.join(" | "))
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, series: &WindowedSeries) -> Result<(), RenderError> {
        if let Some(line) = Self::summary(series) {
            write!(self.out, "\r{}", line)?;
            self.out.flush()?;
        }
        Ok(())
    }
}
