mod console;
mod figures;

use thiserror::Error;

use crate::series::WindowedSeries;

pub use console::ConsoleRenderer;
pub use figures::GnuplotRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Gnuplot error: {0}")]
    Gnuplot(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Draws the current windowed series. Called once per refresh tick.
pub trait Renderer: Send {
    fn render(&mut self, series: &WindowedSeries) -> Result<(), RenderError>;
}
