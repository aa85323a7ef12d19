use gnuplot::PlotOption::LineWidth;
use gnuplot::{AxesCommon, Caption, Color, Figure};

use common::SensorGroup;

use super::{RenderError, Renderer};
use crate::series::{GroupSeries, WindowedSeries};

const WINDOW_TITLE: &str = "Real-time Sensor Data from Phyphox";

/// One gnuplot window per channel group, X/Y/Z drawn in red/green/blue against the sample index.
pub struct GnuplotRenderer {
    figures: Vec<(SensorGroup, Figure)>,
}

impl GnuplotRenderer {
    pub fn new() -> Self {
        let figures = SensorGroup::ALL
            .into_iter()
            .map(|group| {
                let mut figure = Figure::new();
                figure.set_title(&format!("{} - {}", WINDOW_TITLE, group.title()));
                (group, figure)
            })
            .collect();
        Self { figures }
    }

    fn draw(figure: &mut Figure, group: SensorGroup, series: &GroupSeries) {
        let index: Vec<f64> = (0..series.len()).map(|i| i as f64).collect();

        figure.clear_axes();
        let axes = figure.axes2d();
        axes.set_title(group.title(), &[]);
        axes.set_x_label("Sample", &[]);
        axes.set_y_label("Measurements", &[]);
        axes.set_x_grid(true);
        axes.set_y_grid(true);

        axes.lines(
            index.iter().copied(),
            series.x().iter().copied(),
            &[Color("red"), LineWidth(2.0), Caption("X")],
        );
        axes.lines(
            index.iter().copied(),
            series.y().iter().copied(),
            &[Color("green"), LineWidth(2.0), Caption("Y")],
        );
        axes.lines(
            index.iter().copied(),
            series.z().iter().copied(),
            &[Color("blue"), LineWidth(2.0), Caption("Z")],
        );
    }
}

impl Default for GnuplotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for GnuplotRenderer {
    fn render(&mut self, series: &WindowedSeries) -> Result<(), RenderError> {
        if series.is_empty() {
            return Ok(());
        }
        for (group, figure) in self.figures.iter_mut() {
            Self::draw(figure, *group, series.group(*group));
            figure
                .show_and_keep_running()
                .map_err(|e| RenderError::Gnuplot(e.to_string()))?;
        }
        Ok(())
    }
}
