use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::bindings::ChartSpec;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render a chart specification as a scatter plot, one series per colour group.
pub fn scatter_plot(ui: &mut Ui, chart: &ChartSpec) {
    ui.strong(&chart.title);

    Plot::new("bill_scatter")
        .legend(Legend::default())
        .x_axis_label(chart.x.name())
        .y_axis_label(chart.y.name())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.label)
                        .color(series.color)
                        .radius(3.0)
                        .filled(true),
                );
            }
        });
}
