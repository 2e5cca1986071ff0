use eframe::egui;

use crate::state::AppState;
use crate::ui::{grid, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PenguinsDashboardApp {
    pub state: AppState,
}

impl PenguinsDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: value boxes, chart and grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::value_boxes(ui, &mut self.state);
            ui.add_space(8.0);

            let Some(chart) = self.state.session.as_mut().map(|s| s.chart()) else {
                return;
            };
            ui.columns(2, |cols| {
                plot::scatter_plot(&mut cols[0], &chart);
                grid::data_grid(&mut cols[1], &mut self.state);
            });
        });
    }
}
