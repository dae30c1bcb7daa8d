use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OceanTrackerApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl OceanTrackerApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for OceanTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: title, charts, map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("🌊 Ocean Pollution Tracker");
                    ui.add_space(8.0);

                    let Some(dataset) = &self.state.dataset else {
                        ui.label("The dashboard is unavailable until the data file is fixed.");
                        ui.monospace(self.config.data_path.display().to_string());
                        return;
                    };
                    if dataset.is_empty() {
                        ui.label("The data file holds no usable observations.");
                        ui.monospace(dataset.source().display().to_string());
                        ui.add_space(8.0);
                    }

                    let height = self.config.chart_height;
                    charts::region_bar_chart(ui, &self.state.region_summary, height);
                    ui.add_space(12.0);
                    charts::time_line_chart(ui, &self.state.time_summary, height);
                    ui.add_space(12.0);

                    ui.heading("Plastic Pollution Map");
                    map::pollution_map(
                        ui,
                        &self.state.map_layer,
                        &self.config.map,
                        &mut self.state.reset_map_view,
                    );
                });
        });
    }
}
