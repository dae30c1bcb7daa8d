use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in [Dimension::Region, Dimension::PlasticType] {
                let options = dim.options(&dataset);
                let n_selected = state.selection.get(dim).len();
                let header_text = format!("Select {}  ({n_selected}/{})", dim.label(), options.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for value in options {
                            let mut checked = state.selection.get(dim).contains(value);

                            // Tint plastic types with their map colour once assigned.
                            let mut text = RichText::new(value);
                            if dim == Dimension::PlasticType {
                                if let Some(c) = state.colors.get(value) {
                                    text = text.color(c.to_color32());
                                }
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.set_selected(dim, value, checked);
                            }
                        }
                    });
                ui.separator();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations loaded, {} visible ({:.1} kg)",
                ds.len(),
                state.visible_indices.len(),
                state.visible_weight_kg
            ));

            let report = ds.report();
            if report.total_skipped() > 0 {
                ui.separator();
                let reasons: Vec<String> = report
                    .skipped
                    .iter()
                    .map(|(reason, n)| format!("{n} {reason}"))
                    .collect();
                ui.label(
                    RichText::new(format!("Skipped rows: {}", reasons.join(", ")))
                        .color(Color32::YELLOW),
                )
                .on_hover_text(ds.source().display().to_string());
            }

            if state.map_layer.excluded > 0 {
                ui.separator();
                ui.label(format!(
                    "{} not on map (no coordinates)",
                    state.map_layer.excluded
                ));
            }

            ui.separator();
            if ui.button("Reset map view").clicked() {
                state.reset_map_view = true;
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
