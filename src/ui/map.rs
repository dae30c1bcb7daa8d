use eframe::egui::{Color32, Id, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotMemory, PlotPoint, Points};

use crate::config::MapConfig;
use crate::map::{MapLayer, MARKER_FILL_OPACITY};

// ---------------------------------------------------------------------------
// Pollution map (lon/lat scatter)
// ---------------------------------------------------------------------------

const GRID_COLOR: Color32 = Color32::from_gray(90);

/// Draw every marker of `layer`. When `reset_view` is set the view jumps to
/// the configured center and zoom, and the flag is cleared.
pub fn pollution_map(ui: &mut Ui, layer: &MapLayer, config: &MapConfig, reset_view: &mut bool) {
    let plot_id = Id::new("pollution_map");
    // Series switched off in the legend, as of the previous frame.
    let hidden = PlotMemory::load(ui.ctx(), plot_id)
        .map(|mem| mem.hidden_items)
        .unwrap_or_default();

    let response = Plot::new("pollution_map")
        .id(plot_id)
        .width(config.width)
        .height(config.height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if *reset_view {
                let (min, max) = config.initial_bounds();
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                *reset_view = false;
            }

            // Outline of the valid coordinate range.
            plot_ui.line(
                egui_plot::Line::new(vec![
                    [-180.0, -90.0],
                    [180.0, -90.0],
                    [180.0, 90.0],
                    [-180.0, 90.0],
                    [-180.0, -90.0],
                ])
                .color(GRID_COLOR)
                .width(1.0),
            );

            for marker in &layer.markers {
                let fill = marker.color.to_color32_alpha(MARKER_FILL_OPACITY);
                plot_ui.points(
                    Points::new(vec![[marker.longitude, marker.latitude]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker.radius)
                        .color(fill)
                        .name(&marker.plastic_type),
                );
            }

            let pointer = plot_ui.response().hover_pos()?;
            layer
                .marker_at([pointer.x, pointer.y], |ty| hidden.contains(ty), |m| {
                    let p = plot_ui.screen_from_plot(PlotPoint::new(m.longitude, m.latitude));
                    [p.x, p.y]
                })
                .map(|m| m.popup.clone())
        });

    if let Some(popup) = response.inner {
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.label(popup);
        });
    }

    if layer.is_empty() {
        ui.weak("No observations to show for the current selection.");
    }
}
