use crate::color::{ColorAssigner, NamedColor};
use crate::data::filter::FilteredView;
use crate::data::model::Observation;

// ---------------------------------------------------------------------------
// Marker layer built from a filtered view
// ---------------------------------------------------------------------------

/// Opacity of a marker's fill.
pub const MARKER_FILL_OPACITY: f32 = 0.6;

/// Marker radius in screen points: 3 + weight^0.2.
pub fn marker_radius(weight_kg: f64) -> f32 {
    (3.0 + weight_kg.max(0.0).powf(0.2)) as f32
}

/// Hover text for one observation.
pub fn popup_text(obs: &Observation) -> String {
    let depth = obs
        .depth_m
        .map(|d| d.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "Region: {}\nPlastic Type: {}\nWeight (kg): {:.2}\nDepth (m): {}",
        obs.region, obs.plastic_type, obs.weight_kg, depth
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    /// Row index in the source table.
    pub row: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f32,
    pub color: NamedColor,
    pub plastic_type: String,
    pub popup: String,
}

/// Every plottable observation of a view, plus a count of those left off
/// for lack of usable coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayer {
    pub markers: Vec<MapMarker>,
    pub excluded: usize,
}

/// `colors` must already hold an assignment for every type in `view`.
pub fn build_layer(view: &FilteredView<'_>, colors: &ColorAssigner) -> MapLayer {
    let rows = view.table().observations();
    let mut layer = MapLayer::default();

    for &row in view.indices() {
        let obs = &rows[row];
        let Some((latitude, longitude)) = obs.coordinates() else {
            layer.excluded += 1;
            continue;
        };
        layer.markers.push(MapMarker {
            row,
            latitude,
            longitude,
            radius: marker_radius(obs.weight_kg),
            color: colors.color_for(&obs.plastic_type),
            plastic_type: obs.plastic_type.clone(),
            popup: popup_text(obs),
        });
    }
    if layer.excluded > 0 {
        log::debug!(
            "{} filtered observations have no usable coordinates",
            layer.excluded
        );
    }
    layer
}

impl MapLayer {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The marker under `pointer` whose centre is closest, if any.
    /// Markers whose plastic type `is_hidden` reports are never hit.
    /// `to_screen` projects a marker to screen coordinates.
    pub fn marker_at(
        &self,
        pointer: [f32; 2],
        is_hidden: impl Fn(&str) -> bool,
        to_screen: impl Fn(&MapMarker) -> [f32; 2],
    ) -> Option<&MapMarker> {
        self.markers
            .iter()
            .filter(|m| !is_hidden(&m.plastic_type))
            .filter_map(|m| {
                let [x, y] = to_screen(m);
                let dist2 = (x - pointer[0]).powi(2) + (y - pointer[1]).powi(2);
                (dist2 <= m.radius * m.radius).then_some((dist2, m))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, m)| m)
    }
}
