use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Fixed location of the observation data, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "ocean_plastic_pollution_data_cleaned.csv";

/// Display settings for the dashboard window and its views.
///
/// Everything here is a display default; nothing is derived from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub side_panel_width: f32,
    pub chart_height: f32,
    pub map: MapConfig,
}

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// (latitude, longitude) in degrees.
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_title: "Ocean Pollution Tracker".to_string(),
            window_size: [1200.0, 1000.0],
            min_window_size: [600.0, 400.0],
            side_panel_width: 220.0,
            chart_height: 400.0,
            map: MapConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Central Pacific.
            center: [0.0, -160.0],
            zoom: 3,
            width: 700.0,
            height: 500.0,
        }
    }
}

impl MapConfig {
    /// Center with longitude wrapped into [-180, 180) and latitude clamped
    /// to [-90, 90].
    pub fn normalized_center(&self) -> [f64; 2] {
        let [lat, lon] = self.center;
        let lat = lat.clamp(-90.0, 90.0);
        let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
        [lat, lon]
    }

    /// Visible (longitude, latitude) span in degrees for the configured zoom,
    /// using the 256px-tile convention of slippy maps.
    pub fn visible_span(&self) -> [f64; 2] {
        let lon_span = 360.0 * self.width as f64 / (256.0 * 2f64.powi(self.zoom as i32));
        let lon_span = lon_span.min(360.0);
        let lat_span = (lon_span * self.height as f64 / self.width as f64).min(180.0);
        [lon_span, lat_span]
    }

    /// Initial plot bounds as `([min_lon, min_lat], [max_lon, max_lat])`.
    pub fn initial_bounds(&self) -> ([f64; 2], [f64; 2]) {
        let [lat, lon] = self.normalized_center();
        let [lon_span, lat_span] = self.visible_span();
        (
            [lon - lon_span / 2.0, lat - lat_span / 2.0],
            [lon + lon_span / 2.0, lat + lat_span / 2.0],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_wrapped_and_clamped() {
        let map = MapConfig {
            center: [-100.0, -260.0],
            ..MapConfig::default()
        };
        assert_eq!(map.normalized_center(), [-90.0, 100.0]);

        let map = MapConfig {
            center: [10.0, 180.0],
            ..MapConfig::default()
        };
        assert_eq!(map.normalized_center(), [10.0, -180.0]);
    }

    #[test]
    fn zoom_three_span() {
        let map = MapConfig {
            center: [0.0, 0.0],
            zoom: 3,
            width: 512.0,
            height: 256.0,
        };
        // 360 * 512 / (256 * 8) = 90
        assert_eq!(map.visible_span(), [90.0, 45.0]);

        let (min, max) = map.initial_bounds();
        assert_eq!(min, [-45.0, -22.5]);
        assert_eq!(max, [45.0, 22.5]);
    }

    #[test]
    fn span_never_exceeds_globe() {
        let map = MapConfig {
            zoom: 0,
            width: 2000.0,
            height: 2000.0,
            ..MapConfig::default()
        };
        assert_eq!(map.visible_span(), [360.0, 180.0]);
    }
}
