use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Observation – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single pollution observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub region: String,
    pub plastic_type: String,
    /// Always finite and non-negative.
    pub weight_kg: f64,
    pub date: NaiveDate,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Display-only.
    pub depth_m: Option<f64>,
}

impl Observation {
    /// Coordinates as `(latitude, longitude)` if both are present, finite and
    /// inside the geographic range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.filter(|v| v.is_finite() && v.abs() <= 90.0)?;
        let lon = self.longitude.filter(|v| v.is_finite() && v.abs() <= 180.0)?;
        Some((lat, lon))
    }
}

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Why a CSV row was left out of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    InvalidDate,
    InvalidWeight,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidDate => write!(f, "invalid date"),
            SkipReason::InvalidWeight => write!(f, "invalid weight"),
        }
    }
}

/// Bookkeeping from a single load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Data rows read from the file (excluding the header).
    pub rows_read: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl LoadReport {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    observations: Vec<Observation>,
    regions: BTreeSet<String>,
    plastic_types: BTreeSet<String>,
    source: PathBuf,
    report: LoadReport,
}

impl ObservationTable {
    /// Build the distinct-value indices from the loaded rows.
    pub fn new(observations: Vec<Observation>, source: PathBuf, report: LoadReport) -> Self {
        let regions = observations.iter().map(|o| o.region.clone()).collect();
        let plastic_types = observations
            .iter()
            .map(|o| o.plastic_type.clone())
            .collect();
        ObservationTable {
            observations,
            regions,
            plastic_types,
            source,
            report,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Sorted distinct `Region` values.
    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    /// Sorted distinct `Plastic_Type` values.
    pub fn plastic_types(&self) -> &BTreeSet<String> {
        &self.plastic_types
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn obs(region: &str, plastic_type: &str, weight_kg: f64, date: &str) -> Observation {
        Observation {
            region: region.to_string(),
            plastic_type: plastic_type.to_string(),
            weight_kg,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            latitude: Some(10.0),
            longitude: Some(-150.0),
            depth_m: Some(5.0),
        }
    }

    pub(crate) fn table(rows: Vec<Observation>) -> ObservationTable {
        ObservationTable::new(rows, PathBuf::from("test.csv"), LoadReport::default())
    }

    /// The three-row fixture used across the pipeline tests.
    pub(crate) fn scenario_table() -> ObservationTable {
        table(vec![
            obs("A", "bottle", 10.0, "2024-01-05"),
            obs("A", "net", 5.0, "2024-01-20"),
            obs("B", "bottle", 7.0, "2024-02-01"),
        ])
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let t = table(vec![
            obs("South Pacific", "plastic_bag", 1.0, "2024-01-01"),
            obs("Arctic", "fishing_net", 1.0, "2024-01-01"),
            obs("South Pacific", "fishing_net", 1.0, "2024-01-01"),
        ]);
        let regions: Vec<_> = t.regions().iter().cloned().collect();
        let types: Vec<_> = t.plastic_types().iter().cloned().collect();
        assert_eq!(regions, vec!["Arctic", "South Pacific"]);
        assert_eq!(types, vec!["fishing_net", "plastic_bag"]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn coordinates_require_valid_range() {
        let mut o = obs("A", "net", 1.0, "2024-01-01");
        assert_eq!(o.coordinates(), Some((10.0, -150.0)));

        o.latitude = Some(91.0);
        assert_eq!(o.coordinates(), None);

        o.latitude = Some(0.0);
        o.longitude = Some(f64::NAN);
        assert_eq!(o.coordinates(), None);

        o.longitude = None;
        assert_eq!(o.coordinates(), None);
    }

    #[test]
    fn report_counts_skips() {
        let mut report = LoadReport::default();
        report.record_skip(SkipReason::InvalidDate);
        report.record_skip(SkipReason::InvalidDate);
        report.record_skip(SkipReason::InvalidWeight);
        assert_eq!(report.skipped[&SkipReason::InvalidDate], 2);
        assert_eq!(report.total_skipped(), 3);
    }
}
