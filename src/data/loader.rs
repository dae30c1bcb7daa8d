use std::cell::OnceCell;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::model::{LoadReport, Observation, ObservationTable, SkipReason};

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Region",
    "Plastic_Type",
    "Plastic_Weight_kg",
    "Date",
    "Latitude",
    "Longitude",
    "Depth_meters",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The data file could not be turned into a table. The dashboard has nothing
/// to show until the file is fixed.
#[derive(Debug, Error)]
#[error("data unavailable ({}): {cause:#}", .path.display())]
pub struct DataUnavailable {
    pub path: PathBuf,
    cause: anyhow::Error,
}

// ---------------------------------------------------------------------------
// Memoizing loader
// ---------------------------------------------------------------------------

/// Reads one fixed file, once.
///
/// The first successful [`DataLoader::load`] parses the file; every later call
/// hands back the same table without touching storage, even if the file has
/// changed since. There is no invalidation.
#[derive(Debug)]
pub struct DataLoader {
    path: PathBuf,
    cache: OnceCell<Arc<ObservationTable>>,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    pub fn load(&self) -> Result<Arc<ObservationTable>, DataUnavailable> {
        if let Some(table) = self.cache.get() {
            log::debug!("Serving cached table for {}", self.path.display());
            return Ok(Arc::clone(table));
        }

        let table = load_csv(&self.path).map_err(|cause| DataUnavailable {
            path: self.path.clone(),
            cause,
        })?;
        log::info!(
            "Loaded {} of {} rows from {} ({} skipped)",
            table.len(),
            table.report().rows_read,
            self.path.display(),
            table.report().total_skipped()
        );

        Ok(Arc::clone(self.cache.get_or_init(|| Arc::new(table))))
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Raw CSV row. Weight and date stay textual so a bad value skips the row
/// instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Plastic_Type")]
    plastic_type: String,
    #[serde(rename = "Plastic_Weight_kg")]
    weight_kg: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Latitude", deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
    #[serde(rename = "Depth_meters", deserialize_with = "csv::invalid_option")]
    depth_m: Option<f64>,
}

fn load_csv(path: &Path) -> Result<ObservationTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_observations(file, path)
}

/// Parse observation rows from any reader. `source` is only recorded on the
/// resulting table.
pub fn parse_observations<R: Read>(input: R, source: &Path) -> Result<ObservationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("CSV missing required column(s): {}", missing.join(", "));
    }

    let mut observations = Vec::new();
    let mut report = LoadReport::default();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        report.rows_read += 1;

        let Some(date) = parse_date(&row.date) else {
            log::warn!("CSV row {row_no}: skipping, '{}' is not a date", row.date);
            report.record_skip(SkipReason::InvalidDate);
            continue;
        };
        let Some(weight_kg) = parse_weight(&row.weight_kg) else {
            log::warn!(
                "CSV row {row_no}: skipping, '{}' is not a valid weight",
                row.weight_kg
            );
            report.record_skip(SkipReason::InvalidWeight);
            continue;
        };

        observations.push(Observation {
            region: row.region,
            plastic_type: row.plastic_type,
            weight_kg,
            date,
            latitude: row.latitude,
            longitude: row.longitude,
            depth_m: row.depth_m,
        });
    }

    Ok(ObservationTable::new(
        observations,
        source.to_path_buf(),
        report,
    ))
}

/// Accepts plain dates and date-times; the time of day is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_weight(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str =
        "Region,Plastic_Type,Plastic_Weight_kg,Date,Latitude,Longitude,Depth_meters\n";

    fn parse(body: &str) -> Result<ObservationTable> {
        let csv = format!("{HEADER}{body}");
        parse_observations(csv.as_bytes(), Path::new("inline.csv"))
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_rows() {
        let table = parse(
            "North Pacific,plastic_bottle,12.5,2024-01-05,30.1,-140.2,12\n\
             Indian Ocean,fishing_net,3,2024-02-11,-10,75.5,\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.observations()[0];
        assert_eq!(first.region, "North Pacific");
        assert_eq!(first.plastic_type, "plastic_bottle");
        assert_eq!(first.weight_kg, 12.5);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(first.latitude, Some(30.1));
        assert_eq!(first.depth_m, Some(12.0));
        assert_eq!(table.observations()[1].depth_m, None);
        assert_eq!(table.report().rows_read, 2);
    }

    #[test]
    fn extra_columns_and_column_order_are_tolerated() {
        let csv = "Date,Id,Plastic_Type,Region,Longitude,Latitude,Depth_meters,Plastic_Weight_kg\n\
                   2023-07-01,1,other,Arctic,10,80,2,1.5\n";
        let table = parse_observations(csv.as_bytes(), Path::new("x.csv")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.observations()[0].region, "Arctic");
        assert_eq!(table.observations()[0].longitude, Some(10.0));
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "Region,Plastic_Type,Plastic_Weight_kg,Date,Latitude,Longitude\n";
        let err = parse_observations(csv.as_bytes(), Path::new("x.csv")).unwrap_err();
        assert!(err.to_string().contains("Depth_meters"));
    }

    #[test]
    fn bom_and_padded_headers_are_accepted() {
        let csv = "\u{feff}Region , Plastic_Type,Plastic_Weight_kg ,Date,Latitude, Longitude,Depth_meters\n\
                   Arctic,rope,2.5,2024-04-01,80,10,3\n";
        let table = parse_observations(csv.as_bytes(), Path::new("x.csv")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.observations()[0].region, "Arctic");
        assert_eq!(table.observations()[0].weight_kg, 2.5);
    }

    #[test]
    fn header_only_file_loads_as_empty_table() {
        let file = write_temp(HEADER);
        let table = DataLoader::new(file.path()).load().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.report().rows_read, 0);
        assert!(table.regions().is_empty());
        assert!(table.plastic_types().is_empty());
    }

    #[test]
    fn empty_file_is_missing_every_column() {
        let err = parse_observations("".as_bytes(), Path::new("x.csv")).unwrap_err();
        assert!(err.to_string().starts_with("CSV missing required column(s): Region"));
    }

    #[test]
    fn ragged_row_is_an_error() {
        assert!(parse("A,other,1.0,2024-01-01,0,0\n").is_err());
    }

    #[test]
    fn bad_dates_and_weights_are_skipped() {
        let table = parse(
            "A,other,1.0,not-a-date,0,0,1\n\
             A,other,-4,2024-01-01,0,0,1\n\
             A,other,abc,2024-01-01,0,0,1\n\
             A,other,2.0,2024-03-09 14:30:00,0,0,1\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.report().rows_read, 4);
        assert_eq!(table.report().skipped[&SkipReason::InvalidDate], 1);
        assert_eq!(table.report().skipped[&SkipReason::InvalidWeight], 2);
        assert_eq!(
            table.observations()[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn invalid_coordinates_become_none() {
        let table = parse("A,other,1.0,2024-01-01,north,,1\n").unwrap();
        let o = &table.observations()[0];
        assert_eq!(o.latitude, None);
        assert_eq!(o.longitude, None);
        assert_eq!(o.coordinates(), None);
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_date("2024-02-29"), expected);
        assert_eq!(parse_date("2024/02/29"), expected);
        assert_eq!(parse_date("02/29/2024"), expected);
        assert_eq!(parse_date("2024-02-29T08:00:00"), expected);
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(dir.path().join("nope.csv"));
        let err = loader.load().unwrap_err();
        assert!(err.to_string().starts_with("data unavailable"));
        assert!(err.to_string().contains("opening CSV"));
        // Failures are not memoized.
        assert!(loader.load().is_err());
    }

    #[test]
    fn load_is_memoized_and_never_invalidated() {
        let file = write_temp(&format!("{HEADER}A,other,1.0,2024-01-01,0,0,1\n"));
        let loader = DataLoader::new(file.path());

        let first = loader.load().unwrap();
        assert_eq!(first.len(), 1);

        // Rewrite the file; the loader keeps serving the stale table.
        std::fs::write(
            file.path(),
            format!("{HEADER}A,other,1.0,2024-01-01,0,0,1\nB,other,2.0,2024-01-02,0,0,1\n"),
        )
        .unwrap();

        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        // Removing it entirely does not matter either.
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
        assert!(loader.load().is_ok());
    }
}
