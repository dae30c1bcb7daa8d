use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const OUTPUT_PATH: &str = "ocean_plastic_pollution_data_cleaned.csv";
const ROWS: usize = 600;

/// Region name with the (lat, lon) box observations are scattered in.
const REGIONS: [(&str, [f64; 2], [f64; 2]); 6] = [
    ("North Pacific", [20.0, 45.0], [-170.0, -130.0]),
    ("South Pacific", [-40.0, -10.0], [-150.0, -100.0]),
    ("North Atlantic", [20.0, 50.0], [-60.0, -20.0]),
    ("South Atlantic", [-40.0, -5.0], [-30.0, 5.0]),
    ("Indian Ocean", [-30.0, 10.0], [55.0, 100.0]),
    ("Mediterranean", [31.0, 43.0], [-5.0, 35.0]),
];

/// Plastic type with a typical weight in kg.
const PLASTIC_TYPES: [(&str, f64); 7] = [
    ("plastic_bottle", 4.0),
    ("fishing_net", 40.0),
    ("plastic_bag", 2.0),
    ("microplastic", 0.5),
    ("other", 8.0),
    ("rope", 15.0),
    ("styrofoam", 3.0),
];

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Plastic_Type")]
    plastic_type: &'a str,
    #[serde(rename = "Plastic_Weight_kg")]
    weight_kg: f64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Depth_meters")]
    depth_m: f64,
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let first_day = NaiveDate::from_ymd_opt(2022, 1, 1).context("invalid start date")?;
    let days_covered = 2 * 365;

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    for _ in 0..ROWS {
        let &(region, lat_range, lon_range) = REGIONS.choose(&mut rng).context("no regions")?;
        let &(plastic_type, typical_kg) =
            PLASTIC_TYPES.choose(&mut rng).context("no plastic types")?;

        // Skewed weights: mostly small, a few heavy finds.
        let weight_kg = typical_kg * rng.gen_range(0.05f64..1.0).powi(2) * 2.0;
        let date = first_day + Duration::days(rng.gen_range(0..days_covered));

        writer
            .serialize(Row {
                region,
                plastic_type,
                weight_kg: round_to(weight_kg, 3),
                date: date.format("%Y-%m-%d").to_string(),
                latitude: round_to(rng.gen_range(lat_range[0]..lat_range[1]), 4),
                longitude: round_to(rng.gen_range(lon_range[0]..lon_range[1]), 4),
                depth_m: round_to(rng.gen_range(0.0..200.0), 1),
            })
            .context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} observations to {OUTPUT_PATH}");
    Ok(())
}
