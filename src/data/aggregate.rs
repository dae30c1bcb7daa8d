use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Region summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RegionTotal {
    pub region: String,
    pub weight_kg: f64,
}

/// Total weight per region present in the view, sorted by region label.
/// Regions with no matching rows are absent rather than zero.
pub fn region_summary(view: &FilteredView<'_>) -> Vec<RegionTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for obs in view.iter() {
        *totals.entry(obs.region.as_str()).or_default() += obs.weight_kg;
    }
    totals
        .into_iter()
        .map(|(region, weight_kg)| RegionTotal {
            region: region.to_string(),
            weight_kg,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Time summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub weight_kg: f64,
}

/// Truncate a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Total weight per calendar month, in chronological order.
pub fn time_summary(view: &FilteredView<'_>) -> Vec<MonthTotal> {
    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
    for obs in view.iter() {
        *totals.entry(month_start(obs.date)).or_default() += obs.weight_kg;
    }

    let mut months: Vec<MonthTotal> = totals
        .into_iter()
        .map(|(month, weight_kg)| MonthTotal { month, weight_kg })
        .collect();
    // Grouping does not order the months; the line chart needs them sorted.
    months.sort_by_key(|m| m.month);
    months
}
