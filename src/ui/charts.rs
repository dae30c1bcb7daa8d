use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::{MonthTotal, RegionTotal};

const WEIGHT_LABEL: &str = "Plastic Weight (kg)";
const SERIES_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Dates are plotted as days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn month_tick(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// Month strides the date axis may use, smallest first.
const MONTH_STEPS: [i32; 8] = [1, 2, 3, 6, 12, 24, 60, 120];
const AVG_MONTH_DAYS: f64 = 30.44;
const MAX_DATE_MARKS: usize = 512;

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_from_index(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Grid marks on first-of-month days between `min_x` and `max_x`, as
/// `(x, step_size)`. The stride is the smallest in [`MONTH_STEPS`] that is
/// at least `base_step` days wide, so two marks never share a label.
fn month_marks(min_x: f64, max_x: f64, base_step: f64) -> Vec<(f64, f64)> {
    let (Some(first), Some(last)) = (x_to_date(min_x), x_to_date(max_x)) else {
        return Vec::new();
    };
    let step = MONTH_STEPS
        .iter()
        .copied()
        .find(|&s| f64::from(s) * AVG_MONTH_DAYS >= base_step)
        .unwrap_or(MONTH_STEPS[MONTH_STEPS.len() - 1]);
    let step_days = f64::from(step) * AVG_MONTH_DAYS;

    let mut index = month_index(first);
    index -= index.rem_euclid(step);
    let mut marks = Vec::new();
    while let Some(month) = month_from_index(index) {
        if month > last || marks.len() >= MAX_DATE_MARKS {
            break;
        }
        if month >= first {
            // Year starts draw stronger while the stride is below a year.
            let strength = if step < 12 && month.month0() == 0 {
                12.0 * AVG_MONTH_DAYS
            } else {
                step_days
            };
            marks.push((date_to_x(month), strength));
        }
        index += step;
    }
    marks
}

fn month_grid_spacer(input: GridInput) -> Vec<GridMark> {
    month_marks(input.bounds.0, input.bounds.1, input.base_step_size)
        .into_iter()
        .map(|(value, step_size)| GridMark { value, step_size })
        .collect()
}

/// Label for a bar-chart tick; only whole positions carry a region.
fn category_tick(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Total weight by region (bar chart)
// ---------------------------------------------------------------------------

pub fn region_bar_chart(ui: &mut Ui, summary: &[RegionTotal], height: f32) {
    ui.strong("Total Plastic Weight by Region");

    let labels: Vec<String> = summary.iter().map(|r| r.region.clone()).collect();
    let bars: Vec<Bar> = summary
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.weight_kg)
                .name(&r.region)
                .fill(SERIES_COLOR)
                .width(0.6)
        })
        .collect();

    Plot::new("region_bar_chart")
        .height(height)
        .x_axis_label("Region")
        .y_axis_label(WEIGHT_LABEL)
        .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if !bars.is_empty() {
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(WEIGHT_LABEL));
            }
        });
}

// ---------------------------------------------------------------------------
// Weight over time (line chart)
// ---------------------------------------------------------------------------

/// `summary` must be in chronological order.
pub fn time_line_chart(ui: &mut Ui, summary: &[MonthTotal], height: f32) {
    ui.strong("Plastic Weight Over Time");

    let points: Vec<[f64; 2]> = summary
        .iter()
        .map(|m| [date_to_x(m.month), m.weight_kg])
        .collect();

    Plot::new("time_line_chart")
        .height(height)
        .x_axis_label("Date")
        .y_axis_label(WEIGHT_LABEL)
        .x_grid_spacer(month_grid_spacer)
        .x_axis_formatter(|mark, _range| month_tick(mark.value))
        .label_formatter(|_name, value| {
            format!("{}\n{:.2} kg", month_tick(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if points.is_empty() {
                return;
            }
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(WEIGHT_LABEL)
                    .color(SERIES_COLOR)
                    .width(2.0),
            );
            plot_ui.points(Points::new(points).radius(3.0).color(SERIES_COLOR));
        });
}
