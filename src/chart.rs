//! Spray chart of batted-ball locations.
//!
//! Statcast hit coordinates (`hc_x`, `hc_y`) are pixel positions on the
//! site's field image. They are shifted so home plate sits at the origin,
//! flipped so the outfield points up and scaled to feet.

use plotters::prelude::*;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::chart::{
    FEET_PER_UNIT, FENCE_DISTANCE_FEET, HEIGHT, HOME_PLATE_X, HOME_PLATE_Y, POINT_SIZE, WIDTH,
};
use crate::error::AppError;
use crate::table::{Table, cell_text};

/// Label for batted balls without a `bb_type`.
pub const UNKNOWN_BB_TYPE: &str = "unknown";

const INFIELD_ARC_FEET: f64 = 95.0;
const BOUNDS_MARGIN_FEET: f64 = 20.0;

/// A batted ball in field feet, home plate at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprayPoint {
    pub x: f64,
    pub y: f64,
}

impl SprayPoint {
    pub fn from_hit_coordinates(hc_x: f64, hc_y: f64) -> Self {
        SprayPoint {
            x: FEET_PER_UNIT * (hc_x - HOME_PLATE_X),
            y: FEET_PER_UNIT * (HOME_PLATE_Y - hc_y),
        }
    }
}

fn numeric_cell(row: &crate::table::Row, column: &str) -> Option<f64> {
    row.get(column)
        .and_then(cell_text)
        .and_then(|text| text.trim().parse::<f64>().ok())
}

/// Groups the table's batted balls by `bb_type`. Rows without both hit
/// coordinates are skipped.
pub fn spray_points_by_type(table: &Table, colorby: &str) -> BTreeMap<String, Vec<SprayPoint>> {
    let mut groups: BTreeMap<String, Vec<SprayPoint>> = BTreeMap::new();

    for row in table.rows() {
        let (Some(hc_x), Some(hc_y)) = (numeric_cell(row, "hc_x"), numeric_cell(row, "hc_y"))
        else {
            continue;
        };

        let label = row
            .get(colorby)
            .and_then(cell_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_BB_TYPE.to_string());

        groups
            .entry(label)
            .or_default()
            .push(SprayPoint::from_hit_coordinates(hc_x, hc_y));
    }

    groups
}

fn color_for(label: &str, index: usize) -> RGBAColor {
    match label {
        "ground_ball" => RGBColor(214, 39, 40).to_rgba(),
        "line_drive" => RGBColor(44, 160, 44).to_rgba(),
        "fly_ball" => RGBColor(31, 119, 180).to_rgba(),
        "popup" => RGBColor(148, 103, 189).to_rgba(),
        UNKNOWN_BB_TYPE => RGBColor(127, 127, 127).to_rgba(),
        _ => Palette99::pick(index).to_rgba(),
    }
}

/// Points on an arc of `radius` feet between the two foul lines.
fn fair_arc(radius: f64) -> Vec<(f64, f64)> {
    (45..=135)
        .map(|degrees| {
            let radians = f64::from(degrees) * PI / 180.0;
            (radius * radians.cos(), radius * radians.sin())
        })
        .collect()
}

/// Axis ranges covering the field outline and every point, with a margin
/// around points that land past it.
fn plot_bounds(groups: &BTreeMap<String, Vec<SprayPoint>>) -> (Range<f64>, Range<f64>) {
    let mut x_limit = FENCE_DISTANCE_FEET * 0.9;
    let mut y_min: f64 = -30.0;
    let mut y_max = FENCE_DISTANCE_FEET * 1.25;

    for point in groups.values().flatten() {
        x_limit = x_limit.max(point.x.abs() + BOUNDS_MARGIN_FEET);
        y_min = y_min.min(point.y - BOUNDS_MARGIN_FEET);
        y_max = y_max.max(point.y + BOUNDS_MARGIN_FEET);
    }

    (-x_limit..x_limit, y_min..y_max)
}

fn chart_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::chart_error(e.to_string())
}

/// Renders the spray chart of `table` to an SVG file at `path`, one colour
/// per distinct value of `colorby`. Returns the number of points drawn.
pub fn render_spray_chart(
    table: &Table,
    title: &str,
    colorby: &str,
    path: &Path,
) -> Result<usize, AppError> {
    let groups = spray_points_by_type(table, colorby);
    let point_count: usize = groups.values().map(Vec::len).sum();
    debug!("Plotting {} batted balls in {} groups", point_count, groups.len());

    let (x_range, y_range) = plot_bounds(&groups);

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("feet")
        .y_desc("feet")
        .draw()
        .map_err(chart_error)?;

    let foul_line = FENCE_DISTANCE_FEET * (PI / 4.0).cos();
    chart
        .draw_series(LineSeries::new(
            vec![(-foul_line, foul_line), (0.0, 0.0), (foul_line, foul_line)],
            &BLACK,
        ))
        .map_err(chart_error)?;
    chart
        .draw_series(LineSeries::new(fair_arc(FENCE_DISTANCE_FEET), &BLACK))
        .map_err(chart_error)?;
    chart
        .draw_series(LineSeries::new(fair_arc(INFIELD_ARC_FEET), &BLACK.mix(0.5)))
        .map_err(chart_error)?;

    for (index, (label, points)) in groups.iter().enumerate() {
        let color = color_for(label, index);
        chart
            .draw_series(
                points
                    .iter()
                    .map(move |p| Circle::new((p.x, p.y), POINT_SIZE, color.filled())),
            )
            .map_err(chart_error)?
            .label(label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
    }

    if !groups.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)?;
    info!("Spray chart with {} points written to {}", point_count, path.display());

    Ok(point_count)
}
