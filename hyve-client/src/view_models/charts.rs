//! Chart geometry for the score bar chart and the rent bubble scatter.
//!
//! Everything here is plain data in pixel space so front ends (the SVG
//! renderer, a TUI, tests) can draw or inspect it without a chart library.

use std::fmt;

use hyve_model::RecommendationRecord;

use super::cards::format_currency;

pub const SCORE_CHART_TITLE: &str = "Top Locations by Match Score";
pub const RENT_SCATTER_TITLE: &str =
    "Rent vs Job Opportunities (bubble size = job count)";
pub const LOCATION_AXIS_TITLE: &str = "Location";
pub const SCORE_AXIS_TITLE: &str = "Match Score (%)";
pub const RENT_AXIS_TITLE: &str = "Average Monthly Rent ($)";

pub const MIN_BUBBLE_RADIUS: f64 = 10.0;
pub const BUBBLE_RADIUS_SPAN: f64 = 20.0;

const SCORE_AXIS_MAX: f64 = 100.0;
const BAR_FILL: Rgba = Rgba::new(54, 162, 235, 0.7);
const BAR_BORDER: Rgba = Rgba::new(54, 162, 235, 1.0);
const BUDGET_STROKE: Rgba = Rgba::new(255, 0, 0, 0.7);
const BUDGET_DASH: [f64; 2] = [5.0, 5.0];
const BUDGET_LINE_WIDTH: f64 = 2.0;
const BUDGET_LABEL_OFFSET: f64 = 5.0;
const BAR_SLOT_FILL_RATIO: f64 = 0.72;
const TARGET_TICKS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Red-to-green fill for a `[0, 1]` score, blue fixed at 200.
pub fn score_color(score: f64) -> Rgba {
    let s = score.clamp(0.0, 1.0);
    let red = (255.0 * (1.0 - s)).floor() as u8;
    let green = (255.0 * s).floor() as u8;
    Rgba::new(red, green, 200, 0.7)
}

/// Bubble radius in pixels, scaled to the largest job count in the set.
pub fn bubble_radius(job_count: u64, max_job_count: u64) -> f64 {
    let max = max_job_count.max(1) as f64;
    job_count.max(1) as f64 / max * BUBBLE_RADIUS_SPAN + MIN_BUBBLE_RADIUS
}

/// Canvas size and the margins reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            margin_top: 48.0,
            margin_right: 24.0,
            margin_bottom: 72.0,
            margin_left: 80.0,
        }
    }
}

impl ChartFrame {
    pub fn plot_left(&self) -> f64 {
        self.margin_left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn plot_top(&self) -> f64 {
        self.margin_top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn plot_width(&self) -> f64 {
        self.plot_right() - self.plot_left()
    }

    pub fn plot_height(&self) -> f64 {
        self.plot_bottom() - self.plot_top()
    }

    /// Centre of category slot `index` out of `count` along the x axis.
    pub fn slot_center(&self, index: usize, count: usize) -> f64 {
        let slot = self.plot_width() / count.max(1) as f64;
        self.plot_left() + slot * (index as f64 + 0.5)
    }

    pub fn slot_width(&self, count: usize) -> f64 {
        self.plot_width() / count.max(1) as f64
    }
}

/// Linear value-to-pixel mapping for a vertical axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    /// Pixel row of `min` (bottom of the plot).
    pub pixel_bottom: f64,
    /// Pixel row of `max` (top of the plot).
    pub pixel_top: f64,
}

impl YAxis {
    fn fixed(title: &'static str, min: f64, max: f64, frame: &ChartFrame) -> Self {
        let step = nice_step((max - min) / TARGET_TICKS);
        Self {
            title,
            min,
            max,
            ticks: ticks_between(min, max, step),
            pixel_bottom: frame.plot_bottom(),
            pixel_top: frame.plot_top(),
        }
    }

    /// Fits a rounded domain around `values`.
    fn fitted(
        title: &'static str,
        values: impl IntoIterator<Item = f64>,
        frame: &ChartFrame,
    ) -> Self {
        let (mut lo, mut hi) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        if hi - lo < f64::EPSILON {
            let pad = (lo.abs() * 0.1).max(1.0);
            lo -= pad;
            hi += pad;
        }

        let step = nice_step((hi - lo) / TARGET_TICKS);
        let min = (lo / step).floor() * step;
        let max = (hi / step).ceil() * step;
        Self {
            title,
            min,
            max,
            ticks: ticks_between(min, max, step),
            pixel_bottom: frame.plot_bottom(),
            pixel_top: frame.plot_top(),
        }
    }

    /// Pixel row for `value`; values outside the domain map outside the
    /// plot area on the same line.
    pub fn pixel_for_value(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return self.pixel_bottom;
        }
        self.pixel_bottom
            + (value - self.min) / span * (self.pixel_top - self.pixel_bottom)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn ticks_between(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = ((max - min) / step).round() as usize;
    (0..=count).map(|i| min + step * i as f64).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub label: String,
    /// Score as a percentage, `score * 100`.
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bar chart of match score per location, y fixed to `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreChart {
    pub title: &'static str,
    pub x_title: &'static str,
    pub frame: ChartFrame,
    pub y_axis: YAxis,
    pub fill: Rgba,
    pub border: Rgba,
    pub bars: Vec<ScoreBar>,
}

impl ScoreChart {
    pub fn build(records: &[RecommendationRecord], frame: ChartFrame) -> Self {
        let y_axis = YAxis::fixed(SCORE_AXIS_TITLE, 0.0, SCORE_AXIS_MAX, &frame);
        let count = records.len();
        let width = frame.slot_width(count) * BAR_SLOT_FILL_RATIO;

        let bars = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let value = record.score * 100.0;
                let top = y_axis.pixel_for_value(value.clamp(0.0, SCORE_AXIS_MAX));
                ScoreBar {
                    label: record.location_label(),
                    value,
                    x: frame.slot_center(index, count) - width / 2.0,
                    y: top,
                    width,
                    height: y_axis.pixel_bottom - top,
                }
            })
            .collect();

        Self {
            title: SCORE_CHART_TITLE,
            x_title: LOCATION_AXIS_TITLE,
            frame,
            y_axis,
            fill: BAR_FILL,
            border: BAR_BORDER,
            bars,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Rgba,
    pub stroke: Rgba,
    /// Hover text: location, rent, job count, match score.
    pub tooltip: [String; 4],
}

/// Dashed horizontal marker at the user's rent budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub value: f64,
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub label: String,
    pub label_y: f64,
    pub stroke: Rgba,
    pub width: f64,
    pub dash: [f64; 2],
}

impl BudgetLine {
    fn new(budget: f64, y_axis: &YAxis, frame: &ChartFrame) -> Self {
        let y = y_axis.pixel_for_value(budget);
        Self {
            value: budget,
            y,
            x_start: frame.plot_left(),
            x_end: frame.plot_right(),
            label: format!("Your Budget: {}", format_currency(budget)),
            label_y: y - BUDGET_LABEL_OFFSET,
            stroke: BUDGET_STROKE,
            width: BUDGET_LINE_WIDTH,
            dash: BUDGET_DASH,
        }
    }

    /// Whether the line falls inside the plot area.
    pub fn is_visible(&self, frame: &ChartFrame) -> bool {
        self.y >= frame.plot_top() && self.y <= frame.plot_bottom()
    }
}

/// Rent per location as bubbles sized by job count, with a budget line.
///
/// The y domain is fitted to the rents only; a budget outside it still
/// gets a line position, just outside the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct RentScatter {
    pub title: &'static str,
    pub x_title: &'static str,
    pub frame: ChartFrame,
    pub x_labels: Vec<String>,
    pub y_axis: YAxis,
    pub points: Vec<ScatterPoint>,
    pub budget_line: BudgetLine,
}

impl RentScatter {
    pub fn build(
        records: &[RecommendationRecord],
        rent_budget: f64,
        frame: ChartFrame,
    ) -> Self {
        let y_axis = YAxis::fitted(
            RENT_AXIS_TITLE,
            records.iter().map(|record| record.avg_rent),
            &frame,
        );
        let max_jobs = records
            .iter()
            .map(|record| record.job_count)
            .max()
            .unwrap_or(1);
        let count = records.len();

        let points = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let fill = score_color(record.score);
                let label = record.location_label();
                ScatterPoint {
                    cx: frame.slot_center(index, count),
                    cy: y_axis.pixel_for_value(record.avg_rent),
                    radius: bubble_radius(record.job_count, max_jobs),
                    fill,
                    stroke: fill.with_alpha(1.0),
                    tooltip: [
                        label.clone(),
                        format!("Rent: {}", format_currency(record.avg_rent)),
                        format!("Job Count: {}", record.job_count),
                        format!("Match Score: {}", record.score_percentage),
                    ],
                    label,
                }
            })
            .collect();

        let budget_line = BudgetLine::new(rent_budget, &y_axis, &frame);

        Self {
            title: RENT_SCATTER_TITLE,
            x_title: LOCATION_AXIS_TITLE,
            frame,
            x_labels: records.iter().map(RecommendationRecord::location_label).collect(),
            y_axis,
            points,
            budget_line,
        }
    }
}
