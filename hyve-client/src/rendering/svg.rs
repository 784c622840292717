//! Standalone SVG documents for the two charts.

use std::fmt::Write as _;

use crate::view_models::charts::{ChartFrame, RentScatter, ScoreChart, YAxis};

const FONT: &str = "Arial, sans-serif";
const AXIS_COLOR: &str = "#666666";
const GRID_COLOR: &str = "#e5e5e5";

pub fn render_score_chart(chart: &ScoreChart) -> String {
    let mut svg = open_document(&chart.frame, chart.title);
    push_y_axis(&mut svg, &chart.frame, &chart.y_axis, |v| format!("{v:.0}"));

    for bar in &chart.bars {
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="1"><title>{}: {:.1}%</title></rect>"#,
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            chart.fill,
            chart.border,
            escape(&bar.label),
            bar.value
        );
    }

    let labels: Vec<&str> = chart.bars.iter().map(|bar| bar.label.as_str()).collect();
    push_x_axis(&mut svg, &chart.frame, &labels, chart.x_title);
    close_document(svg)
}

pub fn render_rent_scatter(scatter: &RentScatter) -> String {
    let mut svg = open_document(&scatter.frame, scatter.title);
    push_y_axis(&mut svg, &scatter.frame, &scatter.y_axis, |v| {
        format!("${v:.0}")
    });

    for point in &scatter.points {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}" stroke-width="1"><title>{}</title></circle>"#,
            point.cx,
            point.cy,
            point.radius,
            point.fill,
            point.stroke,
            escape(&point.tooltip.join("\n"))
        );
    }

    let line = &scatter.budget_line;
    if line.is_visible(&scatter.frame) {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}" stroke-dasharray="{},{}"/>"#,
            line.x_start,
            line.y,
            line.x_end,
            line.y,
            line.stroke,
            line.width,
            line.dash[0],
            line.dash[1]
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-family="{FONT}" font-size="12" fill="{}">{}</text>"#,
            line.x_end,
            line.label_y,
            line.stroke,
            escape(&line.label)
        );
    }

    let labels: Vec<&str> = scatter.x_labels.iter().map(String::as_str).collect();
    push_x_axis(&mut svg, &scatter.frame, &labels, scatter.x_title);
    close_document(svg)
}

fn open_document(frame: &ChartFrame, title: &str) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="white"/>"#,
        frame.width, frame.height
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="16" font-weight="bold">{}</text>"#,
        frame.width / 2.0,
        frame.margin_top / 2.0 + 6.0,
        escape(title)
    );
    svg
}

fn close_document(mut svg: String) -> String {
    svg.push_str("</svg>\n");
    svg
}

fn push_y_axis(
    svg: &mut String,
    frame: &ChartFrame,
    axis: &YAxis,
    tick_label: impl Fn(f64) -> String,
) {
    for &tick in &axis.ticks {
        let y = axis.pixel_for_value(tick);
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID_COLOR}" stroke-width="1"/>"#,
            frame.plot_left(),
            frame.plot_right()
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-family="{FONT}" font-size="11" fill="{AXIS_COLOR}">{}</text>"#,
            frame.plot_left() - 6.0,
            y + 4.0,
            escape(&tick_label(tick))
        );
    }
    let _ = writeln!(
        svg,
        r#"  <line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
        frame.plot_top(),
        frame.plot_bottom(),
        x = frame.plot_left()
    );
    let cx = 18.0;
    let cy = frame.plot_top() + frame.plot_height() / 2.0;
    let _ = writeln!(
        svg,
        r#"  <text x="{cx:.1}" y="{cy:.1}" transform="rotate(-90 {cx:.1} {cy:.1})" text-anchor="middle" font-family="{FONT}" font-size="12" fill="{AXIS_COLOR}">{}</text>"#,
        escape(axis.title)
    );
}

fn push_x_axis(svg: &mut String, frame: &ChartFrame, labels: &[&str], title: &str) {
    let _ = writeln!(
        svg,
        r#"  <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{AXIS_COLOR}" stroke-width="1"/>"#,
        frame.plot_left(),
        frame.plot_right(),
        y = frame.plot_bottom()
    );
    for (index, label) in labels.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="11" fill="{AXIS_COLOR}">{}</text>"#,
            frame.slot_center(index, labels.len()),
            frame.plot_bottom() + 18.0,
            escape(label)
        );
    }
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="12" fill="{AXIS_COLOR}">{}</text>"#,
        frame.plot_left() + frame.plot_width() / 2.0,
        frame.height - 16.0,
        escape(title)
    );
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
