//! Server-side SVG charts: histogram with density overlay, bar chart and
//! multi-series line chart.

use crate::app::render::escape_html;
use crate::core::stats::Histogram;
use std::fmt::Write;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Line colours, cycled per series.
const PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];
const BAR_FILL: &str = "#4c72b0";

/// Linear mapping from data space to the plot area.
struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        // collapse a zero-width axis into a unit range
        let (x_min, x_max) = if x_max > x_min {
            (x_min, x_max)
        } else {
            (x_min - 0.5, x_min + 0.5)
        };
        let (y_min, y_max) = if y_max > y_min {
            (y_min, y_max)
        } else {
            (y_min, y_min + 1.0)
        };
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, value: f64) -> f64 {
        MARGIN_LEFT + (value - self.x_min) / (self.x_max - self.x_min) * Self::plot_width()
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + Self::plot_height()
            - (value - self.y_min) / (self.y_max - self.y_min) * Self::plot_height()
    }
}

/// One polyline of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

fn open_svg(out: &mut String, title: &str) {
    let _ = write!(
        out,
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        out,
        r#"<text x="{}" y="24" text-anchor="middle" font-size="16" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        escape_html(title)
    );
}

fn axes(out: &mut String, frame: &Frame, x_label: &str, y_label: &str, y_ticks: usize) {
    let bottom = MARGIN_TOP + Frame::plot_height();
    let right = MARGIN_LEFT + Frame::plot_width();
    let _ = write!(
        out,
        r##"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#333"/>"##,
        l = MARGIN_LEFT,
        r = right,
        t = MARGIN_TOP,
        b = bottom
    );

    for i in 0..=y_ticks {
        let value = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / y_ticks as f64;
        let y = frame.y(value);
        let _ = write!(
            out,
            r##"<line x1="{}" y1="{y:.1}" x2="{l}" y2="{y:.1}" stroke="#333"/><text x="{}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"##,
            MARGIN_LEFT - 4.0,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            tick_label(value),
            l = MARGIN_LEFT,
            y = y
        );
    }

    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
        MARGIN_LEFT + Frame::plot_width() / 2.0,
        HEIGHT - 10.0,
        escape_html(x_label)
    );
    let _ = write!(
        out,
        r#"<text x="16" y="{y}" text-anchor="middle" font-size="12" transform="rotate(-90 16 {y})">{}</text>"#,
        escape_html(y_label),
        y = MARGIN_TOP + Frame::plot_height() / 2.0
    );
}

fn x_tick(out: &mut String, frame: &Frame, value: f64, label: &str) {
    let x = frame.x(value);
    let bottom = MARGIN_TOP + Frame::plot_height();
    let _ = write!(
        out,
        r##"<line x1="{x:.1}" y1="{b}" x2="{x:.1}" y2="{}" stroke="#333"/><text x="{x:.1}" y="{}" text-anchor="middle" font-size="11">{}</text>"##,
        bottom + 4.0,
        bottom + 16.0,
        escape_html(label),
        x = x,
        b = bottom
    );
}

fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn polyline(points: &[(f64, f64)], frame: &Frame, colour: &str, dashed: bool) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", frame.x(*x), frame.y(*y)))
        .collect();
    format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="2"{} points="{}"/>"#,
        colour,
        if dashed { r#" stroke-dasharray="6 4""# } else { "" },
        coords.join(" ")
    )
}

/// Histogram bars with an optional density curve scaled to counts.
pub fn histogram_svg(
    title: &str,
    x_label: &str,
    hist: &Histogram,
    kde: Option<&[(f64, f64)]>,
) -> String {
    let bins = hist.counts.len();
    let x_min = hist.edges[0];
    let x_max = hist.edges[bins];
    // density * n * bin width puts the curve on the count axis
    let scale = hist.total() as f64 * hist.bin_width();
    let kde_peak = kde
        .map(|curve| curve.iter().map(|(_, d)| d * scale).fold(0.0, f64::max))
        .unwrap_or(0.0);
    let count_peak = hist.counts.iter().copied().max().unwrap_or(0) as f64;
    let frame = Frame::new(x_min, x_max, 0.0, count_peak.max(kde_peak) * 1.05);

    let mut out = String::new();
    open_svg(&mut out, title);
    axes(&mut out, &frame, x_label, "Count", 5);

    for (i, count) in hist.counts.iter().enumerate() {
        let (left, right) = (frame.x(hist.edges[i]), frame.x(hist.edges[i + 1]));
        let top = frame.y(*count as f64);
        let _ = write!(
            out,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="0.6" stroke="#fff"><title>{}</title></rect>"##,
            left,
            top,
            (right - left).max(0.0),
            frame.y(0.0) - top,
            BAR_FILL,
            count
        );
    }

    let tick_step = (bins / 8).max(1);
    for i in (0..=bins).step_by(tick_step) {
        x_tick(&mut out, &frame, hist.edges[i], &tick_label(hist.edges[i]));
    }

    if let Some(curve) = kde {
        let scaled: Vec<(f64, f64)> = curve.iter().map(|(x, d)| (*x, d * scale)).collect();
        out.push_str(&polyline(&scaled, &frame, PALETTE[0], false));
    }

    out.push_str("</svg>");
    out
}

/// Vertical bars, one per category, in the given order.
pub fn bar_chart_svg(title: &str, x_label: &str, bars: &[(String, f64)]) -> String {
    let peak = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let frame = Frame::new(0.0, bars.len().max(1) as f64, 0.0, peak * 1.05);

    let mut out = String::new();
    open_svg(&mut out, title);
    axes(&mut out, &frame, x_label, "Count", 5);

    for (i, (category, value)) in bars.iter().enumerate() {
        let left = frame.x(i as f64 + 0.15);
        let right = frame.x(i as f64 + 0.85);
        let top = frame.y(*value);
        let _ = write!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}: {}</title></rect>"#,
            left,
            top,
            right - left,
            frame.y(0.0) - top,
            BAR_FILL,
            escape_html(category),
            tick_label(*value)
        );
        x_tick(&mut out, &frame, i as f64 + 0.5, category);
    }

    out.push_str("</svg>");
    out
}

/// Line chart on the unit square with a legend, for ROC curves.
/// `diagonal` adds the dashed chance line.
pub fn line_chart_svg(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
    diagonal: bool,
) -> String {
    let frame = Frame::new(0.0, 1.0, 0.0, 1.0);

    let mut out = String::new();
    open_svg(&mut out, title);
    axes(&mut out, &frame, x_label, y_label, 5);
    for i in 0..=5 {
        let value = i as f64 / 5.0;
        x_tick(&mut out, &frame, value, &tick_label(value));
    }

    if diagonal {
        out.push_str(&polyline(&[(0.0, 0.0), (1.0, 1.0)], &frame, "#000", true));
    }

    for (i, s) in series.iter().enumerate() {
        let colour = PALETTE[i % PALETTE.len()];
        out.push_str(&polyline(&s.points, &frame, colour, false));

        // legend in the lower right corner
        let y = MARGIN_TOP + Frame::plot_height() - 20.0 * (series.len() - i) as f64;
        let x = MARGIN_LEFT + Frame::plot_width() - 250.0;
        let _ = write!(
            out,
            r#"<line x1="{x}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="2"/><text x="{}" y="{}" font-size="12">{}</text>"#,
            x + 20.0,
            colour,
            x + 26.0,
            y + 4.0,
            escape_html(&s.label),
            x = x,
            y = y
        );
    }

    out.push_str("</svg>");
    out
}
