//! Renders a [`Chart`] as inline SVG inside a standalone HTML page.

use super::{Chart, Layout, LineStyle, MarkerStyle, MarkerSymbol, TextPosition, Trace};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 640.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TARGET_TICKS: usize = 6;
const LEGEND_ROW: f64 = 20.0;
const TEXT_LINE: f64 = 14.0;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TEMPLATE: &str = include_str!("template.html");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialise chart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Maps data coordinates onto the plot area.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn fit(chart: &Chart) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for trace in chart.traces() {
            for (x, y) in trace.points() {
                if x.is_finite() && y.is_finite() {
                    xs.push(x);
                    ys.push(y);
                }
            }
        }
        let (x_min, x_max) = padded_extent(&xs);
        let (y_min, y_max) = padded_extent(&ys);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn left() -> f64 {
        MARGIN_LEFT
    }

    fn right() -> f64 {
        WIDTH - MARGIN_RIGHT
    }

    fn top() -> f64 {
        MARGIN_TOP
    }

    fn bottom() -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        let norm = (x - self.x_min) / (self.x_max - self.x_min);
        Self::left() + norm * (Self::right() - Self::left())
    }

    fn py(&self, y: f64) -> f64 {
        let norm = (y - self.y_min) / (self.y_max - self.y_min);
        Self::bottom() - norm * (Self::bottom() - Self::top())
    }
}

/// Min/max of `values` widened by 5% per side; flat ranges are widened
/// around their value.
fn padded_extent(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        let adjust = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - adjust, hi + adjust);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn tick_step(span: f64) -> f64 {
    let raw = span / TARGET_TICKS as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn ticks(lo: f64, hi: f64) -> (Vec<f64>, usize) {
    let step = tick_step(hi - lo);
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let values = (first..=last).map(|i| i as f64 * step).collect();
    (values, decimals)
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn draw_grid(svg: &mut String, frame: &Frame, layout: &Layout) {
    let (x_ticks, x_decimals) = ticks(frame.x_min, frame.x_max);
    let (y_ticks, y_decimals) = ticks(frame.y_min, frame.y_max);

    for x in &x_ticks {
        let px = frame.px(*x);
        let _ = write!(
            svg,
            r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}" stroke="{color}" stroke-width="1" />"#,
            top = Frame::top(),
            bottom = Frame::bottom(),
            color = layout.x_axis.grid_color,
        );
        let _ = write!(
            svg,
            r#"<text x="{px:.2}" y="{y:.2}" text-anchor="middle">{x:.x_decimals$}</text>"#,
            y = Frame::bottom() + 18.0,
        );
    }

    for y in &y_ticks {
        let py = frame.py(*y);
        let _ = write!(
            svg,
            r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}" stroke="{color}" stroke-width="1" />"#,
            left = Frame::left(),
            right = Frame::right(),
            color = layout.y_axis.grid_color,
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{ty:.2}" text-anchor="end">{y:.y_decimals$}</text>"#,
            x = Frame::left() - 8.0,
            ty = py + 4.0,
        );
    }

    if layout.x_axis.zero_line && frame.x_min <= 0.0 && frame.x_max >= 0.0 {
        let px = frame.px(0.0);
        let _ = write!(
            svg,
            r#"<line class="zero-line" x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}" stroke="{color}" stroke-width="{width}" />"#,
            top = Frame::top(),
            bottom = Frame::bottom(),
            color = layout.x_axis.zero_line_color,
            width = layout.x_axis.zero_line_width,
        );
    }
    if layout.y_axis.zero_line && frame.y_min <= 0.0 && frame.y_max >= 0.0 {
        let py = frame.py(0.0);
        let _ = write!(
            svg,
            r#"<line class="zero-line" x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}" stroke="{color}" stroke-width="{width}" />"#,
            left = Frame::left(),
            right = Frame::right(),
            color = layout.y_axis.zero_line_color,
            width = layout.y_axis.zero_line_width,
        );
    }
}

fn draw_titles(svg: &mut String, layout: &Layout) {
    let _ = write!(
        svg,
        r##"<text class="title" x="{x:.2}" y="40" text-anchor="middle" font-size="{size}" fill="#2a3f5f">{title}</text>"##,
        x = WIDTH / 2.0,
        size = layout.title_font_size,
        title = escape(&layout.title),
    );
    let _ = write!(
        svg,
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="{size}" fill="#2a3f5f">{title}</text>"##,
        x = (Frame::left() + Frame::right()) / 2.0,
        y = HEIGHT - 20.0,
        size = layout.x_axis.title_font_size,
        title = escape(layout.x_axis.title),
    );
    let cy = (Frame::top() + Frame::bottom()) / 2.0;
    let _ = write!(
        svg,
        r##"<text x="24" y="{cy:.2}" text-anchor="middle" font-size="{size}" fill="#2a3f5f" transform="rotate(-90 24 {cy:.2})">{title}</text>"##,
        size = layout.y_axis.title_font_size,
        title = escape(layout.y_axis.title),
    );
}

/// Catmull-Rom spline through `points`, as cubic Bezier segments.
fn spline_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    let Some(&(x0, y0)) = points.first() else {
        return d;
    };
    let _ = write!(d, "M{x0:.2},{y0:.2}");
    for i in 0..points.len().saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];
        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);
        let _ = write!(
            d,
            " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            c1.0, c1.1, c2.0, c2.1, p2.0, p2.1
        );
    }
    d
}

fn draw_line(svg: &mut String, points: &[(f64, f64)], style: &LineStyle) {
    if points.len() < 2 {
        return;
    }
    let dash = if style.dash { "8 5" } else { "0" };
    let d = if style.spline {
        spline_path(points)
    } else {
        points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{}{x:.2},{y:.2}", if i == 0 { "M" } else { " L" }))
            .collect()
    };
    let _ = write!(
        svg,
        r#"<path d="{d}" fill="none" stroke="{color}" stroke-width="{width}" stroke-dasharray="{dash}" />"#,
        color = style.color,
        width = style.width,
    );
}

fn star_points(cx: f64, cy: f64, r: f64) -> String {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { r } else { r * 0.4 };
            let angle = std::f64::consts::PI / 5.0 * i as f64 - std::f64::consts::FRAC_PI_2;
            format!("{:.2},{:.2}", cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn marker_shape(cx: f64, cy: f64, style: &MarkerStyle) -> String {
    let r = style.size / 2.0;
    let (stroke, stroke_width) = style
        .outline
        .map_or(("none", 0.0), |o| (o.color, o.width));
    let paint = format!(
        r#"fill="{fill}" fill-opacity="{opacity}" stroke="{stroke}" stroke-width="{stroke_width}""#,
        fill = if style.symbol == MarkerSymbol::CircleOpen {
            "none"
        } else {
            style.color
        },
        opacity = style.opacity,
    );
    match style.symbol {
        MarkerSymbol::Circle | MarkerSymbol::CircleOpen => {
            format!(r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" {paint} />"#)
        }
        MarkerSymbol::Star => format!(
            r#"<polygon points="{}" {paint} />"#,
            star_points(cx, cy, r * 1.2)
        ),
        MarkerSymbol::Diamond => format!(
            r#"<polygon points="{cx:.2},{top:.2} {right:.2},{cy:.2} {cx:.2},{bottom:.2} {left:.2},{cy:.2}" {paint} />"#,
            top = cy - r,
            right = cx + r,
            bottom = cy + r,
            left = cx - r,
        ),
    }
}

fn tooltip(trace: &Trace, x: f64, y: f64) -> String {
    let mut lines: Vec<String> = trace.text.clone();
    if lines.is_empty() {
        lines.push(trace.name.clone());
    }
    lines.push(format!("x: {x}"));
    lines.push(format!("y: {y}"));
    format!("<title>{}</title>", escape(&lines.join("\n")))
}

fn draw_annotation(svg: &mut String, trace: &Trace, cx: f64, cy: f64, offset: f64) {
    if trace.text.is_empty() {
        return;
    }
    let count = trace.text.len() as f64;
    let first_y = match trace.text_position {
        TextPosition::TopCenter => cy - offset - 6.0 - (count - 1.0) * TEXT_LINE,
        TextPosition::BottomCenter => cy + offset + 16.0,
    };
    let _ = write!(
        svg,
        r##"<text class="annotation" x="{cx:.2}" y="{first_y:.2}" text-anchor="middle" fill="#2a3f5f">"##
    );
    for (i, line) in trace.text.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { TEXT_LINE };
        let _ = write!(
            svg,
            r#"<tspan x="{cx:.2}" dy="{dy}">{}</tspan>"#,
            escape(line)
        );
    }
    svg.push_str("</text>");
}

fn draw_trace(svg: &mut String, index: usize, trace: &Trace, frame: &Frame) {
    let _ = write!(
        svg,
        r#"<g class="trace" data-trace="{index}" data-role="{role}">"#,
        role = serde_json::to_value(trace.role)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
    );

    let points: Vec<(f64, f64)> = trace
        .points()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (frame.px(x), frame.py(y)))
        .collect();

    if let (true, Some(style)) = (trace.mode.has_line(), &trace.line) {
        draw_line(svg, &points, style);
    }

    if let (true, Some(style)) = (trace.mode.has_markers(), &trace.marker) {
        for ((px, py), (x, y)) in points.iter().zip(trace.points()) {
            svg.push_str("<g class=\"point\">");
            svg.push_str(&marker_shape(*px, *py, style));
            if trace.hover {
                svg.push_str(&tooltip(trace, x, y));
            }
            svg.push_str("</g>");
        }
        if let Some(&(px, py)) = points.first() {
            draw_annotation(svg, trace, px, py, style.size / 2.0);
        }
    }

    svg.push_str("</g>");
}

fn legend_swatch(trace: &Trace, x: f64, y: f64) -> String {
    match (&trace.marker, &trace.line) {
        (Some(marker), _) if trace.mode.has_markers() => {
            let swatch = MarkerStyle {
                size: marker.size.min(12.0),
                ..*marker
            };
            marker_shape(x + 12.0, y, &swatch)
        }
        (_, Some(line)) => format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{width}" stroke-dasharray="{dash}" />"#,
            x1 = x,
            x2 = x + 24.0,
            color = line.color,
            width = line.width,
            dash = if line.dash { "6 3" } else { "0" },
        ),
        _ => String::new(),
    }
}

fn draw_legend(svg: &mut String, chart: &Chart) {
    let entries: Vec<(usize, &Trace)> = chart
        .traces()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.show_legend)
        .collect();
    if entries.is_empty() {
        return;
    }

    let legend = &chart.layout().legend;
    let longest = entries
        .iter()
        .map(|(_, t)| t.name.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let width = 44.0 + longest * 6.6;
    let height = entries.len() as f64 * LEGEND_ROW + 10.0;
    let x = Frame::left() + legend.x * (Frame::right() - Frame::left());
    let y = Frame::bottom() - legend.y * (Frame::bottom() - Frame::top());

    let _ = write!(
        svg,
        r#"<g class="legend"><rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{bg}" stroke="{border}" stroke-width="{bw}" />"#,
        bg = legend.background,
        border = legend.border_color,
        bw = legend.border_width,
    );
    for (row, (index, trace)) in entries.iter().enumerate() {
        let cy = y + 15.0 + row as f64 * LEGEND_ROW;
        let _ = write!(
            svg,
            r##"<g class="legend-item" data-trace="{index}">{swatch}<text x="{tx:.2}" y="{ty:.2}" fill="#2a3f5f">{name}</text></g>"##,
            swatch = legend_swatch(trace, x + 8.0, cy),
            tx = x + 38.0,
            ty = cy + 4.0,
            name = escape(&trace.name),
        );
    }
    svg.push_str("</g>");
}

/// Renders the chart as a standalone SVG element.
pub fn render_svg(chart: &Chart) -> String {
    let frame = Frame::fit(chart);
    let layout = chart.layout();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" data-hovermode="{}">"#,
        layout.hover_mode
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white" />"#);
    draw_grid(&mut svg, &frame, layout);
    let _ = write!(
        svg,
        r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="#cccccc" />"##,
        x = Frame::left(),
        y = Frame::top(),
        w = Frame::right() - Frame::left(),
        h = Frame::bottom() - Frame::top(),
    );
    for (index, trace) in chart.traces().iter().enumerate() {
        draw_trace(&mut svg, index, trace, &frame);
    }
    draw_legend(&mut svg, chart);
    draw_titles(&mut svg, layout);
    svg.push_str("</svg>");
    svg
}

/// Renders the full HTML document, with the chart's JSON form embedded.
pub fn render_document(chart: &Chart) -> Result<String, RenderError> {
    let data = serde_json::to_string(chart)?.replace("</", "<\\/");
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let title = escape(&chart.layout().title);
    let svg = render_svg(chart);
    Ok(fill_template(
        TEMPLATE,
        &[
            ("title", &title),
            ("version", VERSION),
            ("generated", &generated),
            ("data", &data),
            ("chart", &svg),
        ],
    ))
}

/// Replaces each `{{name}}` in `template` in a single pass.
///
/// Substituted values are never scanned again, and unknown placeholders are
/// kept as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let filled = tail.find("}}").and_then(|end| {
            let name = &tail[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });
        match filled {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Writes the rendered document to `path`.
pub fn write_document(chart: &Chart, path: &Path) -> Result<(), RenderError> {
    let html = render_document(chart)?;
    std::fs::write(path, &html).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = html.len(), "Wrote chart document");
    Ok(())
}
