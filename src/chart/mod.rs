//! Chart model, composition and rendering.
//!
//! A [`Chart`] is an ordered list of traces plus layout metadata. It is
//! built once by [`compose`], then handed to [`render`] to be written out as
//! a self-contained HTML document.

pub mod compose;
pub mod distinguished;
pub mod render;
pub mod viewer;

pub use compose::compose;
pub use distinguished::{DistinguishedKind, DistinguishedPortfolio};
pub use render::{RenderError, render_document, write_document};
pub use viewer::{SystemViewer, Viewer};

use serde::Serialize;

/// What a trace represents on the frontier plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceRole {
    FrontierLine,
    FrontierPoints,
    TargetReturn,
    UserTarget,
    MaxSharpe,
    MinRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "markers+text")]
    MarkersText,
}

impl Mode {
    pub fn has_line(self) -> bool {
        matches!(self, Mode::Lines | Mode::LinesMarkers)
    }

    pub fn has_markers(self) -> bool {
        !matches!(self, Mode::Lines)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    Circle,
    CircleOpen,
    Star,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPosition {
    TopCenter,
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub size: f64,
    pub symbol: MarkerSymbol,
    pub opacity: f64,
    pub outline: Option<Outline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
    pub dash: bool,
    pub spline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub role: TraceRole,
    pub name: String,
    pub mode: Mode,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerStyle>,
    /// Annotation lines drawn next to the first point.
    pub text: Vec<String>,
    pub text_position: TextPosition,
    pub show_legend: bool,
    pub hover: bool,
}

impl Trace {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: &'static str,
    pub title_font_size: u32,
    pub grid_color: &'static str,
    pub zero_line: bool,
    pub zero_line_width: f64,
    pub zero_line_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Anchor position as a fraction of the plot area, measured from the left.
    pub x: f64,
    /// Anchor position as a fraction of the plot area, measured from the bottom.
    pub y: f64,
    pub background: &'static str,
    pub border_color: &'static str,
    pub border_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub title_font_size: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Legend,
    pub hover_mode: &'static str,
}

/// Layered traces plus layout. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    traces: Vec<Trace>,
    layout: Layout,
}

impl Chart {
    pub fn new(traces: Vec<Trace>, layout: Layout) -> Self {
        Self { traces, layout }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn trace(&self, role: TraceRole) -> Option<&Trace> {
        self.traces.iter().find(|t| t.role == role)
    }

    pub fn has_trace(&self, role: TraceRole) -> bool {
        self.trace(role).is_some()
    }
}
