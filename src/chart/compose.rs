//! Builds the frontier chart from loaded inputs.
//!
//! Layering is fixed: frontier line, frontier scatter, then one independent
//! overlay step per distinguished portfolio. A step with nothing to show
//! contributes no traces and never affects the others.

use super::{
    Axis, Chart, DistinguishedKind, DistinguishedPortfolio, Layout, Legend, LineStyle,
    MarkerStyle, MarkerSymbol, Mode, Outline, TextPosition, Trace, TraceRole,
};
use crate::core::{Frontier, PortfolioSummary};
use tracing::info;

const X_AXIS_TITLE: &str = "Annualized Portfolio Standard Deviation";
const Y_AXIS_TITLE: &str = "Annualized Expected Portfolio Return";

pub fn compose(
    frontier: &Frontier,
    user_target: Option<&PortfolioSummary>,
    max_sharpe: Option<&PortfolioSummary>,
    title: &str,
) -> Chart {
    let mut traces = vec![frontier_line(frontier), frontier_scatter(frontier)];

    let overlays: [Vec<Trace>; 3] = [
        user_target
            .map(|target| user_target_overlay(frontier, target))
            .unwrap_or_default(),
        max_sharpe.map(max_sharpe_overlay).into_iter().collect(),
        vec![min_risk_overlay(frontier)],
    ];
    traces.extend(overlays.into_iter().flatten());

    Chart::new(traces, frontier_layout(title))
}

fn frontier_line(frontier: &Frontier) -> Trace {
    let (x, y) = split_points(frontier);
    Trace {
        role: TraceRole::FrontierLine,
        name: "Efficient Frontier".to_string(),
        mode: Mode::LinesMarkers,
        x,
        y,
        line: Some(LineStyle {
            color: "#636efa",
            width: 2.0,
            dash: false,
            spline: true,
        }),
        marker: Some(MarkerStyle {
            color: "#636efa",
            size: 8.0,
            symbol: MarkerSymbol::Circle,
            opacity: 0.7,
            outline: Some(Outline {
                color: "darkslategrey",
                width: 1.0,
            }),
        }),
        text: Vec::new(),
        text_position: TextPosition::TopCenter,
        show_legend: false,
        hover: true,
    }
}

fn frontier_scatter(frontier: &Frontier) -> Trace {
    let (x, y) = split_points(frontier);
    Trace {
        role: TraceRole::FrontierPoints,
        name: "Frontier Portfolios".to_string(),
        mode: Mode::Markers,
        x,
        y,
        line: None,
        marker: Some(MarkerStyle {
            color: "blue",
            size: 8.0,
            symbol: MarkerSymbol::Circle,
            opacity: 0.7,
            outline: None,
        }),
        text: Vec::new(),
        text_position: TextPosition::TopCenter,
        show_legend: true,
        hover: true,
    }
}

/// Dashed line at the target return across the padded risk span, plus the
/// achieved portfolio marker.
fn user_target_overlay(frontier: &Frontier, target: &PortfolioSummary) -> Vec<Trace> {
    let (lo, hi) = frontier.padded_risk_range();
    let reference = Trace {
        role: TraceRole::TargetReturn,
        name: format!("User Target Return ({:.4})", target.expected_return),
        mode: Mode::Lines,
        x: vec![lo, hi],
        y: vec![target.expected_return, target.expected_return],
        line: Some(LineStyle {
            color: "green",
            width: 2.0,
            dash: true,
            spline: false,
        }),
        marker: None,
        text: Vec::new(),
        text_position: TextPosition::TopCenter,
        show_legend: true,
        hover: false,
    };

    let portfolio = DistinguishedPortfolio::from_summary(DistinguishedKind::UserTarget, target);
    let marker = distinguished_marker(
        &portfolio,
        TraceRole::UserTarget,
        MarkerStyle {
            color: "darkgreen",
            size: 14.0,
            symbol: MarkerSymbol::CircleOpen,
            opacity: 1.0,
            outline: Some(Outline {
                color: "darkgreen",
                width: 2.0,
            }),
        },
        TextPosition::TopCenter,
    );

    vec![reference, marker]
}

fn max_sharpe_overlay(summary: &PortfolioSummary) -> Trace {
    let portfolio = DistinguishedPortfolio::from_summary(DistinguishedKind::MaxSharpe, summary);
    distinguished_marker(
        &portfolio,
        TraceRole::MaxSharpe,
        MarkerStyle {
            color: "red",
            size: 12.0,
            symbol: MarkerSymbol::Star,
            opacity: 1.0,
            outline: Some(Outline {
                color: "black",
                width: 2.0,
            }),
        },
        TextPosition::TopCenter,
    )
}

fn min_risk_overlay(frontier: &Frontier) -> Trace {
    let portfolio = DistinguishedPortfolio::min_risk(frontier.min_risk_point());
    distinguished_marker(
        &portfolio,
        TraceRole::MinRisk,
        MarkerStyle {
            color: "purple",
            size: 12.0,
            symbol: MarkerSymbol::Diamond,
            opacity: 1.0,
            outline: Some(Outline {
                color: "black",
                width: 2.0,
            }),
        },
        TextPosition::BottomCenter,
    )
}

fn distinguished_marker(
    portfolio: &DistinguishedPortfolio,
    role: TraceRole,
    marker: MarkerStyle,
    text_position: TextPosition,
) -> Trace {
    info!(
        risk = portfolio.risk,
        ret = portfolio.ret,
        "Highlighted {}",
        portfolio.kind.display_name()
    );
    Trace {
        role,
        name: portfolio.legend_name(),
        mode: Mode::MarkersText,
        x: vec![portfolio.risk],
        y: vec![portfolio.ret],
        line: None,
        marker: Some(marker),
        text: portfolio.annotation(),
        text_position,
        show_legend: true,
        hover: true,
    }
}

fn split_points(frontier: &Frontier) -> (Vec<f64>, Vec<f64>) {
    frontier.points().iter().map(|p| (p.risk, p.ret)).unzip()
}

fn frontier_axis(title: &'static str) -> Axis {
    Axis {
        title,
        title_font_size: 16,
        grid_color: "lightgrey",
        zero_line: true,
        zero_line_width: 2.0,
        zero_line_color: "lightgrey",
    }
}

fn frontier_layout(title: &str) -> Layout {
    Layout {
        title: title.to_string(),
        title_font_size: 24,
        x_axis: frontier_axis(X_AXIS_TITLE),
        y_axis: frontier_axis(Y_AXIS_TITLE),
        legend: Legend {
            x: 0.01,
            y: 0.99,
            background: "#ffffff",
            border_color: "black",
            border_width: 1.0,
        },
        hover_mode: "closest",
    }
}
