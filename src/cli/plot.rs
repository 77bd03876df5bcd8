//! The frontier plotting pipeline.
//!
//! Loads the frontier (fatal on failure), the two optional portfolio
//! summaries (absent on failure), composes the chart, writes it and hands it
//! to the viewer. Write and viewer failures are reported but do not fail the
//! run.

use super::ui;
use crate::chart::{self, Chart, RenderError, Viewer};
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Result of a pipeline run that got as far as composing a chart.
#[derive(Debug)]
pub struct PlotOutcome {
    pub chart: Chart,
    /// Where the document landed, or why it could not be written.
    pub output: Result<PathBuf, RenderError>,
}

impl PlotOutcome {
    pub fn written(&self) -> Option<&PathBuf> {
        self.output.as_ref().ok()
    }
}

pub fn run(config: &AppConfig, viewer: Option<&dyn Viewer>) -> Result<PlotOutcome> {
    info!("Visualizing Efficient Frontier");

    let (frontier, user_target, max_sharpe) = super::load_inputs(config)?;

    let chart = chart::compose(
        &frontier,
        user_target.as_ref(),
        max_sharpe.as_ref(),
        &config.title,
    );

    let output_path = config.output_path();
    let output = match chart::write_document(&chart, &output_path) {
        Ok(()) => {
            println!(
                "{} {}",
                ui::style_text("Interactive plot saved to:", ui::StyleType::Success),
                output_path.display()
            );
            if let Some(viewer) = viewer {
                if let Err(e) = viewer.show(&output_path) {
                    warn!(error = %e, "Could not display plot");
                }
            }
            Ok(output_path)
        }
        Err(e) => {
            error!(path = %output_path.display(), error = %e, "Error saving plot");
            Err(e)
        }
    };

    info!("Visualization complete");
    Ok(PlotOutcome { chart, output })
}
