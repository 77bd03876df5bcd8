//! Command implementations and terminal presentation

pub mod plot;
pub mod setup;
pub mod summary;
pub mod ui;

use crate::chart::DistinguishedKind;
use crate::core::config::AppConfig;
use crate::core::{Frontier, PortfolioSummary, load_portfolio_summary};
use anyhow::{Context, Result};

/// The frontier plus the user target and max Sharpe summaries, when present.
pub(crate) type Inputs = (Frontier, Option<PortfolioSummary>, Option<PortfolioSummary>);

/// Loads every input named by `config`. Only a frontier failure is an error.
pub(crate) fn load_inputs(config: &AppConfig) -> Result<Inputs> {
    let frontier_path = config.frontier_path();
    let frontier = Frontier::load(&frontier_path).with_context(|| {
        format!(
            "Cannot continue without Efficient Frontier data from {}",
            frontier_path.display()
        )
    })?;

    let user_target = load_portfolio_summary(
        &config.user_portfolio_path(),
        DistinguishedKind::UserTarget.display_name(),
    );
    let max_sharpe = load_portfolio_summary(
        &config.max_sharpe_path(),
        DistinguishedKind::MaxSharpe.display_name(),
    );

    Ok((frontier, user_target, max_sharpe))
}
