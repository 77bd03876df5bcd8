//! Portfolio metric summaries written by the optimiser.
//!
//! A summary table looks like
//!
//! ```text
//! Metric,Value
//! Expected Return,0.0712
//! Portfolio Std Dev,0.1204
//! Sharpe Ratio,0.5814
//! Optimal Weights,0.2;0.3;0.5
//! ```
//!
//! Only the first three data rows are read. A summary is either complete or
//! absent: a missing file, a parse failure and a missing metric all look the
//! same to callers of [`load_portfolio_summary`].

use super::table::{TableError, read_table};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const METRIC_COLUMN: &str = "Metric";
pub const VALUE_COLUMN: &str = "Value";

pub const EXPECTED_RETURN: &str = "Expected Return";
pub const PORTFOLIO_STD_DEV: &str = "Portfolio Std Dev";
pub const SHARPE_RATIO: &str = "Sharpe Ratio";

const SUMMARY_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSummary {
    pub expected_return: f64,
    pub risk: f64,
    pub sharpe_ratio: f64,
}

/// Why an optional portfolio summary is unavailable.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("missing metrics: {}", .0.join(", "))]
    MissingMetrics(Vec<&'static str>),

    #[error("metric '{metric}' has invalid value '{value}'")]
    InvalidValue { metric: &'static str, value: String },
}

impl PortfolioSummary {
    /// Parses a summary table, reporting why it could not be used.
    pub fn parse(path: &Path) -> Result<Self, SummaryError> {
        let table = read_table(path, Some(SUMMARY_ROWS))?;
        let metric_idx = table.column(METRIC_COLUMN)?;
        let value_idx = table.column(VALUE_COLUMN)?;

        let metrics: HashMap<&str, &str> = table
            .rows()
            .iter()
            .filter_map(|row| Some((row.get(metric_idx)?, row.get(value_idx)?)))
            .collect();

        let missing: Vec<&'static str> = [EXPECTED_RETURN, PORTFOLIO_STD_DEV, SHARPE_RATIO]
            .into_iter()
            .filter(|key| !metrics.contains_key(key))
            .collect();
        if !missing.is_empty() {
            return Err(SummaryError::MissingMetrics(missing));
        }

        let value = |metric: &'static str| -> Result<f64, SummaryError> {
            let raw = metrics.get(metric).copied().unwrap_or_default();
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SummaryError::InvalidValue {
                    metric,
                    value: raw.to_string(),
                })
        };

        let risk = value(PORTFOLIO_STD_DEV)?;
        if risk < 0.0 {
            return Err(SummaryError::InvalidValue {
                metric: PORTFOLIO_STD_DEV,
                value: risk.to_string(),
            });
        }

        Ok(Self {
            expected_return: value(EXPECTED_RETURN)?,
            risk,
            sharpe_ratio: value(SHARPE_RATIO)?,
        })
    }
}

/// Loads an optional portfolio summary.
///
/// Never fails: any problem is logged against `portfolio_name` and the
/// summary is reported as absent.
pub fn load_portfolio_summary(path: &Path, portfolio_name: &str) -> Option<PortfolioSummary> {
    match PortfolioSummary::parse(path) {
        Ok(summary) => {
            info!(
                portfolio = portfolio_name,
                expected_return = summary.expected_return,
                risk = summary.risk,
                sharpe_ratio = summary.sharpe_ratio,
                "Loaded {portfolio_name}"
            );
            Some(summary)
        }
        Err(SummaryError::Table(TableError::MissingInput(_))) => {
            warn!(
                portfolio = portfolio_name,
                path = %path.display(),
                "{portfolio_name} data not found"
            );
            None
        }
        Err(e) => {
            warn!(
                portfolio = portfolio_name,
                path = %path.display(),
                error = %e,
                "Ignoring {portfolio_name}"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_summary(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("Best Sharpe Portfolio.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_complete_summary() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nExpected Return,0.07\nPortfolio Std Dev,0.12\nSharpe Ratio,0.58\nOptimal Weights,0.2;0.3;0.5\n",
        );

        let summary = load_portfolio_summary(&path, "Max Sharpe Portfolio").unwrap();
        assert_eq!(
            summary,
            PortfolioSummary {
                expected_return: 0.07,
                risk: 0.12,
                sharpe_ratio: 0.58,
            }
        );
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nSharpe Ratio,1.5\nExpected Return,0.3\nPortfolio Std Dev,0.2\n",
        );
        let summary = PortfolioSummary::parse(&path).unwrap();
        assert_eq!(summary.sharpe_ratio, 1.5);
        assert_eq!(summary.expected_return, 0.3);
        assert_eq!(summary.risk, 0.2);
    }

    #[test]
    fn test_missing_key_discards_everything() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nExpected Return,0.07\nPortfolio Std Dev,0.12\n",
        );

        assert!(load_portfolio_summary(&path, "User's Target Portfolio").is_none());
        match PortfolioSummary::parse(&path) {
            Err(SummaryError::MissingMetrics(missing)) => assert_eq!(missing, vec![SHARPE_RATIO]),
            other => panic!("Expected missing metrics, got {other:?}"),
        }
    }

    #[test]
    fn test_only_first_three_rows_are_read() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nExpected Return,0.07\nOptimal Weights,0.5;0.5\nPortfolio Std Dev,0.12\nSharpe Ratio,0.58\n",
        );

        match PortfolioSummary::parse(&path) {
            Err(SummaryError::MissingMetrics(missing)) => {
                assert_eq!(missing, vec![SHARPE_RATIO]);
            }
            other => panic!("Expected missing metrics, got {other:?}"),
        }
        assert!(load_portfolio_summary(&path, "Max Sharpe Portfolio").is_none());
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("User Portfolio.csv");
        assert!(load_portfolio_summary(&path, "User's Target Portfolio").is_none());
        assert!(matches!(
            PortfolioSummary::parse(&path),
            Err(SummaryError::Table(TableError::MissingInput(_)))
        ));
    }

    #[test]
    fn test_empty_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(&dir, "Metric,Value\n");
        assert!(load_portfolio_summary(&path, "Max Sharpe Portfolio").is_none());
    }

    #[test]
    fn test_wrong_headers_are_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Name,Amount\nExpected Return,0.07\nPortfolio Std Dev,0.12\nSharpe Ratio,0.58\n",
        );
        assert!(matches!(
            PortfolioSummary::parse(&path),
            Err(SummaryError::Table(TableError::MalformedData { .. }))
        ));
        assert!(load_portfolio_summary(&path, "Max Sharpe Portfolio").is_none());
    }

    #[test]
    fn test_non_numeric_value_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nExpected Return,n/a\nPortfolio Std Dev,0.12\nSharpe Ratio,0.58\n",
        );
        match PortfolioSummary::parse(&path) {
            Err(SummaryError::InvalidValue { metric, value }) => {
                assert_eq!(metric, EXPECTED_RETURN);
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected invalid value, got {other:?}"),
        }
        assert!(load_portfolio_summary(&path, "Max Sharpe Portfolio").is_none());
    }

    #[test]
    fn test_negative_std_dev_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_summary(
            &dir,
            "Metric,Value\nExpected Return,0.07\nPortfolio Std Dev,-0.12\nSharpe Ratio,0.58\n",
        );
        match PortfolioSummary::parse(&path) {
            Err(SummaryError::InvalidValue { metric, value }) => {
                assert_eq!(metric, PORTFOLIO_STD_DEV);
                assert_eq!(value, "-0.12");
            }
            other => panic!("Expected invalid value, got {other:?}"),
        }
        assert!(load_portfolio_summary(&path, "User's Target Portfolio").is_none());
    }
}
