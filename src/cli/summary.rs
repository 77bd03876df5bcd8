use super::ui;
use crate::chart::{DistinguishedKind, DistinguishedPortfolio};
use crate::core::config::AppConfig;
use crate::core::{Frontier, PortfolioSummary};
use anyhow::Result;
use comfy_table::Cell;

/// One report row; `None` when the portfolio's data is absent.
fn rows(
    frontier: &Frontier,
    user_target: Option<&PortfolioSummary>,
    max_sharpe: Option<&PortfolioSummary>,
) -> Vec<(DistinguishedKind, Option<DistinguishedPortfolio>)> {
    vec![
        (
            DistinguishedKind::UserTarget,
            user_target
                .map(|s| DistinguishedPortfolio::from_summary(DistinguishedKind::UserTarget, s)),
        ),
        (
            DistinguishedKind::MaxSharpe,
            max_sharpe
                .map(|s| DistinguishedPortfolio::from_summary(DistinguishedKind::MaxSharpe, s)),
        ),
        (
            DistinguishedKind::MinRisk,
            Some(DistinguishedPortfolio::min_risk(frontier.min_risk_point())),
        ),
    ]
}

pub fn display_as_table(
    frontier: &Frontier,
    user_target: Option<&PortfolioSummary>,
    max_sharpe: Option<&PortfolioSummary>,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Portfolio"),
        ui::header_cell("Risk"),
        ui::header_cell("Return"),
        ui::header_cell("Sharpe"),
    ]);

    for (kind, portfolio) in rows(frontier, user_target, max_sharpe) {
        table.add_row(vec![
            Cell::new(kind.display_name()),
            ui::format_optional_cell(portfolio.map(|p| p.risk), |v| format!("{v:.4}")),
            ui::format_optional_cell(portfolio.map(|p| p.ret), |v| format!("{v:.4}")),
            ui::format_optional_cell(portfolio.and_then(|p| p.sharpe), |v| format!("{v:.3}")),
        ]);
    }

    let (lo, hi) = frontier.risk_range();
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Efficient Frontier", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{} {}  {}",
        ui::style_text("Frontier points:", ui::StyleType::Label),
        frontier.len(),
        ui::style_text(&format!("(risk {lo:.4} to {hi:.4})"), ui::StyleType::Subtle)
    ));
    output
}

pub fn run(config: &AppConfig) -> Result<()> {
    let (frontier, user_target, max_sharpe) = super::load_inputs(config)?;

    println!(
        "{}",
        display_as_table(&frontier, user_target.as_ref(), max_sharpe.as_ref())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrontierPoint;

    fn frontier() -> Frontier {
        Frontier::new(vec![
            FrontierPoint::new(0.10, 0.05),
            FrontierPoint::new(0.12, 0.07),
            FrontierPoint::new(0.20, 0.09),
        ])
        .unwrap()
    }

    #[test]
    fn test_rows_without_optional_portfolios() {
        let rows = rows(&frontier(), None, None);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].1.is_none());
        assert!(rows[1].1.is_none());
        let min = rows[2].1.unwrap();
        assert_eq!((min.risk, min.ret, min.sharpe), (0.10, 0.05, None));
    }

    #[test]
    fn test_table_lists_every_portfolio() {
        let max_sharpe = PortfolioSummary {
            expected_return: 0.07,
            risk: 0.12,
            sharpe_ratio: 0.58,
        };
        let output = display_as_table(&frontier(), None, Some(&max_sharpe));
        assert!(output.contains("User's Target Portfolio"));
        assert!(output.contains("Max Sharpe Portfolio"));
        assert!(output.contains("Min Risk Portfolio"));
        assert!(output.contains("0.580"));
        assert!(output.contains("N/A"));
        assert!(output.contains("0.1000"));
    }
}
