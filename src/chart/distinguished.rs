use crate::core::{FrontierPoint, PortfolioSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinguishedKind {
    UserTarget,
    MaxSharpe,
    MinRisk,
}

impl DistinguishedKind {
    /// Human-readable name used in logs and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            DistinguishedKind::UserTarget => "User's Target Portfolio",
            DistinguishedKind::MaxSharpe => "Max Sharpe Portfolio",
            DistinguishedKind::MinRisk => "Min Risk Portfolio",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            DistinguishedKind::UserTarget => "User Target Achieved",
            DistinguishedKind::MaxSharpe => "Max Sharpe Portfolio",
            DistinguishedKind::MinRisk => "Min Risk Portfolio",
        }
    }
}

/// One of the specially annotated points on the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistinguishedPortfolio {
    pub kind: DistinguishedKind,
    pub risk: f64,
    pub ret: f64,
    pub sharpe: Option<f64>,
}

impl DistinguishedPortfolio {
    pub fn from_summary(kind: DistinguishedKind, summary: &PortfolioSummary) -> Self {
        Self {
            kind,
            risk: summary.risk,
            ret: summary.expected_return,
            sharpe: Some(summary.sharpe_ratio),
        }
    }

    pub fn min_risk(point: FrontierPoint) -> Self {
        Self {
            kind: DistinguishedKind::MinRisk,
            risk: point.risk,
            ret: point.ret,
            sharpe: None,
        }
    }

    pub fn legend_name(&self) -> String {
        let base = match self.kind {
            DistinguishedKind::UserTarget => "User's Optimized Portfolio",
            other => other.display_name(),
        };
        match self.sharpe {
            Some(s) => format!("{base} (Sharpe: {s:.3})"),
            None => base.to_string(),
        }
    }

    /// Annotation lines: heading, then risk and return to 4 places and
    /// Sharpe to 3.
    pub fn annotation(&self) -> Vec<String> {
        let mut lines = vec![
            self.kind.heading().to_string(),
            format!("Risk: {:.4}", self.risk),
            format!("Return: {:.4}", self.ret),
        ];
        if let Some(s) = self.sharpe {
            lines.push(format!("Sharpe: {s:.3}"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_sharpe_labels() {
        let summary = PortfolioSummary {
            expected_return: 0.07,
            risk: 0.12,
            sharpe_ratio: 0.58,
        };
        let p = DistinguishedPortfolio::from_summary(DistinguishedKind::MaxSharpe, &summary);
        assert_eq!(p.risk, 0.12);
        assert_eq!(p.ret, 0.07);
        assert_eq!(p.legend_name(), "Max Sharpe Portfolio (Sharpe: 0.580)");
        assert_eq!(
            p.annotation(),
            vec![
                "Max Sharpe Portfolio",
                "Risk: 0.1200",
                "Return: 0.0700",
                "Sharpe: 0.580"
            ]
        );
    }

    #[test]
    fn test_user_target_labels() {
        let summary = PortfolioSummary {
            expected_return: 0.123456,
            risk: 0.2,
            sharpe_ratio: 1.23456,
        };
        let p = DistinguishedPortfolio::from_summary(DistinguishedKind::UserTarget, &summary);
        assert_eq!(p.legend_name(), "User's Optimized Portfolio (Sharpe: 1.235)");
        assert_eq!(p.annotation()[0], "User Target Achieved");
        assert_eq!(p.annotation()[2], "Return: 0.1235");
    }

    #[test]
    fn test_min_risk_has_no_sharpe() {
        let p = DistinguishedPortfolio::min_risk(FrontierPoint::new(0.1, 0.05));
        assert_eq!(p.legend_name(), "Min Risk Portfolio");
        assert_eq!(
            p.annotation(),
            vec!["Min Risk Portfolio", "Risk: 0.1000", "Return: 0.0500"]
        );
    }
}
