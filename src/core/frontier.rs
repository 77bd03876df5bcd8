//! Efficient frontier sample points.

use super::table::{TableError, read_table};
use std::path::Path;
use tracing::info;

pub const RISK_COLUMN: &str = "Risk";
pub const RETURN_COLUMN: &str = "Return";

/// Padding applied to the frontier's risk span when drawing reference lines.
const RISK_PAD_LOW: f64 = 0.9;
const RISK_PAD_HIGH: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierPoint {
    pub risk: f64,
    pub ret: f64,
}

impl FrontierPoint {
    pub fn new(risk: f64, ret: f64) -> Self {
        Self { risk, ret }
    }
}

/// An ordered, non-empty sequence of frontier points.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontier {
    points: Vec<FrontierPoint>,
}

impl Frontier {
    /// Returns `None` when `points` is empty.
    pub fn new(points: Vec<FrontierPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    /// Loads the frontier from a table with `Risk` and `Return` columns.
    ///
    /// Failures are returned, not logged; the caller reports them.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let frontier = Self::parse(path)?;
        info!(
            path = %path.display(),
            "Loaded {} points for the Efficient Frontier",
            frontier.len()
        );
        Ok(frontier)
    }

    fn parse(path: &Path) -> Result<Self, TableError> {
        let table = read_table(path, None)?;
        let risk_idx = table.column(RISK_COLUMN)?;
        let return_idx = table.column(RETURN_COLUMN)?;

        let mut points = Vec::with_capacity(table.rows().len());
        for (i, row) in table.rows().iter().enumerate() {
            let line = i + 1;
            let risk = parse_cell(path, row.get(risk_idx), RISK_COLUMN, line)?;
            let ret = parse_cell(path, row.get(return_idx), RETURN_COLUMN, line)?;
            if risk < 0.0 {
                return Err(TableError::malformed(
                    path,
                    format!("negative {RISK_COLUMN} {risk} in row {line}"),
                ));
            }
            points.push(FrontierPoint::new(risk, ret));
        }

        Self::new(points).ok_or_else(|| TableError::EmptyData(path.to_path_buf()))
    }

    pub fn points(&self) -> &[FrontierPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point with the lowest risk. Ties go to the earliest point.
    pub fn min_risk_point(&self) -> FrontierPoint {
        // The constructor rejects empty input.
        select_min_risk(&self.points).unwrap_or_else(|| self.points[0])
    }

    /// Smallest and largest risk over all points.
    pub fn risk_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.risk), hi.max(p.risk))
            })
    }

    /// Risk span widened to `[0.9 * min, 1.1 * max]`.
    pub fn padded_risk_range(&self) -> (f64, f64) {
        let (lo, hi) = self.risk_range();
        (lo * RISK_PAD_LOW, hi * RISK_PAD_HIGH)
    }
}

/// Returns the first point with the minimum risk, or `None` for an empty slice.
pub fn select_min_risk(points: &[FrontierPoint]) -> Option<FrontierPoint> {
    let mut best: Option<FrontierPoint> = None;
    for point in points {
        match best {
            Some(b) if point.risk >= b.risk => {}
            _ => best = Some(*point),
        }
    }
    best
}

fn parse_cell(
    path: &Path,
    cell: Option<&str>,
    column: &str,
    line: usize,
) -> Result<f64, TableError> {
    let raw = cell.unwrap_or_default();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TableError::malformed(
            path,
            format!("non-numeric {column} '{raw}' in row {line}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::TempDir;

    fn frontier(points: &[(f64, f64)]) -> Frontier {
        Frontier::new(
            points
                .iter()
                .map(|&(r, ret)| FrontierPoint::new(r, ret))
                .collect(),
        )
        .unwrap()
    }

    fn write_frontier(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("Efficient Frontier.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(
            &dir,
            "Risk,Return\n0.20000000,0.09000000\n0.10000000,0.05000000\n0.12,0.07\n",
        );

        let frontier = Frontier::load(&path).unwrap();
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.points()[0], FrontierPoint::new(0.2, 0.09));
        assert_eq!(frontier.points()[1], FrontierPoint::new(0.1, 0.05));
        assert_eq!(frontier.points()[2], FrontierPoint::new(0.12, 0.07));
    }

    #[test]
    fn test_load_extra_columns_and_order() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Return,Label,Risk\n0.08,a,0.15\n");
        let frontier = Frontier::load(&path).unwrap();
        assert_eq!(frontier.points(), &[FrontierPoint::new(0.15, 0.08)]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Frontier::load(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(TableError::MissingInput(_))));
    }

    #[test]
    fn test_load_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Risk,Return\n");
        assert!(matches!(
            Frontier::load(&path),
            Err(TableError::EmptyData(_))
        ));
    }

    #[test]
    fn test_load_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Risk,Expected\n0.1,0.05\n");
        let err = Frontier::load(&path).unwrap_err();
        assert!(matches!(err, TableError::MalformedData { .. }));
        assert!(err.to_string().contains("'Return'"));
    }

    #[test]
    fn test_load_non_numeric_value() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Risk,Return\n0.1,0.05\n0.2,abc\n");
        let err = Frontier::load(&path).unwrap_err();
        assert!(matches!(err, TableError::MalformedData { .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_load_rejects_nan_and_negative_risk() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Risk,Return\nNaN,0.05\n");
        assert!(Frontier::load(&path).is_err());

        let path = write_frontier(&dir, "Risk,Return\n-0.1,0.05\n");
        let err = Frontier::load(&path).unwrap_err();
        assert!(err.to_string().contains("negative Risk"));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Frontier::new(Vec::new()).is_none());
        assert!(select_min_risk(&[]).is_none());
    }

    #[test]
    fn test_single_point_is_min_risk() {
        let dir = TempDir::new().unwrap();
        let path = write_frontier(&dir, "Risk,Return\n0.15,0.08\n");
        let frontier = Frontier::load(&path).unwrap();
        assert_eq!(frontier.min_risk_point(), FrontierPoint::new(0.15, 0.08));
    }

    #[test]
    fn test_min_risk_is_lowest() {
        let f = frontier(&[(0.2, 0.09), (0.1, 0.05), (0.12, 0.07)]);
        let min = f.min_risk_point();
        assert_eq!(min, FrontierPoint::new(0.1, 0.05));
        assert!(f.points().iter().all(|p| min.risk <= p.risk));
    }

    #[test]
    fn test_min_risk_tie_takes_first() {
        let f = frontier(&[(0.3, 0.1), (0.1, 0.04), (0.2, 0.06), (0.1, 0.05)]);
        assert_eq!(f.min_risk_point(), FrontierPoint::new(0.1, 0.04));
    }

    #[test]
    fn test_padded_risk_range() {
        let f = frontier(&[(0.10, 0.05), (0.12, 0.07), (0.20, 0.09)]);
        assert_eq!(f.risk_range(), (0.10, 0.20));
        let (lo, hi) = f.padded_risk_range();
        assert_relative_eq!(lo, 0.09, epsilon = 1e-12);
        assert_relative_eq!(hi, 0.22, epsilon = 1e-12);
    }
}
