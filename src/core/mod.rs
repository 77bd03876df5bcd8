//! Input artifacts and application plumbing

pub mod config;
pub mod frontier;
pub mod log;
pub mod metrics;
pub mod table;

// Re-export main types for cleaner imports
pub use frontier::{Frontier, FrontierPoint};
pub use metrics::{PortfolioSummary, load_portfolio_summary};
pub use table::TableError;
