pub mod config;
pub mod risk;
pub mod utils;

pub use risk::{get_consolidated_risk_analysis, ConsolidatedReport, RiskConsolidator, RiskError};
