//! Fund analytics engine and its supporting abstractions

pub mod cache;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod fund;
pub mod log;
pub mod numeric;
pub mod risk;
pub mod simulator;
pub mod window;

// Re-export main types for cleaner imports
pub use chart::{Axis, Metric, Series, combined_series, project_series};
pub use error::EngineError;
pub use fund::{FundProvider, FundRecord, HistoryPoint};
pub use risk::{CapSize, RiskLevel, RiskModel, cap_label};
pub use simulator::{SimulationResult, Strategy, simulate};
pub use window::{WindowToken, filter_by_window, monthly_downsample};
