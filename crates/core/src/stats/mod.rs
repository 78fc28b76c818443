//! Per-account collection statistics.

pub mod service;
pub mod types;

pub use service::StatsService;
pub use types::{AccountStats, InstallmentStats, LumpSumStats};
