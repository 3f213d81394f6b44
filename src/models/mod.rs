//! Data models for the aggregation side of the tool
//!
//! The wire types live with the gateway client under `api`; these are the
//! process-local aggregates the summary is built from.

pub mod summary;

// Re-export commonly used types for convenience
pub use summary::{RiskStatus, RiskStatusCounts, TransactionSummary};
