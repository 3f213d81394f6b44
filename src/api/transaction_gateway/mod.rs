pub mod client;
pub mod models;

pub use client::{TransactionGatewayClient, TransactionPageSource};
pub use models::{ApiError, SortOrder, TransactionPage, TransactionQuery};
