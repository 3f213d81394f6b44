pub mod summary_service;

pub use summary_service::collect_transaction_summary;
