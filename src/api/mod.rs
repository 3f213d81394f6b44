pub mod transaction_gateway;
