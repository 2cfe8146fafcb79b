//! Web API Middleware

pub mod transaction_id;

pub use transaction_id::assign_transaction_id;
