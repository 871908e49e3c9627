//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite for local persistence
//! - `memory`: in-process storage
//! - `mock_auth`: demo-account authenticator
//! - `auto_review`: delayed KYC auto-approver
//! - `simulated_payment`: payment gateway that always succeeds
//! - `seed`: static charities and blood requests
//! - `sanitize`: PII filtering for logs

pub mod auto_review;
pub mod memory;
pub mod mock_auth;
pub mod sanitize;
pub mod seed;
pub mod simulated_payment;
pub mod sqlite;

pub use sqlite::StorageError;
