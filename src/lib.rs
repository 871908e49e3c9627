//! # donation-hub
//!
//! Core of a donation platform handling food, funds, clothes and blood.
//!
//! This crate provides:
//! - Blood group donor/recipient compatibility
//! - The KYC (identity verification) lifecycle that gates charity creation
//! - Charity, blood request and donation stores with a simulated checkout
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (User, KYC, Charity, Donation, BloodRequest)
//! - `ports`: Trait definitions for external collaborators
//! - `adapters`: Concrete implementations (SQLite, mocks, log sanitizer)
//! - `application`: Stores and services orchestrating domain and ports
//! - `config`: Environment-driven settings for the binary

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::{is_compatible, BloodGroup, KycStatus, User};

/// Result type for donation-hub operations
pub type Result<T> = std::result::Result<T, DonationError>;

/// Main error type for donation-hub
#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("KYC transition rejected: {0}")]
    Kyc(#[from] domain::KycError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] ports::AuthError),

    #[error("Payment failed: {0}")]
    Payment(#[from] ports::PaymentError),

    #[error("Payment {reference} succeeded but the donation was not recorded: {source}")]
    PaymentNotRecorded {
        reference: String,
        #[source]
        source: adapters::StorageError,
    },

    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("No authenticated user")]
    NotAuthenticated,

    #[error("KYC verification required (status: {0})")]
    KycNotVerified(KycStatus),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
