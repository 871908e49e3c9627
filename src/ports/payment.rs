//! Payment port: Trait for charging a donor.

use chrono::{DateTime, Utc};

use crate::domain::{DonationType, PaymentMethod};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// What the donor is paying for.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub user_id: String,
    pub charity_id: String,
    pub kind: DonationType,
    /// Amount charged; goods donations are processed with no amount.
    pub amount: Option<f64>,
    pub method: PaymentMethod,
}

/// Confirmation returned by a successful charge.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: Option<f64>,
    pub processed_at: DateTime<Utc>,
}

/// Trait for payment processing.
pub trait PaymentGateway: Send + Sync {
    /// Charge the donor.
    ///
    /// # Errors
    /// Returns error if the payment is rejected.
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}
