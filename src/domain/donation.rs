//! Donations made by users to charities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::charity::DonationType;
use super::ids::new_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl DonationStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::Paypal => "paypal",
            Self::BankTransfer => "bank_transfer",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit_card" => Some(Self::CreditCard),
            "paypal" => Some(Self::Paypal),
            "bank_transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

/// A recorded donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub kind: DonationType,
    pub amount: Option<f64>,
    pub items: Option<Vec<String>>,
    pub quantity: Option<u32>,
    pub charity_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub status: DonationStatus,
    pub payment_method: Option<PaymentMethod>,
}

/// A donation before it is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub kind: DonationType,
    pub amount: Option<f64>,
    pub items: Option<Vec<String>>,
    pub quantity: Option<u32>,
    pub charity_id: String,
    pub user_id: String,
    pub payment_method: Option<PaymentMethod>,
}

impl NewDonation {
    /// Funds need a positive amount; food and clothes need at least one item.
    ///
    /// # Errors
    /// Returns one message per problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.charity_id.trim().is_empty() {
            errors.push("Charity is required".to_string());
        }

        match self.kind {
            DonationType::Funds => match self.amount {
                Some(amount) if amount.is_finite() && amount > 0.0 => {}
                _ => errors.push("Please enter a valid amount".to_string()),
            },
            DonationType::Food | DonationType::Clothes => {
                let has_items = self
                    .items
                    .as_ref()
                    .is_some_and(|items| items.iter().any(|i| !i.trim().is_empty()));
                if !has_items {
                    errors.push(format!("Please add at least one {} item", self.kind));
                }
            }
            DonationType::Blood => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Record the donation as pending at `date`.
    #[must_use]
    pub fn into_donation(self, date: DateTime<Utc>) -> Donation {
        Donation {
            id: new_id(),
            kind: self.kind,
            amount: self.amount,
            items: self.items,
            quantity: self.quantity,
            charity_id: self.charity_id,
            user_id: self.user_id,
            date,
            status: DonationStatus::Pending,
            payment_method: self.payment_method,
        }
    }
}
