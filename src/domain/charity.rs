//! Charities and the donation categories they accept.

use serde::{Deserialize, Serialize};

use super::ids::new_id;

/// Rating given to a newly registered charity.
pub const DEFAULT_RATING: f32 = 4.5;

/// Minimum description length for a new charity.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// The four kinds of donation the platform handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationType {
    Food,
    Funds,
    Clothes,
    Blood,
}

impl DonationType {
    pub const ALL: [DonationType; 4] = [Self::Food, Self::Funds, Self::Clothes, Self::Blood];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Funds => "funds",
            Self::Clothes => "clothes",
            Self::Blood => "blood",
        }
    }

    /// Title shown on the payment summary.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Food => "Food Donation",
            Self::Funds => "Funds Donation",
            Self::Clothes => "Clothes Donation",
            Self::Blood => "Blood Donation",
        }
    }
}

impl std::fmt::Display for DonationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DonationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown donation type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

impl BankDetails {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            &self.account_name,
            &self.account_number,
            &self.ifsc_code,
            &self.bank_name,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// How a charity receives funds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub upi_id: Option<String>,
    pub qr_code_image: Option<String>,
    pub bank_details: Option<BankDetails>,
}

impl PaymentInfo {
    /// At least one non-empty payment method is present.
    #[must_use]
    pub fn has_any_method(&self) -> bool {
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        non_empty(&self.upi_id) || non_empty(&self.qr_code_image) || self.bank_details.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub categories: Vec<DonationType>,
    pub rating: f32,
    pub donations_count: u32,
    pub location: String,
    pub payment_info: Option<PaymentInfo>,
}

impl Charity {
    #[must_use]
    pub fn accepts(&self, kind: DonationType) -> bool {
        self.categories.contains(&kind)
    }
}

/// Registration form for a new charity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCharity {
    pub name: String,
    pub description: String,
    pub image: String,
    pub categories: Vec<DonationType>,
    pub location: String,
    pub payment_info: Option<PaymentInfo>,
}

impl NewCharity {
    /// # Errors
    /// Returns one message per invalid field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Charity name is required".to_string());
        }

        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        } else if self.description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(format!(
                "Description should be at least {MIN_DESCRIPTION_LEN} characters"
            ));
        }

        if self.location.trim().is_empty() {
            errors.push("Location is required".to_string());
        }
        if self.image.trim().is_empty() {
            errors.push("Please upload an image".to_string());
        }
        if self.categories.is_empty() {
            errors.push("Please select at least one category".to_string());
        }

        if self.categories.contains(&DonationType::Funds) {
            let payment = self.payment_info.clone().unwrap_or_default();
            if !payment.has_any_method() {
                errors.push(
                    "Please provide at least one payment method (UPI, QR code, or bank details)"
                        .to_string(),
                );
            }
            if payment.bank_details.is_some_and(|bank| !bank.is_complete()) {
                errors.push("Please fill in all bank details".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the charity record with a fresh id and starting rating.
    #[must_use]
    pub fn into_charity(self) -> Charity {
        let mut categories: Vec<DonationType> = Vec::with_capacity(self.categories.len());
        for category in self.categories {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Charity {
            id: new_id(),
            name: self.name,
            description: self.description,
            image: self.image,
            categories,
            rating: DEFAULT_RATING,
            donations_count: 0,
            location: self.location,
            payment_info: self.payment_info,
        }
    }
}
