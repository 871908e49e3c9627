//! Hospital requests for blood.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blood::BloodGroup;
use super::ids::new_id;
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Open,
    Fulfilled,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: String,
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub urgency: Urgency,
    pub location: String,
    pub contact_number: String,
    pub date: DateTime<Utc>,
    pub status: RequestStatus,
}

impl BloodRequest {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}

/// Form for a new blood request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBloodRequest {
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub urgency: Urgency,
    pub location: String,
    pub contact_number: String,
}

impl NewBloodRequest {
    /// # Errors
    /// Returns one message per invalid field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.hospital.trim().is_empty() {
            errors.push("Hospital name is required".to_string());
        }
        if self.location.trim().is_empty() {
            errors.push("Location is required".to_string());
        }
        if self.contact_number.is_empty() {
            errors.push("Contact number is required".to_string());
        } else if !validation::is_valid_contact_number(&self.contact_number) {
            errors.push("Please use format: (555) 555-5555".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn into_request(self, date: DateTime<Utc>) -> BloodRequest {
        BloodRequest {
            id: new_id(),
            blood_group: self.blood_group,
            hospital: self.hospital,
            urgency: self.urgency,
            location: self.location,
            contact_number: self.contact_number,
            date,
            status: RequestStatus::Open,
        }
    }
}
