//! Blood groups and donor/recipient compatibility.
//!
//! The compatibility rule is a pure, total function over the 8x8 domain of
//! ABO/Rh groups. It never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ABO blood group with Rh factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups, in the order the registration form lists them.
    pub const ALL: [BloodGroup; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// Conventional label, e.g. `"AB-"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }

    #[must_use]
    pub fn is_rh_positive(&self) -> bool {
        matches!(
            self,
            Self::APositive | Self::BPositive | Self::AbPositive | Self::OPositive
        )
    }

    /// Whether a donor of this group can give to `recipient`.
    #[must_use]
    pub fn can_donate_to(&self, recipient: BloodGroup) -> bool {
        is_compatible(*self, recipient)
    }

    /// Groups this donor can give to.
    #[must_use]
    pub fn compatible_recipients(&self) -> Vec<BloodGroup> {
        Self::ALL
            .into_iter()
            .filter(|recipient| is_compatible(*self, *recipient))
            .collect()
    }

    /// Groups that can give to this recipient.
    #[must_use]
    pub fn compatible_donors(&self) -> Vec<BloodGroup> {
        Self::ALL
            .into_iter()
            .filter(|donor| is_compatible(*donor, *self))
            .collect()
    }
}

/// Donor/recipient compatibility check.
///
/// O- gives to everyone, O+ gives to every Rh-positive group, A and B give to
/// their own group and the AB group of the same Rh sign, AB gives only to
/// itself. An exact match is always compatible.
#[must_use]
pub fn is_compatible(donor: BloodGroup, recipient: BloodGroup) -> bool {
    use BloodGroup::*;

    if donor == recipient {
        return true;
    }

    match donor {
        ONegative => true,
        OPositive => recipient.is_rh_positive(),
        ANegative | BNegative => recipient == AbNegative,
        APositive | BPositive => recipient == AbPositive,
        AbNegative | AbPositive => false,
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a blood group label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown blood group: {0}")]
pub struct ParseBloodGroupError(pub String);

impl FromStr for BloodGroup {
    type Err = ParseBloodGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the typographic minus sign as well as ASCII '-'.
        let normalized = s.trim().replace('\u{2212}', "-").to_uppercase();
        Self::ALL
            .into_iter()
            .find(|g| g.label() == normalized)
            .ok_or_else(|| ParseBloodGroupError(s.to_string()))
    }
}
