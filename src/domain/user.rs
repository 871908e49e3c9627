//! User accounts and the forms that create or change them.

use serde::{Deserialize, Serialize};

use super::blood::BloodGroup;
use super::ids::new_id;
use super::kyc::{KycLifecycle, KycStatus};
use super::validation::{self, MIN_PASSWORD_LEN};

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub kyc: KycLifecycle,
}

impl User {
    /// A freshly registered user: new id, KYC not submitted.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        blood_group: Option<BloodGroup>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            email: email.into(),
            blood_group,
            phone: None,
            address: None,
            avatar: None,
            kyc: KycLifecycle::new(),
        }
    }

    #[must_use]
    pub fn kyc_status(&self) -> KycStatus {
        self.kyc.status()
    }

    /// Only KYC-verified users may register a charity.
    #[must_use]
    pub fn can_create_charity(&self) -> bool {
        self.kyc.is_verified()
    }

    /// Whether this user can donate to a request for `recipient`.
    ///
    /// Users who have not recorded a blood group are never compatible.
    #[must_use]
    pub fn can_donate_blood_to(&self, recipient: BloodGroup) -> bool {
        self.blood_group
            .is_some_and(|donor| donor.can_donate_to(recipient))
    }

    /// Merge the fields present in `update`.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(blood_group) = update.blood_group {
            self.blood_group = Some(blood_group);
        }
    }
}

/// Partial profile change; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    pub blood_group: Option<BloodGroup>,
}

/// Login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    /// Returns one message per invalid field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub blood_group: Option<BloodGroup>,
}

impl Registration {
    /// # Errors
    /// Returns one message per invalid field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if self.confirm_password.is_empty() {
            errors.push("Please confirm your password".to_string());
        } else if self.password != self.confirm_password {
            errors.push("Passwords do not match".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !validation::is_valid_email(email) {
        errors.push("Email is invalid".to_string());
    }
}

fn check_password(password: &str, errors: &mut Vec<String>) {
    if password.is_empty() {
        errors.push("Password is required".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            blood_group: Some(BloodGroup::BNegative),
        }
    }

    #[test]
    fn test_new_user_has_not_submitted_kyc() {
        let user = User::new("Ravi", "ravi@example.com", None);
        assert_eq!(user.kyc_status(), KycStatus::NotSubmitted);
        assert!(!user.can_create_charity());
    }

    #[test]
    fn test_user_without_blood_group_is_never_compatible() {
        let mut user = User::new("Ravi", "ravi@example.com", None);
        assert!(!user.can_donate_blood_to(BloodGroup::AbPositive));

        user.blood_group = Some(BloodGroup::BNegative);
        assert!(user.can_donate_blood_to(BloodGroup::AbNegative));
        assert!(!user.can_donate_blood_to(BloodGroup::APositive));
    }

    #[test]
    fn test_apply_update_merges_present_fields() {
        let mut user = User::new("Ravi", "ravi@example.com", None);
        user.apply_update(ProfileUpdate {
            phone: Some("(555) 123-4567".to_string()),
            blood_group: Some(BloodGroup::OPositive),
            ..Default::default()
        });

        assert_eq!(user.name, "Ravi");
        assert_eq!(user.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(user.blood_group, Some(BloodGroup::OPositive));
    }

    #[test]
    fn test_registration_validation() {
        assert!(registration().validate().is_ok());

        let mut bad = registration();
        bad.email = "ravi@example".to_string();
        bad.confirm_password = "secret2".to_string();
        let errors = bad.validate().expect_err("Should fail");
        assert_eq!(errors, vec!["Email is invalid", "Passwords do not match"]);
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("test@example.com", "password").validate().is_ok());
        let errors = Credentials::new("", "abc").validate().expect_err("Should fail");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_user_json_roundtrip_keeps_kyc() {
        let user = User::new("Ravi", "ravi@example.com", Some(BloodGroup::ANegative));
        let json = serde_json::to_string(&user).expect("Should serialize");
        let back: User = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, user);
    }
}
