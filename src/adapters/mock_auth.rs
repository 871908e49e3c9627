//! Mock authenticator backed by a fixed demo account.
//!
//! There is no identity backend. One demo login is accepted and every
//! registration succeeds with a fresh, unverified user.

use crate::domain::{BloodGroup, Credentials, KycLifecycle, Registration, User};
use crate::ports::{AuthError, Authenticator};

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password";

pub struct MockAuthenticator {
    demo_user: User,
}

impl MockAuthenticator {
    #[must_use]
    pub fn new() -> Self {
        let demo_user = User {
            id: "1".to_string(),
            name: "Test User".to_string(),
            email: DEMO_EMAIL.to_string(),
            blood_group: Some(BloodGroup::OPositive),
            phone: None,
            address: None,
            avatar: None,
            kyc: KycLifecycle::pre_verified(),
        };
        Self { demo_user }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        if credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD {
            Ok(self.demo_user.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        if registration.email.trim().eq_ignore_ascii_case(DEMO_EMAIL) {
            return Err(AuthError::EmailTaken);
        }
        Ok(User::new(
            registration.name.trim(),
            registration.email.trim(),
            registration.blood_group,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KycStatus;

    #[test]
    fn test_demo_login() {
        let auth = MockAuthenticator::new();
        let user = auth
            .authenticate(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .expect("Should authenticate");
        assert_eq!(user.kyc_status(), KycStatus::Verified);
        assert_eq!(user.blood_group, Some(BloodGroup::OPositive));

        let err = auth
            .authenticate(&Credentials::new(DEMO_EMAIL, "wrong-password"))
            .expect_err("Should reject");
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_register_creates_unverified_user() {
        let auth = MockAuthenticator::new();
        let user = auth
            .register(&Registration {
                name: " Nisha ".to_string(),
                email: "nisha@example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
                blood_group: None,
            })
            .expect("Should register");
        assert_eq!(user.name, "Nisha");
        assert_eq!(user.kyc_status(), KycStatus::NotSubmitted);
    }

    #[test]
    fn test_register_demo_email_is_taken() {
        let auth = MockAuthenticator::new();
        let err = auth
            .register(&Registration {
                name: "Copycat".to_string(),
                email: " Test@Example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
                blood_group: None,
            })
            .expect_err("Should reject");
        assert_eq!(err, AuthError::EmailTaken);
    }
}
