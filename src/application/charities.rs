//! Charity directory.

use crate::adapters::seed;
use crate::domain::{Charity, DonationType, NewCharity, User};
use crate::{DonationError, Result};

/// In-process list of charities, newest first.
#[derive(Debug, Default)]
pub struct CharityDirectory {
    charities: Vec<Charity>,
}

impl CharityDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-filled with the seed charities.
    #[must_use]
    pub fn with_seed() -> Self {
        let mut directory = Self::new();
        directory.load_seed();
        directory
    }

    /// Replace the contents with the seed charities.
    pub fn load_seed(&mut self) {
        self.charities = seed::charities();
        tracing::debug!(count = self.charities.len(), "Loaded seed charities");
    }

    #[must_use]
    pub fn all(&self) -> &[Charity] {
        &self.charities
    }

    #[must_use]
    pub fn by_category(&self, kind: DonationType) -> Vec<&Charity> {
        self.charities.iter().filter(|c| c.accepts(kind)).collect()
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Charity> {
        self.charities.iter().find(|c| c.id == id)
    }

    /// Create a charity on behalf of `user`.
    ///
    /// Only users whose KYC is verified may create charities. The new
    /// charity starts with the default rating and no donations, and is
    /// listed first.
    ///
    /// # Errors
    /// Returns [`DonationError::NotAuthenticated`] without a user,
    /// [`DonationError::KycNotVerified`] for unverified users and a
    /// validation error for an incomplete form.
    pub fn add_charity(
        &mut self,
        user: Option<&User>,
        new_charity: NewCharity,
    ) -> Result<&Charity> {
        let user = user.ok_or(DonationError::NotAuthenticated)?;
        if !user.can_create_charity() {
            tracing::warn!(
                user_id = %user.id,
                kyc = %user.kyc_status(),
                "Charity creation refused"
            );
            return Err(DonationError::KycNotVerified(user.kyc_status()));
        }
        new_charity.validate().map_err(DonationError::Validation)?;

        let charity = new_charity.into_charity();
        tracing::info!(charity_id = %charity.id, user_id = %user.id, "Charity created");
        self.charities.insert(0, charity);
        Ok(&self.charities[0])
    }

    /// Bump the donation counter after a successful checkout.
    ///
    /// # Errors
    /// Returns [`DonationError::NotFound`] for an unknown id.
    pub fn record_donation(&mut self, charity_id: &str) -> Result<u32> {
        let charity = self
            .charities
            .iter_mut()
            .find(|c| c.id == charity_id)
            .ok_or_else(|| DonationError::NotFound(format!("charity {charity_id}")))?;
        charity.donations_count = charity.donations_count.saturating_add(1);
        Ok(charity.donations_count)
    }
}
