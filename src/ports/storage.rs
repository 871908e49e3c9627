//! Storage port: Trait for locally persisted state.
//!
//! Only the session and the donation history outlive the process; charities
//! and blood requests are reseeded on every start.

use crate::domain::{Donation, User};

/// A page of donations with pagination metadata.
#[derive(Debug, Clone)]
pub struct DonationPage {
    /// Donations in this page, newest first
    pub items: Vec<Donation>,
    /// Total number of donations
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl DonationPage {
    #[must_use]
    pub fn new(items: Vec<Donation>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = offset + items.len() < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Offset of the next page, if any.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset + self.limit)
        } else {
            None
        }
    }
}

/// Trait for local storage operations.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the signed-in user, replacing any previous session.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_session(&self, user: &User) -> Result<(), Self::Error>;

    /// Load the signed-in user.
    ///
    /// # Returns
    /// `None` if nobody is signed in.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_session(&self) -> Result<Option<User>, Self::Error>;

    /// Forget the signed-in user.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_session(&self) -> Result<(), Self::Error>;

    /// Append a donation to the history.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_donation(&self, donation: &Donation) -> Result<(), Self::Error>;

    /// Load all donations, oldest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_donations(&self) -> Result<Vec<Donation>, Self::Error>;

    /// Load donations newest first with offset pagination.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_donations_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<DonationPage, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        let middle = DonationPage::new(Vec::new(), 25, 10, 10);
        assert!(middle.has_more);
        assert_eq!(middle.next_offset(), Some(20));

        let first = DonationPage::new(Vec::new(), 0, 0, 10);
        assert!(!first.has_more);
        assert_eq!(first.next_offset(), None);
    }
}
