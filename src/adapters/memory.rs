//! In-memory adapter: non-persistent Storage for tests and ephemeral runs.

use std::sync::Mutex;

use crate::domain::{Donation, User};
use crate::ports::{DonationPage, Storage};

use super::StorageError;

#[derive(Default)]
struct State {
    session: Option<User>,
    donations: Vec<Donation>,
}

/// Storage that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    type Error = StorageError;

    fn save_session(&self, user: &User) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").session = Some(user.clone());
        Ok(())
    }

    fn load_session(&self) -> Result<Option<User>, Self::Error> {
        Ok(self.state.lock().expect("Lock failed").session.clone())
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        self.state.lock().expect("Lock failed").session = None;
        Ok(())
    }

    fn save_donation(&self, donation: &Donation) -> Result<(), Self::Error> {
        self.state
            .lock()
            .expect("Lock failed")
            .donations
            .push(donation.clone());
        Ok(())
    }

    fn load_donations(&self) -> Result<Vec<Donation>, Self::Error> {
        let mut oldest_first = self.state.lock().expect("Lock failed").donations.clone();
        oldest_first.sort_by_key(|d| d.date);
        Ok(oldest_first)
    }

    fn load_donations_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<DonationPage, Self::Error> {
        let state = self.state.lock().expect("Lock failed");
        let mut newest_first: Vec<&Donation> = state.donations.iter().collect();
        // Stable sort keeps insertion order for equal timestamps; reverse puts
        // the most recent insert first.
        newest_first.sort_by_key(|d| d.date);
        newest_first.reverse();

        let items = newest_first
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(DonationPage::new(items, state.donations.len(), offset, limit))
    }
}
