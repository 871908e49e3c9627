//! Account service: session handling and the KYC workflow.
//!
//! Holds the signed-in user as explicit state. Every change to the user is
//! written through to storage so a restart can restore the session.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapters::StorageError;
use crate::domain::{
    Credentials, KycStatus, KycSubmission, ProfileUpdate, Registration, ReviewDecision,
    SubmitOutcome, User,
};
use crate::ports::{Authenticator, KycReviewer, Storage};
use crate::{DonationError, Result};

pub struct AccountService<A, S, R>
where
    A: Authenticator,
    S: Storage,
    R: KycReviewer,
{
    auth: Arc<A>,
    storage: Arc<S>,
    reviewer: Arc<R>,
    current: Option<User>,
}

impl<A, S, R> AccountService<A, S, R>
where
    A: Authenticator,
    S: Storage,
    S::Error: Into<StorageError>,
    R: KycReviewer,
{
    /// Create a service with nobody signed in. Call [`Self::restore`] to
    /// pick up a persisted session.
    pub fn new(auth: Arc<A>, storage: Arc<S>, reviewer: Arc<R>) -> Self {
        Self {
            auth,
            storage,
            reviewer,
            current: None,
        }
    }

    /// Reload the persisted session, if any.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn restore(&mut self) -> Result<Option<&User>> {
        self.current = self
            .storage
            .load_session()
            .map_err(|e| DonationError::Storage(e.into()))?;
        if let Some(user) = &self.current {
            tracing::info!(user_id = %user.id, kyc = %user.kyc_status(), "Restored session");
        }
        Ok(self.current.as_ref())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// # Errors
    /// Returns a validation error for malformed input, or an auth error if
    /// the credentials are rejected.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&User> {
        credentials.validate().map_err(DonationError::Validation)?;

        let user = self.auth.authenticate(credentials)?;
        tracing::info!(user_id = %user.id, "User logged in");
        self.sign_in(user)
    }

    /// # Errors
    /// Returns a validation error for malformed input, or an auth error if
    /// the account cannot be created.
    pub fn register(&mut self, registration: &Registration) -> Result<&User> {
        registration.validate().map_err(DonationError::Validation)?;

        let user = self.auth.register(registration)?;
        tracing::info!(user_id = %user.id, "User registered");
        self.sign_in(user)
    }

    /// Sign out and forget the persisted session.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn logout(&mut self) -> Result<()> {
        self.storage
            .clear_session()
            .map_err(|e| DonationError::Storage(e.into()))?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`DonationError::NotAuthenticated`] if nobody is signed in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User> {
        let user = self.current.as_mut().ok_or(DonationError::NotAuthenticated)?;
        user.apply_update(update);
        self.persist()?;
        self.current_or_err()
    }

    /// Status of the signed-in user; `not_submitted` when signed out.
    #[must_use]
    pub fn kyc_status(&self) -> KycStatus {
        self.current
            .as_ref()
            .map_or(KycStatus::NotSubmitted, User::kyc_status)
    }

    /// Submit identity details for review.
    ///
    /// # Errors
    /// Returns [`DonationError::NotAuthenticated`] if nobody is signed in,
    /// a validation error for malformed details, or a KYC error once the
    /// lifecycle has reached a terminal state.
    pub fn submit_kyc(
        &mut self,
        submission: KycSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome> {
        let user = self.current.as_mut().ok_or(DonationError::NotAuthenticated)?;
        submission.validate().map_err(DonationError::Validation)?;

        let outcome = user.kyc.submit(submission, now)?;
        match outcome {
            SubmitOutcome::Accepted => {
                tracing::info!(user_id = %user.id, "KYC submitted, pending review");
                self.persist()?;
            }
            SubmitOutcome::AlreadyPending => {
                tracing::debug!(user_id = %user.id, "KYC already pending, submission ignored");
            }
        }
        Ok(outcome)
    }

    /// Ask the reviewer for a decision on the current user's pending
    /// submission and apply it.
    ///
    /// Returns the new status when a decision was applied, `None` when there
    /// is nothing pending or the reviewer has not decided yet.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn process_review(&mut self, now: DateTime<Utc>) -> Result<Option<KycStatus>> {
        let decision = match &self.current {
            Some(user) if user.kyc_status() == KycStatus::Pending => user
                .kyc
                .record()
                .and_then(|record| self.reviewer.review(record, now)),
            _ => None,
        };

        match decision {
            Some(decision) => self.apply_review(decision, now).map(Some),
            None => Ok(None),
        }
    }

    /// Apply an explicit review decision to the current user.
    ///
    /// # Errors
    /// Returns [`DonationError::NotAuthenticated`] if nobody is signed in or
    /// a KYC error if no submission is pending.
    pub fn apply_review(
        &mut self,
        decision: ReviewDecision,
        now: DateTime<Utc>,
    ) -> Result<KycStatus> {
        let user = self.current.as_mut().ok_or(DonationError::NotAuthenticated)?;
        let status = user.kyc.apply(decision, now)?;
        tracing::info!(user_id = %user.id, kyc = %status, "KYC review applied");
        self.persist()?;
        Ok(status)
    }

    fn sign_in(&mut self, user: User) -> Result<&User> {
        self.storage
            .save_session(&user)
            .map_err(|e| DonationError::Storage(e.into()))?;
        Ok(&*self.current.insert(user))
    }

    fn persist(&self) -> Result<()> {
        let user = self.current_or_err()?;
        self.storage
            .save_session(user)
            .map_err(|e| DonationError::Storage(e.into()))
    }

    fn current_or_err(&self) -> Result<&User> {
        self.current.as_ref().ok_or(DonationError::NotAuthenticated)
    }
}
