//! KYC (identity verification) lifecycle.
//!
//! ```text
//! not_submitted --submit--> pending --approve--> verified
//!                              \----reject----> rejected
//! ```
//!
//! `verified` and `rejected` are terminal. Review outcomes arrive as explicit
//! [`ReviewDecision`] events; nothing in this module depends on wall-clock time
//! other than the timestamps passed in by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation;

/// Verification state of a user's identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted identity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Aadhar,
    Pan,
    Passport,
    VoterId,
    DrivingLicense,
}

impl IdType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aadhar => "Aadhar Card",
            Self::Pan => "PAN Card",
            Self::Passport => "Passport",
            Self::VoterId => "Voter ID",
            Self::DrivingLicense => "Driving License",
        }
    }
}

/// Identity details as entered by the user, before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycSubmission {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub id_type: IdType,
    pub id_number: String,
    pub id_document_uri: String,
    pub selfie_uri: String,
    pub address: String,
}

impl KycSubmission {
    /// Check required fields and the id number format.
    ///
    /// # Errors
    /// Returns every problem found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push("Full name is required".to_string());
        }

        if self.id_number.trim().is_empty() {
            errors.push("ID number is required".to_string());
        } else {
            match self.id_type {
                IdType::Aadhar if !validation::is_valid_aadhar(&self.id_number) => {
                    errors.push("Aadhar number must be 12 digits".to_string());
                }
                IdType::Pan if !validation::is_valid_pan(&self.id_number) => {
                    errors.push("Invalid PAN format (e.g., ABCDE1234F)".to_string());
                }
                _ => {}
            }
        }

        if self.id_document_uri.trim().is_empty() {
            errors.push("Please upload your ID document".to_string());
        }
        if self.selfie_uri.trim().is_empty() {
            errors.push("Please upload your selfie".to_string());
        }
        if self.address.trim().is_empty() {
            errors.push("Address is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A submitted KYC record. Created on submission, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycRecord {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub id_type: IdType,
    pub id_number: String,
    pub id_document_uri: String,
    pub selfie_uri: String,
    pub address: String,
    pub submitted_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl KycRecord {
    #[must_use]
    pub fn from_submission(submission: KycSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            full_name: submission.full_name,
            date_of_birth: submission.date_of_birth,
            id_type: submission.id_type,
            id_number: submission.id_number,
            id_document_uri: submission.id_document_uri,
            selfie_uri: submission.selfie_uri,
            address: submission.address,
            submitted_at,
            verified_at: None,
            rejection_reason: None,
        }
    }
}

/// Outcome of an external identity review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

/// What a call to [`KycLifecycle::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was stored and the status moved to pending.
    Accepted,
    /// A submission was already pending; nothing changed.
    AlreadyPending,
}

/// Invalid lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KycError {
    #[error("KYC is already {0}; it cannot be resubmitted")]
    AlreadyFinal(KycStatus),

    #[error("No pending KYC submission to review (status: {0})")]
    NotPending(KycStatus),
}

/// KYC state owned by a user: the status plus at most one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KycLifecycle {
    status: KycStatus,
    record: Option<KycRecord>,
}

impl KycLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifecycle that was verified outside this system (no local record).
    #[must_use]
    pub fn pre_verified() -> Self {
        Self {
            status: KycStatus::Verified,
            record: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> KycStatus {
        self.status
    }

    #[must_use]
    pub fn record(&self) -> Option<&KycRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.status == KycStatus::Verified
    }

    /// Store a submission and move to pending.
    ///
    /// Resubmitting while pending keeps the first record.
    ///
    /// # Errors
    /// Returns [`KycError::AlreadyFinal`] once verified or rejected.
    pub fn submit(
        &mut self,
        submission: KycSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, KycError> {
        match self.status {
            KycStatus::NotSubmitted => {
                self.record = Some(KycRecord::from_submission(submission, now));
                self.status = KycStatus::Pending;
                Ok(SubmitOutcome::Accepted)
            }
            KycStatus::Pending => Ok(SubmitOutcome::AlreadyPending),
            status => Err(KycError::AlreadyFinal(status)),
        }
    }

    /// Apply a review decision to a pending submission.
    ///
    /// # Errors
    /// Returns [`KycError::NotPending`] if there is nothing under review.
    pub fn apply(
        &mut self,
        decision: ReviewDecision,
        now: DateTime<Utc>,
    ) -> Result<KycStatus, KycError> {
        let record = match (self.status, self.record.as_mut()) {
            (KycStatus::Pending, Some(record)) => record,
            (status, _) => return Err(KycError::NotPending(status)),
        };

        match decision {
            ReviewDecision::Approve => {
                record.verified_at = Some(now);
                self.status = KycStatus::Verified;
            }
            ReviewDecision::Reject { reason } => {
                record.rejection_reason = Some(reason);
                self.status = KycStatus::Rejected;
            }
        }

        Ok(self.status)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    pub(crate) fn sample_submission() -> KycSubmission {
        KycSubmission {
            full_name: "Asha Rao".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).expect("Valid date"),
            id_type: IdType::Pan,
            id_number: "ABCDE1234F".to_string(),
            id_document_uri: "file:///tmp/id.jpg".to_string(),
            selfie_uri: "file:///tmp/selfie.jpg".to_string(),
            address: "12 Lake Road, Pune".to_string(),
        }
    }

    #[test]
    fn test_submit_moves_to_pending() {
        let now = Utc::now();
        let mut kyc = KycLifecycle::new();
        assert_eq!(kyc.status(), KycStatus::NotSubmitted);

        let outcome = kyc.submit(sample_submission(), now).expect("Should submit");
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(kyc.status(), KycStatus::Pending);
        assert_eq!(kyc.record().expect("Should have record").submitted_at, now);
    }

    #[test]
    fn test_resubmit_while_pending_is_noop() {
        let first = Utc::now();
        let mut kyc = KycLifecycle::new();
        kyc.submit(sample_submission(), first).expect("Should submit");

        let mut other = sample_submission();
        other.full_name = "Someone Else".to_string();
        let outcome = kyc
            .submit(other, first + Duration::seconds(1))
            .expect("Should not fail");

        assert_eq!(outcome, SubmitOutcome::AlreadyPending);
        assert_eq!(kyc.status(), KycStatus::Pending);
        let record = kyc.record().expect("Should have record");
        assert_eq!(record.full_name, "Asha Rao");
        assert_eq!(record.submitted_at, first);
    }

    #[test]
    fn test_approve_stamps_verification_time() {
        let now = Utc::now();
        let mut kyc = KycLifecycle::new();
        kyc.submit(sample_submission(), now).expect("Should submit");

        let later = now + Duration::seconds(5);
        let status = kyc.apply(ReviewDecision::Approve, later).expect("Should apply");
        assert_eq!(status, KycStatus::Verified);
        assert_eq!(kyc.record().and_then(|r| r.verified_at), Some(later));
    }

    #[test]
    fn test_reject_records_reason() {
        let now = Utc::now();
        let mut kyc = KycLifecycle::new();
        kyc.submit(sample_submission(), now).expect("Should submit");

        let reason = "Document unreadable".to_string();
        kyc.apply(ReviewDecision::Reject { reason: reason.clone() }, now)
            .expect("Should apply");
        assert_eq!(kyc.status(), KycStatus::Rejected);
        let record = kyc.record().expect("Should have record");
        assert_eq!(record.rejection_reason.as_deref(), Some("Document unreadable"));
        assert!(record.verified_at.is_none());
    }

    #[test]
    fn test_terminal_states_reject_further_transitions() {
        let now = Utc::now();
        let mut kyc = KycLifecycle::new();
        kyc.submit(sample_submission(), now).expect("Should submit");
        kyc.apply(ReviewDecision::Approve, now).expect("Should apply");

        assert_eq!(
            kyc.submit(sample_submission(), now),
            Err(KycError::AlreadyFinal(KycStatus::Verified))
        );
        assert_eq!(
            kyc.apply(ReviewDecision::Approve, now),
            Err(KycError::NotPending(KycStatus::Verified))
        );
    }

    #[test]
    fn test_decision_without_submission_fails() {
        let mut kyc = KycLifecycle::new();
        assert_eq!(
            kyc.apply(ReviewDecision::Approve, Utc::now()),
            Err(KycError::NotPending(KycStatus::NotSubmitted))
        );
        assert_eq!(kyc.status(), KycStatus::NotSubmitted);
    }

    #[test]
    fn test_submission_validation() {
        assert!(sample_submission().validate().is_ok());

        let mut bad = sample_submission();
        bad.id_type = IdType::Aadhar;
        bad.id_number = "1234".to_string();
        bad.selfie_uri = String::new();
        let errors = bad.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("12 digits"));

        let mut passport = sample_submission();
        passport.id_type = IdType::Passport;
        passport.id_number = "Z1234567".to_string();
        assert!(passport.validate().is_ok());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&KycStatus::NotSubmitted).expect("Should serialize");
        assert_eq!(json, "\"not_submitted\"");
        assert!(KycStatus::Rejected.is_terminal());
        assert!(!KycStatus::Pending.is_terminal());
    }
}
