//! KYC reviewer port: where verification decisions come from.

use chrono::{DateTime, Utc};

use crate::domain::{KycRecord, ReviewDecision};

/// Source of review decisions for pending KYC submissions.
///
/// Implementations are polled; returning `None` means the record is still
/// under review at `now`.
pub trait KycReviewer: Send + Sync {
    fn review(&self, record: &KycRecord, now: DateTime<Utc>) -> Option<ReviewDecision>;
}
