//! Delayed auto-approver: stands in for a human KYC reviewer.
//!
//! Every pending submission is approved once `delay` has elapsed since it
//! was submitted. It never rejects.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{KycRecord, ReviewDecision};
use crate::ports::KycReviewer;

/// Default time between submission and automatic approval.
pub const DEFAULT_REVIEW_DELAY_SECS: i64 = 5;

/// Longest accepted review delay (30 days).
pub const MAX_REVIEW_DELAY_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct DelayedApprover {
    delay: Duration,
}

impl DelayedApprover {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DelayedApprover {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_REVIEW_DELAY_SECS))
    }
}

impl KycReviewer for DelayedApprover {
    fn review(&self, record: &KycRecord, now: DateTime<Utc>) -> Option<ReviewDecision> {
        // A due time past the representable range is never reached.
        let due = record.submitted_at.checked_add_signed(self.delay)?;
        (now >= due).then_some(ReviewDecision::Approve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;

    #[test]
    fn test_approves_only_after_delay() {
        let submitted = Utc::now();
        let record = KycRecord::from_submission(fixtures::sample_submission(), submitted);
        let reviewer = DelayedApprover::default();

        assert_eq!(reviewer.review(&record, submitted), None);
        assert_eq!(
            reviewer.review(&record, submitted + Duration::milliseconds(4_999)),
            None
        );
        assert_eq!(
            reviewer.review(&record, submitted + Duration::seconds(5)),
            Some(ReviewDecision::Approve)
        );
    }

    #[test]
    fn test_zero_delay_approves_immediately() {
        let now = Utc::now();
        let record = KycRecord::from_submission(fixtures::sample_submission(), now);
        let reviewer = DelayedApprover::new(Duration::zero());
        assert_eq!(reviewer.review(&record, now), Some(ReviewDecision::Approve));
    }

    #[test]
    fn test_unreachable_due_time_stays_undecided() {
        let now = Utc::now();
        let record = KycRecord::from_submission(fixtures::sample_submission(), now);
        let reviewer = DelayedApprover::new(Duration::MAX);
        assert_eq!(reviewer.review(&record, now), None);
        assert_eq!(reviewer.review(&record, DateTime::<Utc>::MAX_UTC), None);
    }
}
