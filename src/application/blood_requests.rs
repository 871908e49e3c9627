//! Blood request board.

use chrono::{DateTime, Utc};

use crate::adapters::seed;
use crate::domain::{BloodGroup, BloodRequest, NewBloodRequest, RequestStatus, User};
use crate::{DonationError, Result};

#[derive(Debug, Default)]
pub struct BloodRequestBoard {
    requests: Vec<BloodRequest>,
}

impl BloodRequestBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed() -> Self {
        let mut board = Self::new();
        board.load_seed();
        board
    }

    pub fn load_seed(&mut self) {
        self.requests = seed::blood_requests();
        tracing::debug!(count = self.requests.len(), "Loaded seed blood requests");
    }

    #[must_use]
    pub fn all(&self) -> &[BloodRequest] {
        &self.requests
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&BloodRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Open requests for exactly `group`.
    #[must_use]
    pub fn by_blood_group(&self, group: BloodGroup) -> Vec<&BloodRequest> {
        self.requests
            .iter()
            .filter(|r| r.is_open() && r.blood_group == group)
            .collect()
    }

    /// Open requests a donor of `donor` can give to, most urgent first.
    #[must_use]
    pub fn compatible_with(&self, donor: BloodGroup) -> Vec<&BloodRequest> {
        let mut matches: Vec<&BloodRequest> = self
            .requests
            .iter()
            .filter(|r| r.is_open() && donor.can_donate_to(r.blood_group))
            .collect();
        matches.sort_by(|a, b| b.urgency.cmp(&a.urgency));
        matches
    }

    /// Requests the user could answer. Empty when the user has no blood group.
    #[must_use]
    pub fn compatible_for(&self, user: &User) -> Vec<&BloodRequest> {
        user.blood_group
            .map(|group| self.compatible_with(group))
            .unwrap_or_default()
    }

    /// # Errors
    /// Returns a validation error for an incomplete form.
    pub fn add_request(
        &mut self,
        new_request: NewBloodRequest,
        now: DateTime<Utc>,
    ) -> Result<&BloodRequest> {
        new_request.validate().map_err(DonationError::Validation)?;

        let request = new_request.into_request(now);
        tracing::info!(
            request_id = %request.id,
            blood_group = %request.blood_group,
            urgency = %request.urgency,
            "Blood request posted"
        );
        self.requests.push(request);
        let last = self.requests.len() - 1;
        Ok(&self.requests[last])
    }

    /// # Errors
    /// Returns [`DonationError::NotFound`] for an unknown id.
    pub fn update_status(&mut self, id: &str, status: RequestStatus) -> Result<()> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DonationError::NotFound(format!("blood request {id}")))?;
        request.status = status;
        tracing::info!(request_id = %id, ?status, "Blood request status changed");
        Ok(())
    }
}
