//! Domain layer: Core business types and logic.
//!
//! Plain data types plus the two pieces of real decision logic: blood group
//! compatibility and the KYC lifecycle. Nothing here performs I/O.

mod blood;
mod blood_request;
mod charity;
mod donation;
mod ids;
mod kyc;
mod user;
pub mod validation;

pub use blood::{is_compatible, BloodGroup, ParseBloodGroupError};
pub use blood_request::{BloodRequest, NewBloodRequest, RequestStatus, Urgency};
pub use charity::{
    BankDetails, Charity, DonationType, NewCharity, PaymentInfo, DEFAULT_RATING,
    MIN_DESCRIPTION_LEN,
};
pub use donation::{Donation, DonationStatus, NewDonation, PaymentMethod};
pub use ids::new_id;
pub use kyc::{
    IdType, KycError, KycLifecycle, KycRecord, KycStatus, KycSubmission, ReviewDecision,
    SubmitOutcome,
};
pub use user::{Credentials, ProfileUpdate, Registration, User};

#[cfg(test)]
pub(crate) mod fixtures {
    pub(crate) use super::charity::tests::sample_new_charity;
    pub(crate) use super::donation::tests::funds;
    pub(crate) use super::kyc::tests::sample_submission;
}
