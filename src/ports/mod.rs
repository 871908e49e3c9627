//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the application and the
//! collaborators it does not own: local storage, identity, KYC review and
//! payments.

mod authenticator;
mod payment;
mod reviewer;
mod storage;

pub use authenticator::{AuthError, Authenticator};
pub use payment::{PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest};
pub use reviewer::KycReviewer;
pub use storage::{DonationPage, Storage};
