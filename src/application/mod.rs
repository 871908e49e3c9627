//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod account;
mod blood_requests;
mod charities;
mod donations;

pub use account::AccountService;
pub use blood_requests::BloodRequestBoard;
pub use charities::CharityDirectory;
pub use donations::{Checkout, DonationOrder, DonationService};
