//! Donation ledger and checkout.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapters::StorageError;
use crate::domain::{Charity, Donation, DonationType, NewDonation, PaymentMethod, User};
use crate::ports::{DonationPage, PaymentGateway, PaymentReceipt, PaymentRequest, Storage};
use crate::{DonationError, Result};

/// What the donor fills in at checkout.
#[derive(Debug, Clone)]
pub struct DonationOrder {
    pub kind: DonationType,
    pub amount: Option<f64>,
    pub items: Option<Vec<String>>,
    pub quantity: Option<u32>,
    pub method: PaymentMethod,
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub donation: Donation,
    pub receipt: PaymentReceipt,
}

pub struct DonationService<P: PaymentGateway, S: Storage> {
    gateway: Arc<P>,
    storage: Arc<S>,
}

impl<P, S> DonationService<P, S>
where
    P: PaymentGateway,
    S: Storage,
    S::Error: Into<StorageError>,
{
    pub fn new(gateway: Arc<P>, storage: Arc<S>) -> Self {
        Self { gateway, storage }
    }

    /// Record a donation as pending.
    ///
    /// # Errors
    /// Returns a validation error or a storage error.
    pub fn add_donation(&self, new_donation: NewDonation, now: DateTime<Utc>) -> Result<Donation> {
        new_donation.validate().map_err(DonationError::Validation)?;

        let donation = new_donation.into_donation(now);
        self.record(&donation)?;
        Ok(donation)
    }

    /// # Errors
    /// Returns error if storage fails.
    pub fn by_user(&self, user_id: &str) -> Result<Vec<Donation>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|d| d.user_id == user_id)
            .collect())
    }

    /// # Errors
    /// Returns error if storage fails.
    pub fn by_type(&self, kind: DonationType) -> Result<Vec<Donation>> {
        Ok(self.all()?.into_iter().filter(|d| d.kind == kind).collect())
    }

    /// Donation history, newest first.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn history(&self, offset: usize, limit: usize) -> Result<DonationPage> {
        self.storage
            .load_donations_paginated(offset, limit)
            .map_err(|e| DonationError::Storage(e.into()))
    }

    /// Charge the gateway and record the donation.
    ///
    /// Nothing is charged or recorded unless the user is signed in, the
    /// charity accepts the donation type and the order is valid.
    ///
    /// # Errors
    /// Returns [`DonationError::NotAuthenticated`] without a user, a
    /// validation error for a bad order, or a payment error if the gateway
    /// refuses the charge. A storage failure after a successful charge is
    /// reported as [`DonationError::PaymentNotRecorded`] with the receipt
    /// reference.
    pub fn checkout(
        &self,
        user: Option<&User>,
        charity: &Charity,
        order: DonationOrder,
        now: DateTime<Utc>,
    ) -> Result<Checkout> {
        let user = user.ok_or(DonationError::NotAuthenticated)?;
        if !charity.accepts(order.kind) {
            return Err(DonationError::Validation(vec![format!(
                "{} does not accept {} donations",
                charity.name, order.kind
            )]));
        }

        let new_donation = NewDonation {
            kind: order.kind,
            amount: order.amount,
            items: order.items,
            quantity: order.quantity,
            charity_id: charity.id.clone(),
            user_id: user.id.clone(),
            payment_method: Some(order.method),
        };
        new_donation.validate().map_err(DonationError::Validation)?;

        let receipt = self.gateway.charge(&PaymentRequest {
            user_id: user.id.clone(),
            charity_id: charity.id.clone(),
            kind: order.kind,
            amount: order.amount,
            method: order.method,
        })?;

        let donation = new_donation.into_donation(now);
        if let Err(source) = self.record(&donation) {
            tracing::error!(
                reference = %receipt.reference,
                charity_id = %charity.id,
                "Charged but failed to record donation"
            );
            return Err(DonationError::PaymentNotRecorded {
                reference: receipt.reference,
                source,
            });
        }
        Ok(Checkout { donation, receipt })
    }

    fn record(&self, donation: &Donation) -> std::result::Result<(), StorageError> {
        self.storage
            .save_donation(donation)
            .map_err(Into::<StorageError>::into)?;
        tracing::info!(
            donation_id = %donation.id,
            kind = %donation.kind,
            charity_id = %donation.charity_id,
            "Donation recorded"
        );
        Ok(())
    }

    fn all(&self) -> Result<Vec<Donation>> {
        self.storage
            .load_donations()
            .map_err(|e| DonationError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::adapters::seed;
    use crate::adapters::simulated_payment::SimulatedGateway;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::{fixtures, BloodGroup, DonationStatus};
    use chrono::Duration;

    fn create_test_service() -> DonationService<SimulatedGateway, MemoryStorage> {
        DonationService::new(Arc::new(SimulatedGateway::new()), Arc::new(MemoryStorage::new()))
    }

    fn user() -> User {
        User::new("Kiran", "kiran@example.com", Some(BloodGroup::OPositive))
    }

    fn charity(id: &str) -> Charity {
        seed::charities()
            .into_iter()
            .find(|c| c.id == id)
            .expect("Seed charity exists")
    }

    fn funds_order(amount: f64) -> DonationOrder {
        DonationOrder {
            kind: DonationType::Funds,
            amount: Some(amount),
            items: None,
            quantity: None,
            method: PaymentMethod::Paypal,
        }
    }

    #[test]
    fn test_add_and_filter() {
        let service = create_test_service();
        let now = Utc::now();
        service
            .add_donation(fixtures::funds("u1", 25.0), now)
            .expect("Should add");
        service
            .add_donation(fixtures::funds("u2", 40.0), now + Duration::seconds(1))
            .expect("Should add");

        let mine = service.by_user("u1").expect("Should load");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].status, DonationStatus::Pending);
        assert_eq!(service.by_type(DonationType::Funds).expect("Should load").len(), 2);
        assert!(service.by_type(DonationType::Food).expect("Should load").is_empty());
    }

    #[test]
    fn test_invalid_donation_not_recorded() {
        let service = create_test_service();
        let err = service
            .add_donation(fixtures::funds("u1", 0.0), Utc::now())
            .expect_err("Should reject");
        assert!(matches!(err, DonationError::Validation(_)));
        assert_eq!(service.history(0, 10).expect("Should load").total_count, 0);
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        type Error = StorageError;

        fn save_session(&self, _user: &User) -> std::result::Result<(), StorageError> {
            Ok(())
        }

        fn load_session(&self) -> std::result::Result<Option<User>, StorageError> {
            Ok(None)
        }

        fn clear_session(&self) -> std::result::Result<(), StorageError> {
            Ok(())
        }

        fn save_donation(&self, _donation: &Donation) -> std::result::Result<(), StorageError> {
            Err(StorageError::Serialization("database is read-only".to_string()))
        }

        fn load_donations(&self) -> std::result::Result<Vec<Donation>, StorageError> {
            Ok(Vec::new())
        }

        fn load_donations_paginated(
            &self,
            offset: usize,
            limit: usize,
        ) -> std::result::Result<DonationPage, StorageError> {
            Ok(DonationPage::new(Vec::new(), 0, offset, limit))
        }
    }

    #[test]
    fn test_checkout_reports_reference_when_recording_fails() {
        let service =
            DonationService::new(Arc::new(SimulatedGateway::new()), Arc::new(ReadOnlyStorage));

        let err = service
            .checkout(Some(&user()), &charity("1"), funds_order(20.0), Utc::now())
            .expect_err("Should fail to record");
        match err {
            DonationError::PaymentNotRecorded { reference, .. } => {
                assert!(reference.starts_with("SIM-"));
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_checkout_requires_user() {
        let service = create_test_service();
        let err = service
            .checkout(None, &charity("1"), funds_order(10.0), Utc::now())
            .expect_err("Should refuse");
        assert!(matches!(err, DonationError::NotAuthenticated));
    }

    #[test]
    fn test_checkout_funds() {
        let service = create_test_service();
        let donor = user();

        let result = service
            .checkout(Some(&donor), &charity("1"), funds_order(50.0), Utc::now())
            .expect("Should succeed");

        assert!(result.receipt.reference.starts_with("SIM-"));
        assert_eq!(result.donation.payment_method, Some(PaymentMethod::Paypal));
        assert_eq!(result.donation.user_id, donor.id);
        assert_eq!(service.by_user(&donor.id).expect("Should load").len(), 1);
    }

    #[test]
    fn test_checkout_goods_needs_items() {
        let service = create_test_service();
        let order = DonationOrder {
            kind: DonationType::Clothes,
            amount: None,
            items: Some(vec![" ".to_string()]),
            quantity: Some(3),
            method: PaymentMethod::default(),
        };

        let err = service
            .checkout(Some(&user()), &charity("2"), order.clone(), Utc::now())
            .expect_err("Should reject");
        assert!(matches!(err, DonationError::Validation(_)));

        let order = DonationOrder {
            items: Some(vec!["Wool jackets".to_string()]),
            ..order
        };
        service
            .checkout(Some(&user()), &charity("2"), order, Utc::now())
            .expect("Should succeed");
    }

    #[test]
    fn test_checkout_rejects_unsupported_type() {
        let service = create_test_service();
        let err = service
            .checkout(Some(&user()), &charity("2"), funds_order(10.0), Utc::now())
            .expect_err("Clothing drive takes no funds");
        assert!(matches!(err, DonationError::Validation(_)));
    }

    #[test]
    fn test_history_newest_first_on_sqlite() {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should open"));
        let service = DonationService::new(Arc::new(SimulatedGateway::new()), storage);
        let base = Utc::now();
        for i in 0..3_i32 {
            service
                .add_donation(
                    fixtures::funds("u1", f64::from(i + 1)),
                    base + Duration::seconds(i.into()),
                )
                .expect("Should add");
        }

        let page = service.history(0, 2).expect("Should load");
        assert_eq!(page.total_count, 3);
        assert!(page.has_more);
        assert_eq!(page.items[0].amount, Some(3.0));
        assert_eq!(page.next_offset(), Some(2));
    }
}
