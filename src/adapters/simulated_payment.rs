//! Simulated payment gateway. No money moves; every well-formed charge
//! succeeds with a random reference.

use chrono::Utc;

use crate::domain::new_id;
use crate::ports::{PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest};

#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        if let Some(amount) = request.amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(PaymentError::InvalidAmount(amount));
            }
        }

        let receipt = PaymentReceipt {
            reference: format!("SIM-{}", new_id()),
            method: request.method,
            amount: request.amount,
            processed_at: Utc::now(),
        };

        tracing::info!(
            charity_id = %request.charity_id,
            kind = %request.kind,
            method = request.method.as_str(),
            "Simulated payment processed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DonationType, PaymentMethod};

    fn request(amount: Option<f64>) -> PaymentRequest {
        PaymentRequest {
            user_id: "u1".to_string(),
            charity_id: "1".to_string(),
            kind: DonationType::Funds,
            amount,
            method: PaymentMethod::Paypal,
        }
    }

    #[test]
    fn test_charge_succeeds() {
        let receipt = SimulatedGateway::new()
            .charge(&request(Some(20.0)))
            .expect("Should charge");
        assert!(receipt.reference.starts_with("SIM-"));
        assert_eq!(receipt.method, PaymentMethod::Paypal);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let err = SimulatedGateway::new()
            .charge(&request(Some(-1.0)))
            .expect_err("Should reject");
        assert_eq!(err, PaymentError::InvalidAmount(-1.0));
    }
}
