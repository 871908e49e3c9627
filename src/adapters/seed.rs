//! Static seed data for the charity directory and blood request board.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    BankDetails, BloodGroup, BloodRequest, Charity, DonationType, PaymentInfo, RequestStatus,
    Urgency,
};

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn request(
    id: &str,
    blood_group: BloodGroup,
    hospital: &str,
    urgency: Urgency,
    location: &str,
    contact_number: &str,
    date: DateTime<Utc>,
) -> BloodRequest {
    BloodRequest {
        id: id.to_string(),
        blood_group,
        hospital: hospital.to_string(),
        urgency,
        location: location.to_string(),
        contact_number: contact_number.to_string(),
        date,
        status: RequestStatus::Open,
    }
}

/// Open blood requests shown on first launch.
#[must_use]
pub fn blood_requests() -> Vec<BloodRequest> {
    use BloodGroup::*;
    vec![
        request(
            "1",
            APositive,
            "City General Hospital",
            Urgency::High,
            "New York, NY",
            "(555) 123-4567",
            seed_date(2023, 6, 15),
        ),
        request(
            "2",
            ONegative,
            "Memorial Medical Center",
            Urgency::High,
            "Los Angeles, CA",
            "(555) 987-6543",
            seed_date(2023, 6, 14),
        ),
        request(
            "3",
            BPositive,
            "University Hospital",
            Urgency::Medium,
            "Chicago, IL",
            "(555) 456-7890",
            seed_date(2023, 6, 18),
        ),
        request(
            "4",
            AbPositive,
            "St. Mary's Medical Center",
            Urgency::Low,
            "Houston, TX",
            "(555) 234-5678",
            seed_date(2023, 6, 20),
        ),
        request(
            "5",
            ANegative,
            "Mercy Hospital",
            Urgency::Medium,
            "Philadelphia, PA",
            "(555) 345-6789",
            seed_date(2023, 6, 17),
        ),
    ]
}

/// Charities listed on first launch.
#[must_use]
pub fn charities() -> Vec<Charity> {
    vec![
        Charity {
            id: "1".to_string(),
            name: "Food For All".to_string(),
            description:
                "Collecting surplus food and delivering meals to shelters and low-income families."
                    .to_string(),
            image: "https://images.example.org/charities/food-for-all.jpg".to_string(),
            categories: vec![DonationType::Food, DonationType::Funds],
            rating: 4.8,
            donations_count: 1250,
            location: "New York, NY".to_string(),
            payment_info: Some(PaymentInfo {
                upi_id: Some("foodforall@upi".to_string()),
                qr_code_image: None,
                bank_details: None,
            }),
        },
        Charity {
            id: "2".to_string(),
            name: "Warm Hearts Clothing Drive".to_string(),
            description:
                "Winter clothing and blankets for people experiencing homelessness."
                    .to_string(),
            image: "https://images.example.org/charities/warm-hearts.jpg".to_string(),
            categories: vec![DonationType::Clothes],
            rating: 4.6,
            donations_count: 830,
            location: "Chicago, IL".to_string(),
            payment_info: None,
        },
        Charity {
            id: "3".to_string(),
            name: "Red Drop Blood Bank".to_string(),
            description:
                "Community blood bank coordinating donors with local hospitals."
                    .to_string(),
            image: "https://images.example.org/charities/red-drop.jpg".to_string(),
            categories: vec![DonationType::Blood, DonationType::Funds],
            rating: 4.9,
            donations_count: 2100,
            location: "Los Angeles, CA".to_string(),
            payment_info: Some(PaymentInfo {
                upi_id: None,
                qr_code_image: None,
                bank_details: Some(BankDetails {
                    account_name: "Red Drop Blood Bank".to_string(),
                    account_number: "004512349876".to_string(),
                    ifsc_code: "RDBK0000451".to_string(),
                    bank_name: "Community Savings Bank".to_string(),
                }),
            }),
        },
        Charity {
            id: "4".to_string(),
            name: "Bright Futures Education Fund".to_string(),
            description:
                "Scholarships, school supplies and uniforms for children in need."
                    .to_string(),
            image: "https://images.example.org/charities/bright-futures.jpg".to_string(),
            categories: vec![DonationType::Funds, DonationType::Clothes],
            rating: 4.7,
            donations_count: 640,
            location: "Houston, TX".to_string(),
            payment_info: Some(PaymentInfo {
                upi_id: Some("brightfutures@upi".to_string()),
                qr_code_image: None,
                bank_details: None,
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_requests_are_open() {
        let requests = blood_requests();
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(BloodRequest::is_open));
        assert_eq!(requests[1].date.format("%Y-%m-%d").to_string(), "2023-06-14");
    }

    #[test]
    fn test_seed_fund_charities_have_payment_info() {
        for charity in charities() {
            if charity.accepts(DonationType::Funds) {
                let info = charity.payment_info.expect("Fund charity needs payment info");
                assert!(info.has_any_method(), "{}", charity.name);
            }
        }
    }
}
