//! donation-hub command line.
//!
//! Blood compatibility lookups, seed data listings and a scripted walk
//! through the register -> KYC -> charity -> checkout flow.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use donation_hub::adapters::auto_review::DelayedApprover;
use donation_hub::adapters::memory::MemoryStorage;
use donation_hub::adapters::mock_auth::MockAuthenticator;
use donation_hub::adapters::sanitize::SanitizingMakeWriter;
use donation_hub::adapters::simulated_payment::SimulatedGateway;
use donation_hub::adapters::sqlite::SqliteStorage;
use donation_hub::adapters::StorageError;
use donation_hub::application::{
    AccountService, BloodRequestBoard, CharityDirectory, DonationOrder, DonationService,
};
use donation_hub::config::{AppConfig, LogMode};
use donation_hub::domain::{
    BloodGroup, BloodRequest, DonationType, IdType, KycSubmission, NewCharity, PaymentInfo,
    PaymentMethod, Registration,
};
use donation_hub::ports::Storage;
use donation_hub::DonationError;

const USAGE: &str = "\
Usage: donation-hub <command> [options]

Commands:
  compat <donor> <recipient>   Check whether donor blood can go to recipient
  matrix                       Print the full donor/recipient table
  requests [--group G] [--donor G]
                               List open blood requests
  charities [--category T]     List charities (food, funds, clothes, blood)
  demo                         Run the scripted account, KYC and checkout flow
  help                         Show this message

Environment:
  DONATION_HUB_DB_PATH, DONATION_HUB_KYC_REVIEW_DELAY_SECS,
  DONATION_HUB_LOG_MODE, DONATION_HUB_LOG_FILE, DONATION_HUB_SANITIZE_MAX_BYTES,
  RUST_LOG";

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _guard = init_logging(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };
    let rest = &args[1..];

    tracing::debug!(command = %command, "Starting donation-hub");

    match command.as_str() {
        "compat" => compat(rest),
        "matrix" => {
            matrix();
            Ok(())
        }
        "requests" => requests(rest),
        "charities" => charities(rest),
        "demo" => {
            if config.uses_in_memory_db() {
                demo(&config, Arc::new(MemoryStorage::new()))
            } else {
                let storage = SqliteStorage::new(&config.db_path)
                    .with_context(|| format!("opening database {}", config.db_path))?;
                demo(&config, Arc::new(storage))
            }
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("Unknown command: {other}\n\n{USAGE}"),
    }
}

fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    let use_file = match config.log_mode {
        LogMode::File => true,
        LogMode::Stderr => false,
        // Keep the terminal clean for command output.
        LogMode::Auto => std::io::stderr().is_terminal(),
    };

    let (writer, guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!use_file)
                .with_writer(SanitizingMakeWriter::with_limit(writer, config.sanitize_max_bytes)),
        )
        .init();

    Ok(guard)
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(idx) => match args.get(idx + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => bail!("{flag} needs a value"),
        },
        None => Ok(None),
    }
}

fn compat(args: &[String]) -> Result<()> {
    let [donor, recipient] = args else {
        bail!("Usage: donation-hub compat <donor> <recipient>");
    };
    let donor: BloodGroup = donor.parse()?;
    let recipient: BloodGroup = recipient.parse()?;

    let verdict = if donor.can_donate_to(recipient) {
        "compatible"
    } else {
        "not compatible"
    };
    println!("{donor} -> {recipient}: {verdict}");
    Ok(())
}

fn matrix() {
    print!("{:>6}", "D \\ R");
    for recipient in BloodGroup::ALL {
        print!("{recipient:>5}");
    }
    println!();

    for donor in BloodGroup::ALL {
        print!("{donor:>6}");
        for recipient in BloodGroup::ALL {
            let mark = if donor.can_donate_to(recipient) { "x" } else { "." };
            print!("{mark:>5}");
        }
        println!();
    }
}

fn print_request(request: &BloodRequest) {
    println!(
        "  [{}] {:<4} {:<7} {} ({}) {} posted {}",
        request.id,
        request.blood_group,
        request.urgency.to_string(),
        request.hospital,
        request.location,
        request.contact_number,
        request.date.format("%Y-%m-%d"),
    );
}

fn requests(args: &[String]) -> Result<()> {
    let board = BloodRequestBoard::with_seed();

    let group = flag_value(args, "--group")?;
    let donor = flag_value(args, "--donor")?;
    let listed: Vec<&BloodRequest> = match (group, donor) {
        (Some(_), Some(_)) => bail!("Use either --group or --donor, not both"),
        (Some(group), None) => board.by_blood_group(group.parse()?),
        (None, Some(donor)) => board.compatible_with(donor.parse()?),
        (None, None) => board.all().iter().filter(|r| r.is_open()).collect(),
    };

    if listed.is_empty() {
        println!("No open blood requests match.");
    }
    for request in listed {
        print_request(request);
    }
    Ok(())
}

fn charities(args: &[String]) -> Result<()> {
    let directory = CharityDirectory::with_seed();

    let listed = match flag_value(args, "--category")? {
        Some(raw) => {
            let kind: DonationType = raw.parse().map_err(anyhow::Error::msg)?;
            directory.by_category(kind)
        }
        None => directory.all().iter().collect(),
    };

    for charity in listed {
        let categories: Vec<&str> = charity.categories.iter().map(DonationType::as_str).collect();
        println!(
            "  [{}] {} ({}) rating {:.1}, {} donations, accepts {}",
            charity.id,
            charity.name,
            charity.location,
            charity.rating,
            charity.donations_count,
            categories.join(", "),
        );
    }
    Ok(())
}

fn demo<S>(config: &AppConfig, storage: Arc<S>) -> Result<()>
where
    S: Storage,
    S::Error: Into<StorageError>,
{
    let reviewer = Arc::new(DelayedApprover::new(config.kyc_review_delay));
    let mut accounts =
        AccountService::new(Arc::new(MockAuthenticator::new()), storage.clone(), reviewer);
    let donations = DonationService::new(Arc::new(SimulatedGateway::new()), storage);
    let mut directory = CharityDirectory::with_seed();
    let board = BloodRequestBoard::with_seed();

    if let Some(previous) = accounts.restore()? {
        println!("Previous session for {} found, signing out.", previous.name);
        accounts.logout()?;
    }

    let user = accounts.register(&Registration {
        name: "Demo Donor".to_string(),
        email: "demo.donor@example.com".to_string(),
        password: "donate123".to_string(),
        confirm_password: "donate123".to_string(),
        blood_group: Some(BloodGroup::ONegative),
    })?;
    println!("Registered {} (KYC: {})", user.name, user.kyc_status());

    let new_charity = NewCharity {
        name: "Neighbourhood Pantry".to_string(),
        description: "Weekly grocery boxes for families in the neighbourhood.".to_string(),
        image: "https://images.example.org/charities/pantry.jpg".to_string(),
        categories: vec![DonationType::Food, DonationType::Funds],
        location: "Pune, MH".to_string(),
        payment_info: Some(PaymentInfo {
            upi_id: Some("pantry@upi".to_string()),
            ..Default::default()
        }),
    };

    match directory.add_charity(accounts.current_user(), new_charity.clone()) {
        Err(DonationError::KycNotVerified(status)) => {
            println!("Charity creation blocked until KYC is verified (status: {status}).");
        }
        Err(e) => return Err(e.into()),
        Ok(_) => bail!("Unverified user was allowed to create a charity"),
    }

    let submitted_at = Utc::now();
    let date_of_birth =
        NaiveDate::from_ymd_opt(1990, 4, 12).context("building demo date of birth")?;
    accounts.submit_kyc(
        KycSubmission {
            full_name: "Demo Donor".to_string(),
            date_of_birth,
            id_type: IdType::Pan,
            id_number: "ABCDE1234F".to_string(),
            id_document_uri: "file:///tmp/demo-id.jpg".to_string(),
            selfie_uri: "file:///tmp/demo-selfie.jpg".to_string(),
            address: "12 Station Road, Pune".to_string(),
        },
        submitted_at,
    )?;
    println!("KYC submitted (status: {})", accounts.kyc_status());

    // Advance a simulated clock instead of sleeping.
    let reviewed_at = submitted_at
        .checked_add_signed(config.kyc_review_delay)
        .context("review delay overflows the clock")?;
    match accounts.process_review(reviewed_at)? {
        Some(status) => println!(
            "Review after {}s: {status}",
            config.kyc_review_delay.num_seconds()
        ),
        None => println!("Review still pending"),
    }

    let charity = directory
        .add_charity(accounts.current_user(), new_charity)?
        .clone();
    println!("Created charity {} (rating {:.1})", charity.name, charity.rating);

    let checkout = donations.checkout(
        accounts.current_user(),
        &charity,
        DonationOrder {
            kind: DonationType::Funds,
            amount: Some(25.0),
            items: None,
            quantity: None,
            method: PaymentMethod::CreditCard,
        },
        Utc::now(),
    )?;
    directory.record_donation(&charity.id)?;
    println!(
        "Donated {:.2} via {} (receipt {})",
        checkout.receipt.amount.unwrap_or_default(),
        checkout.receipt.method.as_str(),
        checkout.receipt.reference,
    );

    let history = donations.history(0, 5)?;
    println!("Recent donations ({} total):", history.total_count);
    for donation in &history.items {
        println!(
            "  {} {} {} to charity {}",
            donation.date.format("%Y-%m-%d %H:%M:%S"),
            donation.kind,
            donation.status.as_str(),
            donation.charity_id,
        );
    }

    if let Some(user) = accounts.current_user() {
        let matches = board.compatible_for(user);
        println!("Open blood requests you can answer: {}", matches.len());
        for request in matches {
            print_request(request);
        }
    }

    Ok(())
}
