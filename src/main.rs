//! Terminal driver for one CarCare booking session
//!
//! Wires the booking flow to the real Firestore client and walks the form
//! the way the screen does: selections, date, time, description, photo,
//! then submit with the outcome projected onto the terminal. Handy against
//! the Firestore emulator.

use carcare_booking::config::Config;
use carcare_booking::flow::{BookingFlow, BookingIntent, ResultProjector, ScreenUpdate};
use carcare_booking::image::{fresh_capture_path, ImageAcquirer, ImageError};
use carcare_booking::models::{parse_display_time, BookingOptions, PhotoRef, UserDetails};
use carcare_booking::nav::LogNavigator;
use carcare_booking::notify::LogNotifier;
use carcare_booking::store::FirestoreClient;
use carcare_booking::validation::validate_description;
use chrono::{NaiveDate, NaiveTime};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prompts on stdin for an image reference; stands in for the platform
/// camera and gallery pickers.
struct PromptImageAcquirer {
    capture_dir: PathBuf,
}

impl ImageAcquirer for PromptImageAcquirer {
    fn capture_camera(&self) -> Result<Option<PhotoRef>, ImageError> {
        std::fs::create_dir_all(&self.capture_dir)?;
        // Allocate the capture file up front, like the app's image file provider
        let path = fresh_capture_path(&self.capture_dir);
        std::fs::File::create(&path)?;
        Ok(Some(PhotoRef::Camera(path)))
    }

    fn pick_gallery(&self) -> Result<Option<PhotoRef>, ImageError> {
        let reference = prompt("Image reference (empty to cancel)")?;
        if reference.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PhotoRef::Gallery(reference)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carcare_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting CarCare booking session");

    let store = Arc::new(FirestoreClient::new(&config)?);
    let user = signed_in_user();
    let flow = BookingFlow::new(BookingOptions::default(), user, store);
    let projector = ResultProjector::new(Arc::new(LogNotifier), Arc::new(LogNavigator));
    let images = PromptImageAcquirer {
        capture_dir: config.capture_dir.clone(),
    };

    fill_form(&flow, &images)?;

    let draft = flow.form().draft();
    println!(
        "Booking {} at {} on {} {}",
        draft.service,
        draft.center,
        draft.formatted_date(),
        draft.formatted_time()
    );

    flow.apply(BookingIntent::Submit)?;
    let mut outcome = flow.subscribe_outcome();

    loop {
        match projector.project(&flow) {
            ScreenUpdate::ShowProgress => {
                println!("Booking...");
                outcome.changed().await?;
            }
            ScreenUpdate::ShowError { message } => {
                println!("Error: {}", message);
                let retry = prompt("Retry? [y/N]")?;
                flow.apply(BookingIntent::DismissOutcome)?;
                if retry.eq_ignore_ascii_case("y") {
                    flow.apply(BookingIntent::Submit)?;
                } else {
                    break;
                }
            }
            ScreenUpdate::Complete { appointment_id } => {
                println!("Appointment booked: {}", appointment_id);
                break;
            }
            ScreenUpdate::CloseDialog => break,
        }
    }

    Ok(())
}

/// Walk the form fields, forwarding each answer as an intent
fn fill_form(flow: &BookingFlow, images: &PromptImageAcquirer) -> Result<(), Box<dyn std::error::Error>> {
    let options = flow.form().options().clone();

    let service = choose("Service", &options.services)?;
    flow.apply(BookingIntent::SelectService(service))?;

    let center = choose("Center", &options.centers)?;
    flow.apply(BookingIntent::SelectCenter(center))?;

    loop {
        let line = prompt("Service date (YYYY-MM-DD)")?;
        match NaiveDate::parse_from_str(&line, "%Y-%m-%d") {
            Ok(date) => {
                let millis = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
                flow.apply(BookingIntent::SelectDate(millis))?;
                break;
            }
            Err(_) => println!("Enter a date like 2025-03-10"),
        }
    }

    loop {
        let line = prompt("Service time (e.g. 02:30 PM, empty to skip)")?;
        if line.is_empty() {
            break;
        }
        if parse_display_time(&line).is_some() {
            flow.apply(BookingIntent::SelectTime(line))?;
            break;
        }
        println!("Enter a time like 02:30 PM");
    }

    loop {
        let description = prompt("Problem description (optional)")?;
        if description.is_empty() {
            break;
        }
        match validate_description(&description) {
            Ok(()) => {
                flow.apply(BookingIntent::UpdateDescription(description))?;
                break;
            }
            Err(e) => println!("{}", e),
        }
    }

    let photo = loop {
        let answer = prompt("Add photo? [c]amera / [g]allery / enter to skip")?;
        match answer.as_str() {
            "" => break None,
            "c" => break images.capture_camera()?,
            "g" => break images.pick_gallery()?,
            _ => println!("Answer c, g, or leave empty"),
        }
    };
    if let Some(photo) = photo {
        flow.apply(BookingIntent::AttachPhoto(photo))?;
    }

    Ok(())
}

fn choose(label: &str, options: &[String]) -> io::Result<String> {
    println!("{}:", label);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    loop {
        let line = prompt(&format!("Select [1-{}] (enter for 1)", options.len()))?;
        if line.is_empty() {
            return Ok(options.first().cloned().unwrap_or_default());
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].clone()),
            _ => println!("Enter a number between 1 and {}", options.len()),
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// The authentication collaborator is out of scope; the signed-in user comes
/// from the environment with a demo fallback.
fn signed_in_user() -> UserDetails {
    UserDetails {
        user_id: std::env::var("CARCARE_USER_ID").unwrap_or_else(|_| "demo-user".to_string()),
        email: std::env::var("CARCARE_USER_EMAIL").ok(),
        display_name: std::env::var("CARCARE_USER_NAME").ok(),
        is_email_verified: false,
        phone_number: None,
        photo_url: None,
    }
}
