//! Fallback search across every country pool.
//!
//! # Running
//!
//! ```bash
//! SMS_ACTIVATE_API_KEY=your_api_key cargo run --example fallback_search -- tg
//! ```

use sms_activate::{Country, NumberKind, Service, SmsActivateClient};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("SMS_ACTIVATE_API_KEY")
        .expect("SMS_ACTIVATE_API_KEY environment variable must be set");
    let service = Service::from_code(env::args().nth(1).unwrap_or_else(|| "ds".to_string()));

    let client = SmsActivateClient::with_api_key(api_key)?;

    let key = service.availability_key(NumberKind::Regular);
    for country in Country::ALL {
        let count = client.get_available_numbers(&key, country).await?;
        println!("{:<16} {}", country.to_string(), count);
    }

    match client.find_cheap_available_number(&service).await? {
        Some(number) => println!(
            "\nAcquired {} (activation {})",
            number.phone_number, number.id
        ),
        None => println!("\nNo country has numbers for '{}'", service),
    }

    Ok(())
}
