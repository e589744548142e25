//! Basic usage example for the SMS-Activate client.
//!
//! Acquires a number, waits for the activation code and completes the
//! activation.
//!
//! # Running
//!
//! ```bash
//! SMS_ACTIVATE_API_KEY=your_api_key cargo run --example basic_usage
//! ```

use sms_activate::{ActivationStatus, Country, Service, SmsActivateClient};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("SMS_ACTIVATE_API_KEY")
        .expect("SMS_ACTIVATE_API_KEY environment variable must be set");

    let client = SmsActivateClient::builder(api_key)
        .request_timeout(Duration::from_secs(30))
        .build()?;

    println!("Balance: {}", client.get_balance().await?);

    println!("Requesting phone number for Discord in Russia...");
    let number = client
        .get_phone_number(&Service::Discord, Country::Russia)
        .await?;

    println!("Got phone number:");
    println!("  Activation ID: {}", number.id);
    println!("  Number: {}", number.phone_number);

    client
        .set_activation_status(&number.id, ActivationStatus::Activate)
        .await?;

    // Poll for up to two minutes
    println!("\nWaiting for SMS code...");
    for _ in 0..40 {
        if let Some(code) = client.get_activation_code(&number.id).await? {
            println!("Received SMS code: {}", code);
            client
                .set_activation_status(&number.id, ActivationStatus::CompleteActivation)
                .await?;
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs(3)).await;
    }

    println!("No SMS received, reporting number");
    let ack = client
        .set_activation_status(&number.id, ActivationStatus::ReportNumber)
        .await?;
    println!("Provider answered: {}", ack);

    Ok(())
}
