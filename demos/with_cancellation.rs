//! Example demonstrating cancellation of in-flight requests.
//!
//! The client is built with a `CancellationToken`; cancelling it from another
//! task aborts the polling loop on its next request.
//!
//! # Running
//!
//! ```bash
//! SMS_ACTIVATE_API_KEY=your_api_key cargo run --example with_cancellation
//! ```

use sms_activate::{
    ActivationStatus, CancellationToken, Country, Service, SmsActivateClient, SmsActivateError,
};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("SMS_ACTIVATE_API_KEY")
        .expect("SMS_ACTIVATE_API_KEY environment variable must be set");

    let cancel_token = CancellationToken::new();
    let client = SmsActivateClient::builder(&api_key)
        .cancellation_token(cancel_token.clone())
        .build()?;

    let number = client
        .get_phone_number(&Service::Telegram, Country::Ukraine)
        .await?;
    println!("Got phone number: {}", number.phone_number);

    let token_clone = cancel_token.clone();
    let cancel_handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        println!("Cancelling operation...");
        token_clone.cancel();
    });

    println!("\nWaiting for SMS code (cancellable)...");
    let outcome = loop {
        match client.get_activation_code(&number.id).await {
            Ok(Some(code)) => break Ok(code),
            Ok(None) => tokio::time::sleep(Duration::from_secs(3)).await,
            Err(e) => break Err(e),
        }
    };

    match outcome {
        Ok(code) => {
            cancel_handle.abort();
            println!("Received SMS code: {}", code);
        }
        Err(SmsActivateError::Cancelled) => {
            println!("Operation was cancelled");
            // The shared token is cancelled, so report through a fresh client
            let cleanup = SmsActivateClient::with_api_key(&api_key)?;
            cleanup
                .set_activation_status(&number.id, ActivationStatus::ReportNumber)
                .await?;
        }
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}
