//! Integration tests against the real SMS-Activate API.
//!
//! These tests make real API calls and require a valid API key.
//! They are ignored by default and should be run manually.
//!
//! # Setup
//!
//! Put `SMS_ACTIVATE_API_KEY=...` into a `.env` file, or pass it directly:
//!
//! ```bash
//! SMS_ACTIVATE_API_KEY=your_key cargo test --test live_api -- --ignored
//! ```
//!
//! **WARNING**: tests that acquire numbers consume API credits!

use sms_activate::{
    ActivationStatus, Country, Service, SmsActivateClient, SmsActivateError,
    SmsActivateErrorCode,
};
use std::env;

const TEST_SERVICE: Service = Service::Discord;

fn get_api_key() -> String {
    dotenvy::dotenv().ok();

    env::var("SMS_ACTIVATE_API_KEY").expect(
        "SMS_ACTIVATE_API_KEY environment variable must be set.\n\
         Either add it to a .env file or run with:\n\
         SMS_ACTIVATE_API_KEY=your_key cargo test --test live_api -- --ignored",
    )
}

fn create_client() -> SmsActivateClient {
    SmsActivateClient::with_api_key(get_api_key()).expect("Failed to create client")
}

#[tokio::test]
#[ignore = "requires API key"]
async fn test_get_balance() {
    let client = create_client();

    let balance = client.get_balance().await.expect("balance request failed");
    println!("Balance: {}", balance);
    assert!(balance >= 0.0);
}

#[tokio::test]
#[ignore = "requires API key"]
async fn test_get_available_numbers_all_countries() {
    let client = create_client();
    let key = TEST_SERVICE.availability_key(Default::default());

    for country in Country::ALL {
        match client.get_available_numbers(&key, country).await {
            Ok(count) => println!("{}: {} numbers", country, count),
            Err(SmsActivateError::UnknownService { .. }) => {
                println!("{}: service not listed", country)
            }
            Err(e) => panic!("Unexpected error for {}: {:?}", country, e),
        }
    }
}

#[tokio::test]
#[ignore = "requires API key and consumes credits"]
async fn test_find_and_cancel_number() {
    let client = create_client();

    match client.find_cheap_available_number(&TEST_SERVICE).await {
        Ok(Some(number)) => {
            println!("Got number {} (activation {})", number.phone_number, number.id);
            assert!(!number.id.as_ref().is_empty());

            let code = client.get_activation_code(&number.id).await;
            println!("Activation code: {:?}", code);

            // Cancel so the number is not charged
            let ack = client
                .set_activation_status(&number.id, ActivationStatus::ReportNumber)
                .await;
            println!("Cancel acknowledgement: {:?}", ack);
        }
        Ok(None) => println!("No numbers available in any country"),
        Err(SmsActivateError::Service(e)) if e.code == SmsActivateErrorCode::NoBalance => {
            println!("Account has no balance");
        }
        Err(e) => panic!("Unexpected error: {:?}", e),
    }
}

#[tokio::test]
#[ignore = "tests error handling"]
async fn test_invalid_api_key() {
    let client = SmsActivateClient::with_api_key("invalid_key_12345").unwrap();

    let error = client
        .get_balance()
        .await
        .expect_err("invalid key must not report a balance");
    println!("Error with invalid API key: {:?}", error);
    assert_eq!(error.service_code(), Some(&SmsActivateErrorCode::BadKey));
}
