//! HTTP contract tests against a mock SMS-Activate server.

use sms_activate::{
    ActivationId, ActivationStatus, CancellationToken, Country, Service, SetStatusResponse,
    SmsActivateClient, SmsActivateError, SmsActivateErrorCode,
};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(mock_server: &MockServer) -> SmsActivateClient {
    SmsActivateClient::new(mock_server.uri(), "test_key").unwrap()
}

#[tokio::test]
async fn test_requests_use_post_with_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("api_key", "test_key"))
        .and(query_param("action", "getBalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ACCESS_BALANCE:57.10"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    assert_eq!(client.get_balance().await.unwrap(), 57.10);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty(), "parameters belong in the query");
}

#[tokio::test]
async fn test_get_balance_bad_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getBalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string("BAD_KEY"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    match client.get_balance().await {
        Err(SmsActivateError::Service(error)) => {
            assert_eq!(error.code, SmsActivateErrorCode::BadKey);
            assert_eq!(error.raw, "BAD_KEY");
        }
        other => panic!("Expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_available_numbers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumbersStatus"))
        .and(query_param("country", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ds_0": 5, "ds_1": 1, "tg_0": 0})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let count = client
        .get_available_numbers("ds_0", Country::Kazakhstan)
        .await
        .unwrap();
    assert_eq!(count, 5);

    let result = client
        .get_available_numbers("wa_0", Country::Kazakhstan)
        .await;
    assert!(matches!(
        result,
        Err(SmsActivateError::UnknownService { ref service }) if service == "wa_0"
    ));
}

#[tokio::test]
async fn test_find_cheap_available_number_odd_sibling_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumbersStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"ds_0": 3.0, "xx_0": null, "yy_0": -1}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ACCESS_NUMBER:77:+79990000000"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let number = client
        .find_cheap_available_number(&Service::Discord)
        .await
        .unwrap()
        .expect("first country has numbers");
    assert_eq!(number.id.as_ref(), "77");
}

#[tokio::test]
async fn test_acquire_poll_complete_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumber"))
        .and(query_param("service", "ds"))
        .and(query_param("country", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("ACCESS_NUMBER:987654321:+79161234567"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "getStatus"))
        .and(query_param("id", "987654321"))
        .respond_with(ResponseTemplate::new(200).set_body_string("STATUS_OK:4415"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "setStatus"))
        .and(query_param("id", "987654321"))
        .and(query_param("status", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ACCESS_ACTIVATION"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);

    let number = client
        .get_phone_number(&Service::Discord, Country::default())
        .await
        .unwrap();
    assert_eq!(number.id, ActivationId::from("987654321"));
    assert_eq!(number.phone_number, "+79161234567");

    let code = client.get_activation_code(&number.id).await.unwrap();
    assert_eq!(code.unwrap().as_str(), "4415");

    let ack = client
        .set_activation_status(&number.id, ActivationStatus::CompleteActivation)
        .await
        .unwrap();
    assert_eq!(ack, "ACCESS_ACTIVATION");
    assert_eq!(
        SetStatusResponse::from_raw(&ack),
        Some(SetStatusResponse::Activation)
    );
}

#[tokio::test]
async fn test_get_phone_number_no_numbers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_string("NO_NUMBERS"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client
        .get_phone_number(&Service::Discord, Country::Russia)
        .await;
    assert!(matches!(
        result,
        Err(SmsActivateError::NoNumbersAvailable { .. })
    ));
}

#[tokio::test]
async fn test_find_cheap_available_number_probes_in_order() {
    let mock_server = MockServer::start().await;

    let [first, second, third, fourth] = Country::ALL;
    for country in [first, second] {
        Mock::given(method("POST"))
            .and(query_param("action", "getNumbersStatus"))
            .and(query_param("country", country.code().to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ds_0": 0})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("POST"))
        .and(query_param("action", "getNumbersStatus"))
        .and(query_param("country", third.code().to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ds_0": 7})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumbersStatus"))
        .and(query_param("country", fourth.code().to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ds_0": 9})))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumber"))
        .and(query_param("service", "ds"))
        .and(query_param("country", third.code().to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("ACCESS_NUMBER:31337:+77011234567"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let number = client
        .find_cheap_available_number(&Service::Discord)
        .await
        .unwrap()
        .expect("third country has numbers");
    assert_eq!(number.id.as_ref(), "31337");

    let countries: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "country")
                .map(|(_, value)| value.into_owned())
        })
        .collect();
    let expected: Vec<String> = [first, second, third, third]
        .iter()
        .map(|c| c.code().to_string())
        .collect();
    assert_eq!(countries, expected);
}

#[tokio::test]
async fn test_find_cheap_available_number_none_available() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumbersStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ds_0": 0})))
        .expect(Country::ALL.len() as u64)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(query_param("action", "getNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ACCESS_NUMBER:1:1"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let number = client
        .find_cheap_available_number(&Service::Discord)
        .await
        .unwrap();
    assert!(number.is_none());
}

#[tokio::test]
async fn test_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    assert!(matches!(
        client.get_balance().await,
        Err(SmsActivateError::HttpStatus { status: 502 })
    ));
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("ACCESS_BALANCE:1.00")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = SmsActivateClient::builder("test_key")
        .endpoint(Url::parse(&mock_server.uri()).unwrap())
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    assert!(matches!(
        client.get_balance().await,
        Err(SmsActivateError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_cancellation_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("STATUS_WAIT_CODE")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let client = SmsActivateClient::builder("test_key")
        .endpoint(Url::parse(&mock_server.uri()).unwrap())
        .cancellation_token(token.clone())
        .build()
        .unwrap();

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let result = client
        .get_activation_code(&ActivationId::from("42"))
        .await;
    assert!(matches!(result, Err(SmsActivateError::Cancelled)));

    canceller.await.unwrap();
}
