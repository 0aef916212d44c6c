//! End-to-end lookups through `HttpTransport` against wiremock-backed providers.

use std::{sync::Arc, time::Duration};

use hedged_cep_client::{
    ErrorKind, HedgedCepClient, HttpTransport, ProviderConfig, ProviderKind, RaceConfig,
    RaceError, RequestSpec, Transport, TransportError,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CEP: &str = "29330000";

const BRASIL_API_BODY: &str = r#"{
    "cep": "29330000",
    "state": "ES",
    "city": "Muqui",
    "neighborhood": "",
    "street": "",
    "service": "open-cep"
}"#;

const VIA_CEP_BODY: &str = r#"{
    "cep": "29330-000",
    "logradouro": "",
    "complemento": "",
    "bairro": "",
    "localidade": "Muqui",
    "uf": "ES",
    "ibge": "3203809",
    "gia": "",
    "ddd": "28",
    "siafi": "5687"
}"#;

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "application/json")
}

fn client(server: &MockServer, timeout: Duration) -> HedgedCepClient {
    let providers = vec![
        ProviderConfig::with_base_url(ProviderKind::BrasilApi, server.uri()),
        ProviderConfig::with_base_url(ProviderKind::ViaCep, server.uri()),
    ];
    let cfg = RaceConfig::default().with_timeout(timeout);
    HedgedCepClient::new(providers, cfg).expect("failed to build client")
}

#[tokio::test]
async fn fastest_http_provider_wins() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/api/cep/v1/29330000",
        json(BRASIL_API_BODY).set_delay(Duration::from_millis(400)),
    )
    .await;
    mount(&server, "/ws/29330000/json/", json(VIA_CEP_BODY)).await;

    let (provider, address) = client(&server, Duration::from_secs(2))
        .lookup_address(CEP)
        .await
        .expect("lookup should succeed");

    assert_eq!(provider, ProviderKind::ViaCep.id());
    assert_eq!(address.postal_code(), CEP);
    assert_eq!(address.region(), "ES");
    assert_eq!(address.city(), "Muqui");
}

#[tokio::test]
async fn hyphenated_key_reaches_providers_normalized() {
    let server = MockServer::start().await;
    mount(&server, "/api/cep/v1/29330000", json(BRASIL_API_BODY)).await;
    mount(&server, "/ws/29330000/json/", json(VIA_CEP_BODY)).await;

    let address = client(&server, Duration::from_secs(2))
        .lookup_address_any("29330-000")
        .await
        .expect("lookup should succeed");

    assert_eq!(address.city(), "Muqui");
}

#[tokio::test]
async fn server_error_and_bad_json_are_both_reported() {
    let server = MockServer::start().await;
    mount(&server, "/api/cep/v1/29330000", ResponseTemplate::new(500)).await;
    mount(&server, "/ws/29330000/json/", json("{\"cep\": \"29330")).await;

    let result = client(&server, Duration::from_secs(2)).lookup(CEP).await;

    assert!(!result.timed_out);
    assert_eq!(result.failures.len(), 2);
    for failure in &result.failures {
        let expected = if failure.provider == Some(ProviderKind::BrasilApi.id()) {
            ErrorKind::Transport
        } else {
            ErrorKind::Normalization
        };
        assert_eq!(failure.kind(), expected, "{failure:?}");
    }
}

#[tokio::test]
async fn slow_providers_time_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/api/cep/v1/29330000",
        json(BRASIL_API_BODY).set_delay(Duration::from_secs(2)),
    )
    .await;
    mount(
        &server,
        "/ws/29330000/json/",
        json(VIA_CEP_BODY).set_delay(Duration::from_secs(2)),
    )
    .await;

    let start = std::time::Instant::now();
    let err = client(&server, Duration::from_millis(300))
        .lookup_address(CEP)
        .await
        .unwrap_err();

    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(matches!(err, RaceError::Timeout { .. }), "{err:?}");
}

#[tokio::test]
async fn invalid_key_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(json(BRASIL_API_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_secs(1))
        .lookup_address("00000000")
        .await
        .unwrap_err();

    assert!(matches!(err, RaceError::InvalidKey(_)), "{err:?}");
}

#[tokio::test]
async fn transport_passes_non_success_status_through() {
    let server = MockServer::start().await;
    mount(&server, "/missing", ResponseTemplate::new(404).set_body_string("nope")).await;

    let transport = HttpTransport::new().unwrap();
    let request = RequestSpec {
        provider: ProviderKind::BrasilApi.id(),
        url: format!("{}/missing", server.uri()),
    };
    let response = transport
        .send(&request, &CancellationToken::new())
        .await
        .expect("status codes are not transport errors");

    assert_eq!(response.status, 404);
    assert_eq!(&response.body[..], b"nope");
}

#[tokio::test]
async fn cancelling_aborts_an_in_flight_request() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/slow",
        json(BRASIL_API_BODY).set_delay(Duration::from_secs(5)),
    )
    .await;

    let transport = Arc::new(HttpTransport::new().unwrap());
    let cancel = CancellationToken::new();
    let request = RequestSpec {
        provider: ProviderKind::BrasilApi.id(),
        url: format!("{}/slow", server.uri()),
    };

    let pending = {
        let transport = transport.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { transport.send(&request, &cancel).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let res = tokio::time::timeout(Duration::from_secs(1), pending)
        .await
        .expect("send should stop promptly")
        .unwrap();
    assert_eq!(res, Err(TransportError::Cancelled));
}

#[tokio::test]
async fn unreachable_provider_is_a_connection_failure() {
    let providers = vec![ProviderConfig::with_base_url(
        ProviderKind::AwesomeApi,
        "http://127.0.0.1:1",
    )];
    let client = HedgedCepClient::new(providers, RaceConfig::default()).unwrap();

    let result = client.lookup(CEP).await;

    assert_eq!(result.failures.len(), 1);
    assert!(
        matches!(
            &result.failures[0].error,
            hedged_cep_client::LookupError::Transport(TransportError::Connection(_))
        ),
        "{:?}",
        result.failures[0]
    );
}
