//! HTTP behavior of the ARI client against a mock ACME server.

use ari_client::{AriClient, AriError};
use ari_core::CertificateIdentifier;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cert_id() -> CertificateIdentifier {
    CertificateIdentifier::from_parts(&[0xaa, 0xbb, 0xcc], &[0x80, 0x01])
}

async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newNonce": format!("{}/nonce", server.uri()),
            "newOrder": format!("{}/order", server.uri()),
            "renewalInfo": format!("{}/renewal-info", server.uri()),
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn discovers_renewal_info_endpoint() {
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let client = AriClient::new().unwrap();
    let url = client
        .directory()
        .renewal_info_url(&format!("{}/directory", server.uri()))
        .await
        .unwrap();

    assert_eq!(url, format!("{}/renewal-info", server.uri()));
}

#[tokio::test]
async fn directory_without_renewal_info_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newOrder": "https://ca.example/order"
        })))
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    let err = client
        .directory()
        .renewal_info_url(&format!("{}/directory", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AriError::MissingRenewalInfo { .. }), "{err}");
}

#[tokio::test]
async fn directory_server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    let err = client
        .directory()
        .fetch(&format!("{}/directory", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn looks_up_renewal_info_by_identifier() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/renewal-info/{}", cert_id())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestedWindow": {
                "start": "2025-01-02T04:00:00Z",
                "end": "2025-01-03T04:00:00.000000001Z"
            },
            "explanationURL": "https://ca.example/why"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    let info = client
        .renewal_info()
        .lookup(&format!("{}/directory", server.uri()), &cert_id())
        .await
        .unwrap();

    assert_eq!(info.explanation_url.as_deref(), Some("https://ca.example/why"));
    let window = info.window().unwrap();
    assert_eq!(window.duration(), chrono::Duration::days(1));
}

#[tokio::test]
async fn unknown_certificate_is_not_found() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/renewal-info/{}", cert_id())))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    let err = client
        .renewal_info()
        .lookup(&format!("{}/directory", server.uri()), &cert_id())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/renewal-info/{}", cert_id())))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"suggestedWindow\": 3}"))
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    let err = client
        .renewal_info()
        .lookup(&format!("{}/directory", server.uri()), &cert_id())
        .await
        .unwrap_err();

    assert!(matches!(err, AriError::Json(_)), "{err}");
}

#[tokio::test]
async fn sends_product_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directory"))
        .and(header_regex("user-agent", r"^ari-check/\d+\.\d+\.\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AriClient::new().unwrap();
    client
        .directory()
        .fetch(&format!("{}/directory", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = AriClient::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client
        .directory()
        .fetch(&format!("{}/directory", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AriError::Timeout(_)), "{err}");
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = AriClient::new().unwrap();
    let err = client
        .directory()
        .fetch(&format!("http://{addr}/directory"))
        .await
        .unwrap_err();

    assert!(matches!(err, AriError::Connection(_)), "{err}");
}

#[tokio::test]
async fn invalid_url_is_rejected_before_sending() {
    let client = AriClient::new().unwrap();
    let err = client.directory().fetch("not a url").await.unwrap_err();
    assert!(matches!(err, AriError::InvalidUrl(_)), "{err}");
}
