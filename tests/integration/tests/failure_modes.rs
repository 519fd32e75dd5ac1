//! Integration test: how gateway and network failures surface to callers.

use cardgate_client::GatewayError;
use cardgate_crypto::testing;
use cardgate_integration_tests::{client_for, masked_card_extension, status_body};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

async fn gateway_answering(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/payment/status/.*"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_server_error_is_http_status() {
    let server = gateway_answering(ResponseTemplate::new(500).set_body_string("boom")).await;
    let err = client_for(&server.uri()).payment_status("pay-1").await.unwrap_err();
    assert!(err.is_transport());
    match err {
        GatewayError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_html_body_is_decode_error() {
    let server = gateway_answering(
        ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"),
    )
    .await;
    let err = client_for(&server.uri()).payment_status("pay-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_tampered_status_is_verification_error() {
    let mut body = status_body("pay-1", 4);
    body["paymentStatus"] = serde_json::json!(8);
    let server = gateway_answering(ResponseTemplate::new(200).set_body_json(body)).await;
    let err = client_for(&server.uri()).payment_status("pay-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Verification(_)));
}

#[tokio::test]
async fn test_bad_extension_rejects_whole_response() {
    let mut extension = masked_card_extension("maskCln", "424242******4242");
    extension["maskedCln"] = serde_json::json!("****0000");
    let mut body = status_body("pay-1", 4);
    body["extensions"] = serde_json::json!([extension]);

    let server = gateway_answering(ResponseTemplate::new(200).set_body_json(body)).await;
    let err = client_for(&server.uri()).payment_status("pay-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Verification(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(&base).payment_status("pay-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[test]
fn test_gateway_return_roundtrip() {
    let client = client_for("http://127.0.0.1:1");
    let verified = client
        .gateway_return([
            ("resultCode", "0"),
            ("paymentStatus", "1"),
            ("signature", testing::RETURN_SIGNATURE),
        ])
        .unwrap();
    assert_eq!(verified.get("resultCode"), Some(&cardgate_core::Value::Int(0)));
}
