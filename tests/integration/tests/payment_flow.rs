//! Integration test: a payment from init to refund against a mock gateway.

use cardgate_client::{HttpMethod, PaymentInit};
use cardgate_core::{
    canonical_string, CardProvider, CartItem, Customer, CustomerAccount, ExtensionKind, Payload,
    PaymentStatus, ResultCode, Value,
};
use cardgate_crypto::{testing, verify_encoded};
use cardgate_integration_tests::{
    client_for, gateway_signed, masked_card_extension, status_body, DTTM, MERCHANT_ID,
};
use wiremock::{
    matchers::{header, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

fn api_base(server: &MockServer) -> String {
    format!("{}/api/v1.9/", server.uri())
}

fn request_json(request: &wiremock::Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}

#[tokio::test]
async fn test_echo_post_and_get() {
    let server = MockServer::start().await;
    let body = gateway_signed([
        ("dttm", Value::from(DTTM)),
        ("resultCode", 0.into()),
        ("resultMessage", "OK".into()),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/v1.9/echo"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1\.9/echo/M1MIPS0000/20240101120000/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = client_for(&api_base(&server));
    let posted = client.echo(HttpMethod::Post).await.unwrap();
    assert_eq!(posted.result_code(), Some(ResultCode::Ok));
    let fetched = client.echo(HttpMethod::Get).await.unwrap();
    assert_eq!(fetched.result_message(), Some("OK"));
}

#[tokio::test]
async fn test_payment_init_sends_ordered_signed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.9/payment/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pay-1", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&api_base(&server));
    let request = PaymentInit::new("5547", 12345, "https://shop.example/return", "Order 5547")
        .cart(vec![
            CartItem::new("Order in shop XYZ", 5, 12345),
            CartItem::new("Postage", 1, 0),
        ])
        .customer(
            Customer::new("Jan Novák")
                .email("jan.novak@example.com")
                .mobile_phone("+420.800300300"),
        );
    let response = client.payment_init(&request).await.unwrap();
    assert_eq!(response.pay_id(), Some("pay-1"));
    assert_eq!(response.payment_status(), Some(PaymentStatus::Initiated));

    let received = server.received_requests().await.unwrap();
    let body = request_json(&received[0]);
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "merchantId",
            "orderNo",
            "dttm",
            "payOperation",
            "payMethod",
            "totalAmount",
            "currency",
            "closePayment",
            "returnUrl",
            "returnMethod",
            "cart",
            "customer",
            "language",
            "ttlSec",
            "signature",
        ]
    );
    assert_eq!(body["merchantId"], MERCHANT_ID);
    assert_eq!(body["cart"][1]["amount"], 0);
    assert_eq!(body["customer"]["mobilePhone"], "+420.800300300");
}

#[tokio::test]
async fn test_sent_payment_init_body_verifies_with_merchant_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.9/payment/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pay-1", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentInit::new("1", 100, "https://s/r", "Žluťoučký")
        .cart(vec![
            CartItem::new("Žluťoučký", 1, 100),
            CartItem::new("Post", 1, 0).with_description("DPL"),
        ])
        .customer(Customer::new("Jan Novák").email("a@b.cz").account(CustomerAccount {
            created_at: Some("2022".into()),
            changed_at: None,
        }))
        .close_payment(false);
    client_for(&api_base(&server)).payment_init(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let mut body = request_json(&received[0]);
    let signature = body
        .as_object_mut()
        .and_then(|fields| fields.remove("signature"))
        .and_then(|signature| signature.as_str().map(str::to_owned))
        .expect("body carries a signature");
    let payload = Payload::try_from(body.clone()).unwrap();

    assert_eq!(
        canonical_string(&payload),
        "M1MIPS0000|1|20240101120000|payment|card|100|CZK|false|https://s/r|POST|\
         Žluťoučký|1|100|Post|1|0|DPL|Jan Novák|a@b.cz|2022|cs|600"
    );
    assert!(verify_encoded(&payload, &signature, &testing::merchant_public_key()));

    body["closePayment"] = serde_json::json!(true);
    let tampered = Payload::try_from(body).unwrap();
    assert!(!verify_encoded(&tampered, &signature, &testing::merchant_public_key()));
}

#[tokio::test]
async fn test_status_with_masked_card_extension() {
    let server = MockServer::start().await;
    let mut body = status_body("pay-1", 4);
    body["extensions"] = serde_json::json!([
        masked_card_extension("maskClnRP", "424242******4242"),
        {"extension": "trxDates", "createdDate": "2024-01-01"},
    ]);

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1\.9/payment/status/M1MIPS0000/pay-1/20240101120000/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let response = client_for(&api_base(&server)).payment_status("pay-1").await.unwrap();
    assert_eq!(response.payment_status(), Some(PaymentStatus::Confirmed));

    let extensions = response.extensions();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].kind(), ExtensionKind::MaskClnRp);
    assert_eq!(extensions[0].masked_cln(), Some("****4242"));
    assert_eq!(extensions[0].card_provider(), Some(CardProvider::Visa));

    let printed = serde_json::to_value(&response).unwrap();
    assert_eq!(printed["extensions"][0]["expiration"], "12/30");
}

#[tokio::test]
async fn test_close_then_refund_partial() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1.9/payment/close"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pay-1", 7)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1.9/payment/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pay-1", 10)))
        .mount(&server)
        .await;

    let client = client_for(&api_base(&server));
    let closed = client.payment_close("pay-1", None).await.unwrap();
    assert_eq!(closed.payment_status(), Some(PaymentStatus::WaitingForSettlement));
    let refunded = client.payment_refund("pay-1", Some(500)).await.unwrap();
    assert_eq!(refunded.payment_status(), Some(PaymentStatus::Returned));

    let received = server.received_requests().await.unwrap();
    let close_body = request_json(&received[0]);
    assert!(close_body.get("totalAmount").is_none());
    let refund_body = request_json(&received[1]);
    assert_eq!(refund_body["amount"], 500);
}

#[tokio::test]
async fn test_process_url_points_at_gateway_without_calling_it() {
    let server = MockServer::start().await;
    let client = client_for(&api_base(&server));
    let url = client.payment_process_url("pay-1").unwrap();
    assert!(url.starts_with(&format!(
        "{}/api/v1.9/payment/process/M1MIPS0000/pay-1/20240101120000/",
        server.uri()
    )));
    assert!(server.received_requests().await.unwrap().is_empty());
}
