//! `TelegramDelivery` against a local mock of the Bot API.
#![cfg(feature = "telegram")]

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kirana_common::config::TelegramConfig;
use kirana_common::delivery::{deliver_receipt, ReceiptDelivery, TelegramDelivery};
use kirana_common::error::DeliveryError;
use kirana_common::notice::Notice;
use kirana_common::receipt::ReceiptDocument;

fn document() -> ReceiptDocument {
    ReceiptDocument {
        file_name: "Order_1741946400000.pdf".into(),
        caption: "🧾 New Order Receipt\nCustomer: Sunita".into(),
        mime_type: "application/pdf",
        body: b"%PDF-1.3\nTotal Items: 3\n%%EOF".to_vec(),
    }
}

fn delivery(server: &MockServer) -> TelegramDelivery {
    let mut config = TelegramConfig::new("123:abc", "42");
    config.api_base = server.uri();
    TelegramDelivery::new(config)
}

#[tokio::test]
async fn posts_document_to_send_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendDocument"))
        .and(body_string_contains("Order_1741946400000.pdf"))
        .and(body_string_contains("application/pdf"))
        .and(body_string_contains("Total Items: 3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = delivery(&server).deliver(&document()).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn api_rejection_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendDocument"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"ok": false, "description": "Bad Request: chat not found"}),
        ))
        .mount(&server)
        .await;

    let result = delivery(&server).deliver(&document()).await;
    match result {
        Err(DeliveryError::Rejected(description)) => {
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }

    let notice = deliver_receipt(&delivery(&server), &document()).await;
    assert_eq!(notice, Notice::OrderConfirmed { delivered: false });
}

#[tokio::test]
async fn non_json_reply_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = delivery(&server).deliver(&document()).await;
    assert!(matches!(result, Err(DeliveryError::Http(_))), "got: {result:?}");
}

#[tokio::test]
async fn placeholder_credentials_skip_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = TelegramConfig::new("YOUR_BOT_TOKEN", "YOUR_CHAT_ID");
    config.api_base = server.uri();
    let result = TelegramDelivery::new(config).deliver(&document()).await;
    assert!(matches!(result, Err(DeliveryError::NotConfigured)));
}
