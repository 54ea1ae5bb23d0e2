use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use super::fakes::{post_contact, CannedWebhook};
use crate::contact::SheetWebhook;

fn contact_json(name: &str, phone: &str, message: &str) -> test::TestRequest {
    test::TestRequest::post().set_json(json!({"Name": name, "Phone": phone, "Message": message}))
}

#[actix_web::test]
async fn test_missing_fields_never_reach_webhook() {
    let webhook = CannedWebhook::new(200, r#"{"result":"success"}"#);
    let (status, body) = post_contact(webhook.clone(), contact_json("", "9999999999", "hi")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "All fields are required"}));
    assert_eq!(webhook.call_count(), 0);
}

#[actix_web::test]
async fn test_absent_field_is_missing() {
    let webhook = CannedWebhook::new(200, r#"{"result":"success"}"#);
    let req = test::TestRequest::post().set_json(json!({"Name": "Asha", "Phone": "9999999999"}));
    let (status, _) = post_contact(webhook.clone(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(webhook.call_count(), 0);
}

#[actix_web::test]
async fn test_successful_submission() {
    let webhook = CannedWebhook::new(200, r#"{"result":"success","row":12}"#);
    let (status, body) = post_contact(webhook.clone(), contact_json("Asha", "9999999999", "Need a bulk quote")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Form submitted successfully",
            "data": {"result": "success", "row": 12}
        })
    );
    assert_eq!(webhook.call_count(), 1);

    let fields = webhook.last_fields.lock().unwrap().clone();
    assert_eq!(
        fields,
        vec![
            ("Name".to_string(), "Asha".to_string()),
            ("Phone".to_string(), "9999999999".to_string()),
            ("Message".to_string(), "Need a bulk quote".to_string()),
        ]
    );
}

#[actix_web::test]
async fn test_upstream_error_status() {
    let webhook = CannedWebhook::new(500, "script crashed");
    let (status, body) = post_contact(webhook.clone(), contact_json("Asha", "1", "hi")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"success": false, "error": "Failed to submit to Google Sheets"}));
    assert_eq!(webhook.call_count(), 1);
}

#[actix_web::test]
async fn test_transport_failure_is_internal_error() {
    // the request never leaves the client: the url does not parse
    let webhook = Arc::new(SheetWebhook::new("not a url"));
    let (status, body) = post_contact(webhook, contact_json("Asha", "1", "hi")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Internal Server Error"}));
}

#[actix_web::test]
async fn test_rejected_by_sheet() {
    let webhook = CannedWebhook::new(200, r#"{"result":"fail","message":"quota exceeded"}"#);
    let (status, body) = post_contact(webhook, contact_json("Asha", "1", "hi")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "quota exceeded");
    assert_eq!(body["data"]["result"], "fail");
}

#[actix_web::test]
async fn test_rejected_without_message_uses_fallback() {
    let webhook = CannedWebhook::new(200, r#"{"result":"error"}"#);
    let (status, body) = post_contact(webhook, contact_json("Asha", "1", "hi")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unknown error from sheet script");
}

#[actix_web::test]
async fn test_non_json_reply_is_internal_error() {
    let webhook = CannedWebhook::new(200, "<html>moved</html>");
    let (status, body) = post_contact(webhook, contact_json("Asha", "1", "hi")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Internal Server Error"}));
}

#[actix_web::test]
async fn test_malformed_body_is_internal_error() {
    let webhook = CannedWebhook::new(200, r#"{"result":"success"}"#);
    let req = test::TestRequest::post()
        .insert_header(ContentType::json())
        .set_payload("{oops");
    let (status, body) = post_contact(webhook.clone(), req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Internal Server Error"}));
    assert_eq!(webhook.call_count(), 0);
}
