use std::sync::Arc;

use axum::http::{StatusCode, header};
use mclears::routes::contact::ALREADY_SENT_NOTICE;
use tokio::sync::Notify;

mod helpers;

use helpers::{
    PHONE, RecordingDelivery, app, app_with, bob, body_json, body_text, form, get, jane,
    open_session, send, session_cookie, state_of, wait_for_state,
};

#[tokio::test]
async fn test_contact_page_does_not_open_session() {
    let app = app(false);

    let response = send(&app, get("/contact", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let response = send(&app, get("/contact", Some("inquiry_session=forged"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = body_text(response).await;
    assert!(body.contains("Send Us a Message"));
    assert!(body.contains("Select an option..."));
    assert!(body.contains("Lakefront 3-4 Bedroom Cottage"));
    assert!(body.contains(PHONE));
}

#[tokio::test]
async fn test_valid_inquiry_shows_success_panel() {
    let app = app(false);

    let response = send(&app, form("/contact", None, &jane())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let body = body_text(response).await;
    assert!(body.contains("Message Sent!"));
    assert!(body.contains("Send Another Message"));

    let status = body_json(send(&app, get("/contact/status", Some(&cookie))).await).await;
    assert_eq!(status["state"], "submitted");
    assert!(status["message"].is_null());
}

#[tokio::test]
async fn test_invalid_email_keeps_draft_and_prompts() {
    let app = app(false);
    let mut input = jane();
    input[1] = ("email", "abc");

    let response = send(&app, form("/contact", None, &input)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let cookie = session_cookie(&response);

    let body = body_text(response).await;
    assert!(body.contains("Please enter a valid email address."));
    assert!(body.contains(r#"value="Jane""#));
    assert!(body.contains(r#"value="abc""#));
    assert!(!body.contains("Message Sent!"));

    let status = body_json(send(&app, get("/contact/status", Some(&cookie))).await).await;
    assert_eq!(status["state"], "idle");
}

#[tokio::test]
async fn test_missing_required_field_prompts() {
    let app = app(false);
    let mut input = jane();
    input[5] = ("message", "   ");

    let response = send(&app, form("/contact", None, &input)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await;
    assert!(body.contains("Please fill in all required fields."));
}

#[tokio::test]
async fn test_delivery_failure_shows_banner_with_phone() {
    let app = app(true);

    let response = send(&app, form("/contact", None, &jane())).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let cookie = session_cookie(&response);

    let body = body_text(response).await;
    assert!(body.contains(&format!("call us directly at {PHONE}")));
    assert!(body.contains("Do you have hookups?"));

    let status = body_json(send(&app, get("/contact/status", Some(&cookie))).await).await;
    assert_eq!(status["state"], "failed");
    assert!(status["message"].as_str().unwrap().contains(PHONE));
}

#[tokio::test]
async fn test_reset_after_success_starts_fresh() {
    let app = app(false);

    let response = send(&app, form("/contact", None, &jane())).await;
    let cookie = session_cookie(&response);

    let no_fields: Vec<(&str, &str)> = Vec::new();
    let response = send(&app, form("/contact/reset", Some(&cookie), &no_fields)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/contact");

    let status = body_json(send(&app, get("/contact/status", Some(&cookie))).await).await;
    assert_eq!(status["state"], "idle");

    let body = body_text(send(&app, get("/contact", Some(&cookie))).await).await;
    assert!(!body.contains("Message Sent!"));
    assert!(!body.contains(r#"value="Jane""#));
}

#[tokio::test]
async fn test_field_endpoint_reports_inline_error() {
    let app = app(false);

    let response = send(
        &app,
        form("/contact/field", None, &[("field", "email"), ("value", "a@b")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let json = body_json(response).await;
    assert_eq!(json["field"], "email");
    assert_eq!(json["error"], "Please enter a valid email address.");

    let response = send(
        &app,
        form(
            "/contact/field",
            Some(&cookie),
            &[("field", "email"), ("value", "a@b.com")],
        ),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["error"].is_null());

    let body = body_text(send(&app, get("/contact", Some(&cookie))).await).await;
    assert!(body.contains(r#"value="a@b.com""#));
}

#[tokio::test]
async fn test_field_endpoint_rejects_unknown_field() {
    let app = app(false);

    let response = send(
        &app,
        form("/contact/field", None, &[("field", "subject"), ("value", "x")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_without_session_is_idle() {
    let app = app(false);

    let status = body_json(send(&app, get("/contact/status", None)).await).await;

    assert_eq!(status["state"], "idle");
}

#[tokio::test]
async fn test_health() {
    let app = app(false);

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json.get("sessions").is_none());
}

#[tokio::test]
async fn test_post_after_success_is_refused_and_not_kept() {
    let delivery = Arc::new(RecordingDelivery::default());
    let app = app_with(delivery.clone());

    let response = send(&app, form("/contact", None, &jane())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let response = send(&app, form("/contact", Some(&cookie), &bob())).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_text(response).await;
    assert!(body.contains(ALREADY_SENT_NOTICE));
    assert!(body.contains("Send Another Message"));
    assert!(!body.contains("Second inquiry"));

    assert_eq!(delivery.calls(), 1);
    assert_eq!(delivery.received()[0].name, "Jane");

    let no_fields: Vec<(&str, &str)> = Vec::new();
    send(&app, form("/contact/reset", Some(&cookie), &no_fields)).await;

    let body = body_text(send(&app, get("/contact", Some(&cookie))).await).await;
    assert!(!body.contains(r#"value="Bob""#));
    assert!(!body.contains("Second inquiry"));
}

#[tokio::test]
async fn test_reset_while_sending_is_refused() {
    let gate = Arc::new(Notify::new());
    let delivery = Arc::new(RecordingDelivery::gated(gate.clone()));
    let app = app_with(delivery.clone());
    let cookie = open_session(&app).await;

    let sending = tokio::spawn({
        let app = app.clone();
        let request = form("/contact", Some(&cookie), &jane());
        async move { send(&app, request).await }
    });
    wait_for_state(&app, &cookie, "submitting").await;

    let no_fields: Vec<(&str, &str)> = Vec::new();
    let response = send(&app, form("/contact/reset", Some(&cookie), &no_fields)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_text(response).await.contains("Sending..."));
    assert_eq!(state_of(&app, &cookie).await, "submitting");

    gate.notify_one();
    let response = sending.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Message Sent!"));
    assert_eq!(delivery.calls(), 1);
}

#[tokio::test]
async fn test_post_while_sending_is_ignored_and_attempt_is_kept() {
    let gate = Arc::new(Notify::new());
    let delivery = Arc::new(RecordingDelivery {
        fail_with: Some("mailbox unavailable".to_owned()),
        ..RecordingDelivery::gated(gate.clone())
    });
    let app = app_with(delivery.clone());
    let cookie = open_session(&app).await;

    let sending = tokio::spawn({
        let app = app.clone();
        let request = form("/contact", Some(&cookie), &jane());
        async move { send(&app, request).await }
    });
    wait_for_state(&app, &cookie, "submitting").await;

    let response = send(&app, form("/contact", Some(&cookie), &bob())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Sending..."));
    assert!(!body.contains("Second inquiry"));

    let response = send(
        &app,
        form(
            "/contact/field",
            Some(&cookie),
            &[("field", "message"), ("value", "Second inquiry")],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    gate.notify_one();
    let response = sending.await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(delivery.calls(), 1);

    let body = body_text(send(&app, get("/contact", Some(&cookie))).await).await;
    assert!(body.contains(r#"value="Jane""#));
    assert!(body.contains("Do you have hookups?"));
    assert!(!body.contains("Second inquiry"));
    assert!(body.contains(&format!("call us directly at {PHONE}")));
}
