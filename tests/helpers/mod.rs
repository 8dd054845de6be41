//! Shared router setup for HTTP-level tests.

#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use mclears::Config;
use mclears_inquiry::{Deliver, InquiryDraft};
use mclears_notification::SimulatedDelivery;
use tokio::sync::Notify;
use tower::ServiceExt;

pub const PHONE: &str = "(315) 375-6508";

pub fn config() -> Config {
    Config::load(None).expect("default config loads")
}

pub fn app(fail: bool) -> Router {
    app_with(Arc::new(SimulatedDelivery {
        delay: Duration::from_millis(1),
        fail,
    }))
}

pub fn app_with(delivery: Arc<dyn Deliver>) -> Router {
    mclears::create_app(config(), delivery)
}

/// Counts and records deliveries; optionally holds each one until released.
#[derive(Default)]
pub struct RecordingDelivery {
    pub calls: AtomicUsize,
    pub received: Mutex<Vec<InquiryDraft>>,
    pub fail_with: Option<String>,
    pub gate: Option<Arc<Notify>>,
}

impl RecordingDelivery {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<InquiryDraft> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Deliver for RecordingDelivery {
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(draft.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.fail_with {
            Some(reason) => anyhow::bail!("{reason}"),
            None => Ok(()),
        }
    }
}

pub fn form<T: serde::Serialize>(uri: &str, cookie: Option<&str>, body: &T) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    request
        .body(Body::from(serde_urlencoded::to_string(body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().uri(uri);

    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    request.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Opens a session through the inline field check and returns its cookie.
pub async fn open_session(app: &Router) -> String {
    let response = send(
        app,
        form("/contact/field", None, &[("field", "name"), ("value", "")]),
    )
    .await;

    session_cookie(&response)
}

pub async fn state_of(app: &Router, cookie: &str) -> String {
    let status = body_json(send(app, get("/contact/status", Some(cookie))).await).await;

    status["state"].as_str().unwrap().to_owned()
}

pub async fn wait_for_state(app: &Router, cookie: &str, state: &str) {
    for _ in 0..400 {
        if state_of(app, cookie).await == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    panic!("session never reached {state}");
}

/// `name=value` part of the session cookie set by the response.
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_owned()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap()
}

pub fn jane() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Jane"),
        ("email", "jane@example.com"),
        ("phone", ""),
        ("preferred_dates", "July 4-11"),
        ("accommodation", "RV Site"),
        ("message", "Do you have hookups?"),
    ]
}

pub fn bob() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Bob"),
        ("email", "bob@example.com"),
        ("message", "Second inquiry"),
    ]
}
