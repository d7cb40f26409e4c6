#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::{to_bytes, Body}, extract::ConnectInfo, http::{Request, StatusCode}, Router};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tarasha_backend::app::app::{create_router, AppServices};
use tarasha_backend::config::{BookingConfig, RateLimitConfig};
use tarasha_backend::util::email::{EmailError, EmailMessage, MailTransport};
use tower::ServiceExt;

pub const NOTIFY_EMAIL: &str = "frontdesk@example.com";

/// Records every message it is asked to send, optionally failing each time.
#[derive(Clone, Default)]
pub struct MockMailTransport {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub attempts: Arc<Mutex<usize>>,
    pub fail: bool,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(EmailError::SmtpError("535 5.7.8 Authentication credentials invalid".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn setup_app_with(transport: MockMailTransport, rate_limit: RateLimitConfig) -> Router {
    init_tracing();
    let services = AppServices::new(
        &BookingConfig::from_test_env(),
        rate_limit,
        Arc::new(transport),
        NOTIFY_EMAIL.to_string(),
    );
    create_router(services)
}

pub fn setup_app(transport: MockMailTransport) -> Router {
    setup_app_with(transport, RateLimitConfig::default())
}

pub fn client_addr(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([203, 0, 113, last_octet], 40000))
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .extension(ConnectInfo(client_addr(1)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .extension(ConnectInfo(client_addr(1)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_from(uri: &str, addr: SocketAddr) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .extension(ConnectInfo(addr))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body_bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn quick_rate_limit(max_requests: u32) -> RateLimitConfig {
    RateLimitConfig { window: Duration::from_secs(60), max_requests }
}
