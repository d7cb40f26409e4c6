use axum::{http::{header, Method}, middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, BookingConfig, ConfigError, EmailConfig, RateLimitConfig};
use crate::middlewares::rate_limit_middleware::{rate_limit, InMemoryRateLimiter, RateLimiter};
use crate::router::booking_router::booking_router;
use crate::router::contact_router::contact_router;
use crate::service::booking_desk::BookingDesk;
use crate::service::booking_service::BookingEstimator;
use crate::service::contact_service::ContactRelay;
use crate::service::newsletter_service::NewsletterService;
use crate::util::email::{EmailError, MailTransport, SmtpEmailService};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Email service error: {0}")]
    Email(#[from] EmailError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub booking: Arc<BookingEstimator>,
    pub contact: Arc<ContactRelay>,
    pub newsletter: Arc<NewsletterService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    confirmation_display: Duration,
}

impl AppServices {
    pub fn new(
        booking_config: &BookingConfig,
        rate_limit_config: RateLimitConfig,
        transport: Arc<dyn MailTransport>,
        notify_email: String,
    ) -> Self {
        AppServices {
            booking: Arc::new(BookingEstimator::from_config(booking_config)),
            contact: Arc::new(ContactRelay::new(transport, notify_email)),
            newsletter: Arc::new(NewsletterService),
            rate_limiter: Arc::new(InMemoryRateLimiter::new(rate_limit_config)),
            confirmation_display: booking_config.confirmation_display,
        }
    }

    /// A fresh booking form session sharing the configured estimator.
    pub fn booking_desk(&self) -> BookingDesk {
        BookingDesk::new(self.booking.clone(), self.confirmation_display)
    }
}

pub fn create_router(services: AppServices) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(contact_router(services.contact, services.newsletter))
        .merge(booking_router(services.booking))
        .layer(middleware::from_fn_with_state(services.rate_limiter, rate_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    /// Loads every config from the environment and wires the SMTP relay.
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let email_config = EmailConfig::from_env()?;
        let booking_config = BookingConfig::from_env()?;
        let rate_limit_config = RateLimitConfig::from_env()?;

        let notify_email = email_config.notify_email.clone();
        let transport = Arc::new(SmtpEmailService::new(email_config)?) as Arc<dyn MailTransport>;
        let services = AppServices::new(&booking_config, rate_limit_config, transport, notify_email);

        Ok(App::with_services(config, services))
    }

    pub fn with_services(config: AppConfig, services: AppServices) -> Self {
        App { config, router: create_router(services) }
    }

    pub async fn start(self) -> Result<(), AppError> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr()).await?;
        info!("🚀 Contact server running at http://{}", listener.local_addr()?);
        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    }
}
