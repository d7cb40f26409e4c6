use axum::{response::{IntoResponse, Response}, http::StatusCode, Json};
use serde::Serialize;

use crate::service::booking_service::BookingError;
use crate::service::contact_service::ContactError;
use crate::service::newsletter_service::NewsletterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    Validation,
    BadRequest,
    Conflict,
    TooManyRequests,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::TooManyRequests => "TooManyRequests",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by every handler. The message is shown to the caller
/// verbatim, so it must never carry internal details.
#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn new(error: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError { error, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError::new(HandlerErrorKind::BadRequest, message)
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody { ok: false, error: self.message });
        (self.error.status(), body).into_response()
    }
}

impl From<BookingError> for HandlerError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SubmissionInProgress => HandlerError::new(HandlerErrorKind::Conflict, err.to_string()),
            _ => HandlerError::new(HandlerErrorKind::Validation, err.to_string()),
        }
    }
}

impl From<ContactError> for HandlerError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Delivery(_) => HandlerError::new(HandlerErrorKind::Internal, err.to_string()),
            _ => HandlerError::new(HandlerErrorKind::BadRequest, err.to_string()),
        }
    }
}

impl From<NewsletterError> for HandlerError {
    fn from(err: NewsletterError) -> Self {
        HandlerError::new(HandlerErrorKind::BadRequest, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::email::EmailError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[test]
    fn test_kind_status_mapping() {
        assert_eq!(HandlerErrorKind::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(HandlerErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(HandlerErrorKind::TooManyRequests.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(HandlerErrorKind::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_delivery_error_hides_cause() {
        let err: HandlerError = ContactError::Delivery(EmailError::SmtpError("535 auth failed".to_string())).into();
        assert_eq!(err.error, HandlerErrorKind::Internal);
        assert_eq!(err.message, "Email send failed");
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_delivery_mapping_does_not_log_again() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let _: HandlerError = ContactError::Delivery(EmailError::SmtpError("timeout".to_string())).into();
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_booking_conflict_maps_to_409() {
        let err: HandlerError = BookingError::SubmissionInProgress.into();
        assert_eq!(err.error.status(), StatusCode::CONFLICT);
    }
}
