//! Session-side booking flow for UI callers. The HTTP routes are stateless;
//! a page or kiosk embedding the crate takes one desk per form from
//! `AppServices::booking_desk` and renders `status()`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::dto::booking_dto::BookingForm;
use crate::model::booking::{BookingConfirmation, BookingQuote, BookingStatus};
use crate::service::booking_service::{BookingError, BookingEstimator, BookingService};

struct DeskState {
    status: BookingStatus,
    confirmed_at: Option<Instant>,
}

/// One guest's booking form: owns the status line the page renders and
/// walks `Idle -> Processing -> Confirmed -> Idle`. Submissions are
/// serialized; a second submit while one is processing is refused.
pub struct BookingDesk {
    estimator: Arc<BookingEstimator>,
    display_window: Duration,
    state: Mutex<DeskState>,
}

impl BookingDesk {
    pub fn new(estimator: Arc<BookingEstimator>, display_window: Duration) -> Self {
        BookingDesk {
            estimator,
            display_window,
            state: Mutex::new(DeskState {
                status: BookingStatus::Idle,
                confirmed_at: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeskState> {
        // state is plain data, a poisoned lock is still consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current status; an expired confirmation reads as `Idle`.
    pub fn status(&self) -> BookingStatus {
        let mut state = self.lock();
        if let (BookingStatus::Confirmed(_), Some(at)) = (&state.status, state.confirmed_at) {
            if at.elapsed() >= self.display_window {
                debug!("Confirmation display window elapsed");
                state.status = BookingStatus::Idle;
                state.confirmed_at = None;
            }
        }
        state.status.clone()
    }

    /// Live price preview. Errors show on the status line, a good quote
    /// clears a previous rejection.
    pub fn quote(&self, check_in: &str, check_out: &str, room_type: &str) -> Result<BookingQuote, BookingError> {
        let result = self.estimator.compute_quote(check_in, check_out, room_type);
        let mut state = self.lock();
        match (&result, &state.status) {
            (_, BookingStatus::Processing | BookingStatus::Confirmed(_)) => {}
            (Err(e), _) => state.status = BookingStatus::Rejected(e.to_string()),
            (Ok(_), BookingStatus::Rejected(_)) => state.status = BookingStatus::Idle,
            (Ok(_), BookingStatus::Idle) => {}
        }
        result
    }

    pub async fn submit(&self, form: BookingForm) -> Result<BookingConfirmation, BookingError> {
        let request = {
            let mut state = self.lock();
            if state.status.is_processing() {
                return Err(BookingError::SubmissionInProgress);
            }
            match self.estimator.validate(&form) {
                Ok(request) => {
                    state.status = BookingStatus::Processing;
                    state.confirmed_at = None;
                    request
                }
                Err(e) => {
                    state.status = BookingStatus::Rejected(e.to_string());
                    return Err(e);
                }
            }
        };

        let guard = ProcessingGuard { desk: self, armed: true };
        let result = self.estimator.confirm(request).await;
        guard.disarm();

        let mut state = self.lock();
        match &result {
            Ok(confirmation) => {
                info!("Desk showing confirmation {}", confirmation.reference);
                state.status = BookingStatus::Confirmed(confirmation.clone());
                state.confirmed_at = Some(Instant::now());
            }
            Err(e) => state.status = BookingStatus::Rejected(e.to_string()),
        }
        result
    }
}

/// Puts the desk back to `Idle` if a submit future is dropped mid-delay.
struct ProcessingGuard<'a> {
    desk: &'a BookingDesk,
    armed: bool,
}

impl ProcessingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.desk.lock();
            if state.status.is_processing() {
                state.status = BookingStatus::Idle;
            }
        }
    }
}
