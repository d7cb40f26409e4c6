use axum::{Router, routing::{get, post}};
use std::sync::Arc;

use crate::handler::booking_handler::{list_rooms_handler, quote_handler, submit_booking_handler};
use crate::service::booking_service::BookingEstimator;

pub fn booking_router(service: Arc<BookingEstimator>) -> Router {
    Router::new()
        .route("/rooms", get(list_rooms_handler))
        .route("/booking/quote", post(quote_handler))
        .route("/booking", post(submit_booking_handler))
        .with_state(service)
}
