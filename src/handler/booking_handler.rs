use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::dto::booking_dto::{
    BookingForm, ConfirmationEnvelope, QuoteEnvelope, QuoteRequest, RoomRateDto, RoomsResponse,
};
use crate::handler::extract::JsonOrForm;
use crate::service::booking_service::{BookingEstimator, BookingService};
use crate::util::currency::format_inr;
use crate::util::error::HandlerError;

pub async fn list_rooms_handler(State(service): State<Arc<BookingEstimator>>) -> impl IntoResponse {
    let rooms = service
        .room_rates()
        .iter()
        .map(|(room_type, price)| RoomRateDto {
            room_type: room_type.to_string(),
            price_per_night: price,
            price_display: format_inr(price),
        })
        .collect();
    Json(RoomsResponse { ok: true, rooms })
}

pub async fn quote_handler(
    State(service): State<Arc<BookingEstimator>>,
    JsonOrForm(payload): JsonOrForm<QuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let quote = service.compute_quote(
        payload.check_in.as_deref().unwrap_or_default(),
        payload.check_out.as_deref().unwrap_or_default(),
        payload.room_type.as_deref().unwrap_or_default(),
    )?;
    Ok(Json(QuoteEnvelope { ok: true, quote: quote.into() }))
}

pub async fn submit_booking_handler(
    State(service): State<Arc<BookingEstimator>>,
    JsonOrForm(form): JsonOrForm<BookingForm>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[submit_booking_handler] Handler called");
    let confirmation = service.submit_booking(form).await?;
    Ok(Json(ConfirmationEnvelope { ok: true, confirmation: confirmation.into() }))
}
