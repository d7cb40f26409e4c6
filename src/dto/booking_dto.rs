use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::field::string_or_number;
use crate::model::booking::{BookingConfirmation, BookingQuote};
use crate::util::currency::format_inr;

/// Raw booking form values, exactly as the page sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default, alias = "checkIn")]
    pub check_in: Option<String>,
    #[serde(default, alias = "checkOut")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub guests: Option<String>,
    #[serde(default, alias = "roomType")]
    pub room_type: Option<String>,
    #[serde(default, alias = "guestName")]
    pub guest_name: Option<String>,
    #[serde(default, alias = "guestEmail")]
    pub guest_email: Option<String>,
    #[serde(default, alias = "guestPhone")]
    pub guest_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default, alias = "checkIn")]
    pub check_in: Option<String>,
    #[serde(default, alias = "checkOut")]
    pub check_out: Option<String>,
    #[serde(default, alias = "roomType")]
    pub room_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponseDto {
    pub room_type: String,
    pub nights: u32,
    pub price_per_night: u64,
    pub total: u64,
    pub price_per_night_display: String,
    pub total_display: String,
}

impl From<BookingQuote> for QuoteResponseDto {
    fn from(quote: BookingQuote) -> Self {
        QuoteResponseDto {
            price_per_night_display: format_inr(quote.price_per_night),
            total_display: format_inr(quote.total),
            room_type: quote.room_type,
            nights: quote.nights,
            price_per_night: quote.price_per_night,
            total: quote.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteEnvelope {
    pub ok: bool,
    pub quote: QuoteResponseDto,
}

#[derive(Debug, Serialize)]
pub struct ConfirmationResponseDto {
    pub reference: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guests: u32,
    pub quote: QuoteResponseDto,
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

impl From<BookingConfirmation> for ConfirmationResponseDto {
    fn from(confirmation: BookingConfirmation) -> Self {
        ConfirmationResponseDto {
            message: confirmation.summary(),
            reference: confirmation.reference,
            guest_name: confirmation.guest_name,
            guest_email: confirmation.guest_email,
            guests: confirmation.guests,
            quote: confirmation.quote.into(),
            issued_at: confirmation.issued_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmationEnvelope {
    pub ok: bool,
    pub confirmation: ConfirmationResponseDto,
}

#[derive(Debug, Serialize)]
pub struct RoomRateDto {
    pub room_type: String,
    pub price_per_night: u64,
    pub price_display: String,
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub ok: bool,
    pub rooms: Vec<RoomRateDto>,
}
