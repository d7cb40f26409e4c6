use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// A validated booking submission. Lives for one request only.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub room_type: String,
    pub guests: u32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingQuote {
    pub room_type: String,
    pub nights: u32,
    pub price_per_night: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub reference: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guests: u32,
    pub quote: BookingQuote,
    pub issued_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub fn summary(&self) -> String {
        format!(
            "Booking Confirmed! Guest: {}. Email confirmation sent to: {}. Reference: #{}",
            self.guest_name, self.guest_email, self.reference
        )
    }
}

/// Where a booking desk is in its submit cycle.
#[derive(Debug, Clone)]
pub enum BookingStatus {
    Idle,
    Rejected(String),
    Processing,
    Confirmed(BookingConfirmation),
}

impl BookingStatus {
    pub fn is_processing(&self) -> bool {
        matches!(self, BookingStatus::Processing)
    }
}
