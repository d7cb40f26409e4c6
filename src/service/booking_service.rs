use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::BookingConfig;
use crate::dto::booking_dto::BookingForm;
use crate::model::booking::{BookingConfirmation, BookingQuote, BookingRequest};
use crate::model::room::RoomRates;
use crate::util::validation::{is_blank, is_valid_email, is_valid_phone};

const SECONDS_PER_NIGHT: u64 = 86_400;
const REFERENCE_LENGTH: usize = 9;

/// User-facing booking failures. The display text is what the guest sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Please fill all required fields.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a valid phone number (at least 10 digits).")]
    InvalidPhone,

    #[error("Please enter a valid number of guests.")]
    InvalidGuests,

    #[error("Please enter valid check-in and check-out dates.")]
    InvalidDate,

    #[error("Check-out date must be after check-in date")]
    DateOrder,

    #[error("A booking is already being processed.")]
    SubmissionInProgress,
}

#[async_trait]
pub trait BookingService: Send + Sync {
    fn room_rates(&self) -> &RoomRates;
    fn compute_quote(&self, check_in: &str, check_out: &str, room_type: &str) -> Result<BookingQuote, BookingError>;
    async fn submit_booking(&self, form: BookingForm) -> Result<BookingConfirmation, BookingError>;
}

/// Prices stays and issues mock confirmations. Nothing is reserved or stored.
#[derive(Debug, Clone)]
pub struct BookingEstimator {
    rates: RoomRates,
    processing_delay: Duration,
}

impl BookingEstimator {
    pub fn new(rates: RoomRates, processing_delay: Duration) -> Self {
        BookingEstimator { rates, processing_delay }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        BookingEstimator::new(config.room_rates.clone(), config.processing_delay)
    }

    /// Runs the submit checks in order; the first failure wins.
    pub fn validate(&self, form: &BookingForm) -> Result<BookingRequest, BookingError> {
        let required = [
            form.check_in.as_deref(),
            form.check_out.as_deref(),
            form.guests.as_deref(),
            form.room_type.as_deref(),
            form.guest_name.as_deref(),
            form.guest_email.as_deref(),
            form.guest_phone.as_deref(),
        ];
        if required.iter().any(|field| is_blank(*field)) {
            return Err(BookingError::MissingFields);
        }

        let field = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
        let guest_email = field(&form.guest_email);
        if !is_valid_email(&guest_email) {
            return Err(BookingError::InvalidEmail);
        }

        let guest_phone = field(&form.guest_phone);
        if !is_valid_phone(&guest_phone) {
            return Err(BookingError::InvalidPhone);
        }

        let guests = match field(&form.guests).parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(BookingError::InvalidGuests),
        };

        let (check_in, check_out) = parse_stay(&field(&form.check_in), &field(&form.check_out))?;

        Ok(BookingRequest {
            check_in,
            check_out,
            room_type: field(&form.room_type),
            guests,
            guest_name: field(&form.guest_name),
            guest_email,
            guest_phone,
        })
    }

    pub fn quote_for(&self, check_in: NaiveDateTime, check_out: NaiveDateTime, room_type: &str) -> Result<BookingQuote, BookingError> {
        if check_out <= check_in {
            return Err(BookingError::DateOrder);
        }
        let seconds = (check_out - check_in).num_seconds() as u64;
        let nights = u32::try_from(seconds.div_ceil(SECONDS_PER_NIGHT)).map_err(|_| BookingError::InvalidDate)?;

        if self.rates.get(room_type).is_none() {
            warn!("No rate configured for room type '{}', pricing at 0", room_type);
        }
        let price_per_night = self.rates.price_for(room_type);
        let total = u64::from(nights)
            .checked_mul(price_per_night)
            .ok_or(BookingError::InvalidDate)?;

        Ok(BookingQuote {
            room_type: room_type.to_string(),
            nights,
            price_per_night,
            total,
        })
    }

    /// Waits out the processing delay, then fabricates a confirmation.
    #[instrument(skip(self, request), fields(room_type = %request.room_type, guests = request.guests))]
    pub async fn confirm(&self, request: BookingRequest) -> Result<BookingConfirmation, BookingError> {
        let quote = self.quote_for(request.check_in, request.check_out, &request.room_type)?;

        debug!("Simulating booking round trip of {:?}", self.processing_delay);
        tokio::time::sleep(self.processing_delay).await;

        let confirmation = BookingConfirmation {
            reference: generate_reference(),
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            guests: request.guests,
            quote,
            issued_at: Utc::now(),
        };
        info!("Booking confirmed with reference {}", confirmation.reference);
        Ok(confirmation)
    }
}

#[async_trait]
impl BookingService for BookingEstimator {
    fn room_rates(&self) -> &RoomRates {
        &self.rates
    }

    fn compute_quote(&self, check_in: &str, check_out: &str, room_type: &str) -> Result<BookingQuote, BookingError> {
        let (check_in, check_out, room_type) = (check_in.trim(), check_out.trim(), room_type.trim());
        if check_in.is_empty() || check_out.is_empty() || room_type.is_empty() {
            return Err(BookingError::MissingFields);
        }
        let (check_in, check_out) = parse_stay(check_in, check_out)?;
        self.quote_for(check_in, check_out, room_type)
    }

    async fn submit_booking(&self, form: BookingForm) -> Result<BookingConfirmation, BookingError> {
        let request = self.validate(&form)?;
        self.confirm(request).await
    }
}

/// Accepts `YYYY-MM-DD` (midnight) or a `datetime-local` value.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_stay(check_in: &str, check_out: &str) -> Result<(NaiveDateTime, NaiveDateTime), BookingError> {
    match (parse_date(check_in), parse_date(check_out)) {
        (Some(check_in), Some(check_out)) if check_out <= check_in => Err(BookingError::DateOrder),
        (Some(check_in), Some(check_out)) => Ok((check_in, check_out)),
        _ => Err(BookingError::InvalidDate),
    }
}

fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LENGTH)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}
