use std::env;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;
use crate::model::room::RoomRates;

/// Settings for the booking estimator
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Nightly price per room type, in rupees
    pub room_rates: RoomRates,
    /// Artificial delay before a confirmation is issued
    pub processing_delay: Duration,
    /// How long a confirmation stays visible on a booking desk
    pub confirmation_display: Duration,
}

impl BookingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading booking configuration from environment variables");

        let room_rates = match env::var("ROOM_RATES") {
            Ok(raw) => Self::parse_room_rates(&raw)?,
            Err(_) => {
                warn!("ROOM_RATES not set, using default rates");
                RoomRates::default()
            }
        };
        debug!("Room rates: {:?}", room_rates);

        let processing_delay_ms = env::var("BOOKING_PROCESSING_DELAY_MS")
            .unwrap_or_else(|_| "1200".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid BOOKING_PROCESSING_DELAY_MS value");
                ConfigError::InvalidValue("Invalid BOOKING_PROCESSING_DELAY_MS value".to_string())
            })?;
        debug!("Processing delay: {} ms", processing_delay_ms);

        let display_secs = env::var("BOOKING_CONFIRMATION_DISPLAY_SECS")
            .unwrap_or_else(|_| "6".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid BOOKING_CONFIRMATION_DISPLAY_SECS value");
                ConfigError::InvalidValue("Invalid BOOKING_CONFIRMATION_DISPLAY_SECS value".to_string())
            })?;
        debug!("Confirmation display window: {} seconds", display_secs);

        let config = BookingConfig {
            room_rates,
            processing_delay: Duration::from_millis(processing_delay_ms),
            confirmation_display: Duration::from_secs(display_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Config with no artificial waits
    pub fn from_test_env() -> Self {
        BookingConfig {
            room_rates: RoomRates::default(),
            processing_delay: Duration::ZERO,
            confirmation_display: Duration::from_secs(6),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_rates.is_empty() {
            error!("No room rates configured");
            return Err(ConfigError::ValidationError("At least one room rate is required".to_string()));
        }
        Ok(())
    }

    /// Parses `ac:2000,nonac:1000`.
    pub fn parse_room_rates(raw: &str) -> Result<RoomRates, ConfigError> {
        let mut pairs = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (room_type, price) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::ParseError(format!("Expected room:price, got '{}'", entry)))?;
            let room_type = room_type.trim();
            if room_type.is_empty() {
                return Err(ConfigError::ParseError(format!("Missing room type in '{}'", entry)));
            }
            let price = price
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::ParseError(format!("Invalid price in '{}'", entry)))?;
            pairs.push((room_type.to_string(), price));
        }
        Ok(RoomRates::from_pairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_rates() {
        let rates = BookingConfig::parse_room_rates("ac:2500, nonac:1200,suite:6000").unwrap();
        assert_eq!(rates.price_for("ac"), 2500);
        assert_eq!(rates.price_for("nonac"), 1200);
        assert_eq!(rates.price_for("suite"), 6000);
    }

    #[test]
    fn test_parse_room_rates_rejects_garbage() {
        assert!(BookingConfig::parse_room_rates("ac=2000").is_err());
        assert!(BookingConfig::parse_room_rates("ac:cheap").is_err());
        assert!(BookingConfig::parse_room_rates(":100").is_err());
    }

    #[test]
    fn test_empty_rates_fail_validation() {
        let mut config = BookingConfig::from_test_env();
        config.room_rates = BookingConfig::parse_room_rates("").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_test_config_has_no_delay() {
        let config = BookingConfig::from_test_env();
        assert_eq!(config.processing_delay, Duration::ZERO);
        assert_eq!(config.room_rates.price_for("ac"), 2000);
    }
}
