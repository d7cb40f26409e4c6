use std::env;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::ConfigError;

/// Fixed-window limits applied per remote address
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid RATE_LIMIT_WINDOW_SECS value");
                ConfigError::InvalidValue("Invalid RATE_LIMIT_WINDOW_SECS value".to_string())
            })?;

        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid RATE_LIMIT_MAX_REQUESTS value");
                ConfigError::InvalidValue("Invalid RATE_LIMIT_MAX_REQUESTS value".to_string())
            })?;
        debug!("Rate limit: {} requests per {} seconds", max_requests, window_secs);

        let config = RateLimitConfig {
            window: Duration::from_secs(window_secs),
            max_requests,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.is_zero() {
            return Err(ConfigError::ValidationError("Rate limit window cannot be 0".to_string()));
        }
        if self.max_requests == 0 {
            return Err(ConfigError::ValidationError("Rate limit max requests cannot be 0".to_string()));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            window: Duration::from_secs(60),
            max_requests: 20,
        }
    }
}
