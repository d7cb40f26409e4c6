pub mod app_conf;
pub mod email_conf;
pub mod booking_conf;
pub mod rate_limit_conf;


pub use app_conf::AppConfig;
pub use email_conf::EmailConfig;
pub use booking_conf::BookingConfig;
pub use rate_limit_conf::RateLimitConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Parse error: {0}")]
    ParseError(String),
}
