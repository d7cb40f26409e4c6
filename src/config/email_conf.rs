use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;
use crate::util::validation::is_valid_email;

/// SMTP settings for the contact relay
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// Implicit TLS on connect; otherwise STARTTLS is attempted when offered
    pub smtp_secure: bool,
    /// SMTP username, also used as the sender address
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// Display name of the sender
    pub from_name: String,
    /// Inbox that receives relayed contact messages
    pub notify_email: String,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| {
            warn!("SMTP_HOST not set, defaulting to smtp.gmail.com");
            "smtp.gmail.com".to_string()
        });
        debug!("SMTP host: {}", smtp_host);

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", smtp_port);

        // Only the literal "true" enables implicit TLS.
        let smtp_secure = env::var("SMTP_SECURE")
            .map(|v| v == "true")
            .unwrap_or(false);
        debug!("SMTP secure: {}", smtp_secure);

        let smtp_username = env::var("SMTP_USER").map_err(|_| {
            error!("SMTP_USER environment variable not found");
            ConfigError::EnvVarNotFound("SMTP_USER".to_string())
        })?;
        debug!("SMTP user: {}", smtp_username);

        let smtp_password = env::var("SMTP_PASS").map_err(|_| {
            error!("SMTP_PASS environment variable not found");
            ConfigError::EnvVarNotFound("SMTP_PASS".to_string())
        })?;
        debug!("SMTP password: [REDACTED]");

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Website Contact".to_string());
        debug!("From name: {}", from_name);

        let notify_email = env::var("NOTIFY_EMAIL").unwrap_or_else(|_| {
            warn!("NOTIFY_EMAIL not set, notifications go to SMTP_USER");
            smtp_username.clone()
        });
        debug!("Notify email: {}", notify_email);

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .unwrap_or(30);
        debug!("Connection timeout: {} seconds", connection_timeout_secs);

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_secure,
            smtp_username,
            smtp_password,
            from_name,
            notify_email,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_secure: false,
            smtp_username: "relay@example.com".to_string(),
            smtp_password: "test".to_string(),
            from_name: "Website Contact".to_string(),
            notify_email: "frontdesk@example.com".to_string(),
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        if self.smtp_username.is_empty() {
            error!("SMTP username is empty");
            return Err(ConfigError::ValidationError("SMTP username cannot be empty".to_string()));
        }

        if self.smtp_password.is_empty() {
            error!("SMTP password is empty");
            return Err(ConfigError::ValidationError("SMTP password cannot be empty".to_string()));
        }

        if !is_valid_email(&self.smtp_username) {
            error!("SMTP username is not an email address");
            return Err(ConfigError::ValidationError("SMTP username must be an email address".to_string()));
        }

        if !is_valid_email(&self.notify_email) {
            error!("Invalid notify email format");
            return Err(ConfigError::ValidationError("Invalid notify email format".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Sender address, which is always the authenticated account
    pub fn from_email(&self) -> &str {
        &self.smtp_username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
        assert!(!config.smtp_secure);
        assert_eq!(config.from_email(), "relay@example.com");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = EmailConfig::from_test_env();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_host = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_password = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_notify_email() {
        let mut config = EmailConfig::from_test_env();
        config.notify_email = "front desk".to_string();
        assert!(config.validate().is_err());
    }
}
