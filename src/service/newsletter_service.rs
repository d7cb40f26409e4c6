use tracing::info;

use crate::util::validation::is_valid_email;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsletterError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,
}

/// Newsletter signup. Acknowledges valid addresses; nothing is stored.
#[derive(Debug, Default, Clone)]
pub struct NewsletterService;

impl NewsletterService {
    pub fn subscribe(&self, email: Option<&str>) -> Result<String, NewsletterError> {
        let email = email.map(str::trim).unwrap_or_default();
        if email.is_empty() {
            return Err(NewsletterError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(NewsletterError::InvalidEmail);
        }
        info!("Newsletter signup accepted");
        Ok("Subscribed".to_string())
    }
}
