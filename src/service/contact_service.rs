use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::contact_dto::ContactRequest;
use crate::model::contact::ContactMessage;
use crate::util::email::{EmailError, EmailMessage, MailTransport};
use crate::util::validation::{is_blank, is_valid_email};

/// Contact relay outcomes. Display strings go back to the caller as-is,
/// so `Delivery` deliberately says nothing about its cause.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Spam detected")]
    Spam,

    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Email send failed")]
    Delivery(#[source] EmailError),
}

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn handle_contact(&self, request: ContactRequest) -> Result<(), ContactError>;
}

/// Forwards contact form submissions to the operator's inbox.
pub struct ContactRelay {
    transport: Arc<dyn MailTransport>,
    notify_email: String,
}

impl ContactRelay {
    pub fn new(transport: Arc<dyn MailTransport>, notify_email: String) -> Self {
        ContactRelay { transport, notify_email }
    }

    /// Honeypot, then presence, then email shape.
    pub fn validate(&self, request: &ContactRequest) -> Result<ContactMessage, ContactError> {
        if request.honeypot.as_deref().is_some_and(|v| !v.is_empty()) {
            return Err(ContactError::Spam);
        }

        if is_blank(request.name.as_deref())
            || is_blank(request.email.as_deref())
            || is_blank(request.message.as_deref())
        {
            return Err(ContactError::MissingFields);
        }

        let email = request.email.as_deref().unwrap_or_default().trim().to_string();
        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactMessage {
            name: request.name.as_deref().unwrap_or_default().trim().to_string(),
            email,
            message: request.message.clone().unwrap_or_default(),
        })
    }

    fn render(&self, message: &ContactMessage) -> EmailMessage {
        EmailMessage::new(self.notify_email.clone(), message.subject())
            .with_reply_to(message.email.clone())
            .with_text_body(message.text_body())
            .with_html_body(message.html_body())
    }
}

#[async_trait]
impl ContactService for ContactRelay {
    #[instrument(skip(self, request))]
    async fn handle_contact(&self, request: ContactRequest) -> Result<(), ContactError> {
        let message = match self.validate(&request) {
            Ok(message) => message,
            Err(ContactError::Spam) => {
                warn!("Honeypot field filled, dropping submission");
                return Err(ContactError::Spam);
            }
            Err(e) => {
                info!("Rejected contact submission: {}", e);
                return Err(e);
            }
        };

        info!("Relaying contact message from {}", message.email);
        self.transport
            .send(self.render(&message))
            .await
            .map_err(|e| {
                error!("Contact relay delivery failed: {}", e);
                ContactError::Delivery(e)
            })?;

        info!("Contact message delivered");
        Ok(())
    }
}
