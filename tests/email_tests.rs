use tarasha_backend::config::EmailConfig;
use tarasha_backend::util::email::{EmailError, EmailMessage, MailTransport, SmtpEmailService};

/// Initialize tracing for tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

/// Create test email config
fn create_test_config() -> EmailConfig {
    EmailConfig::from_test_env()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_email_message_creation() {
        let message = EmailMessage::new(
            "frontdesk@example.com".to_string(),
            "New contact from Asha".to_string(),
        );

        assert_eq!(message.to, "frontdesk@example.com");
        assert_eq!(message.subject, "New contact from Asha");
        assert!(message.reply_to.is_none());
        assert!(message.text_body.is_none());
        assert!(message.html_body.is_none());
    }

    #[test]
    fn test_email_message_with_bodies() {
        let message = EmailMessage::new(
            "frontdesk@example.com".to_string(),
            "Subject".to_string(),
        )
        .with_reply_to("asha@example.com".to_string())
        .with_text_body("Text body content".to_string())
        .with_html_body("<p>HTML body content</p>".to_string());

        assert_eq!(message.reply_to.as_deref(), Some("asha@example.com"));
        assert_eq!(message.text_body.as_deref(), Some("Text body content"));
        assert_eq!(message.html_body.as_deref(), Some("<p>HTML body content</p>"));
    }

    #[tokio::test]
    async fn test_build_multipart_message() {
        init_tracing();
        let service = SmtpEmailService::new(create_test_config()).expect("Failed to create test email service");
        let message = EmailMessage::new("frontdesk@example.com".to_string(), "New contact from Asha".to_string())
            .with_reply_to("asha@example.com".to_string())
            .with_text_body("Name: Asha".to_string())
            .with_html_body("<p>Name: Asha</p>".to_string());

        let built = service.build_message(message).expect("message should build");
        let raw = String::from_utf8(built.formatted()).unwrap();
        assert!(raw.contains("Website Contact"));
        assert!(raw.contains("relay@example.com"));
        assert!(raw.contains("frontdesk@example.com"));
        assert!(raw.contains("Reply-To:"));
        assert!(raw.contains("asha@example.com"));
        assert!(raw.contains("Subject: New contact from Asha"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[tokio::test]
    async fn test_build_message_requires_body() {
        let service = SmtpEmailService::new(create_test_config()).unwrap();
        let message = EmailMessage::new("frontdesk@example.com".to_string(), "Empty".to_string());
        assert!(matches!(service.build_message(message), Err(EmailError::MessageError(_))));
    }

    #[tokio::test]
    async fn test_unparsable_reply_to_is_dropped() {
        let service = SmtpEmailService::new(create_test_config()).unwrap();
        let message = EmailMessage::new("frontdesk@example.com".to_string(), "Subject".to_string())
            .with_reply_to("a\"b@example.com".to_string())
            .with_text_body("hi".to_string());
        let built = service.build_message(message).expect("reply-to problems must not block delivery");
        let raw = String::from_utf8(built.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_email_error_types() {
        let errors = vec![
            EmailError::ConfigError("Config error".to_string()),
            EmailError::SmtpError("SMTP error".to_string()),
            EmailError::MessageError("Message error".to_string()),
            EmailError::AddressError("Address error".to_string()),
        ];

        for error in errors {
            assert!(!format!("{}", error).is_empty());
            assert!(!format!("{:?}", error).is_empty());
        }
    }

    #[test]
    fn test_invalid_config_creation() {
        let mut config = create_test_config();
        config.smtp_host = "".to_string();

        let result = SmtpEmailService::new(config);
        assert!(matches!(result, Err(EmailError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_smtp() {
        let service = SmtpEmailService::new(create_test_config()).unwrap();
        let message = EmailMessage::new("nobody".to_string(), "Subject".to_string())
            .with_text_body("hi".to_string());
        assert!(matches!(service.send(message).await, Err(EmailError::AddressError(_))));
    }
}

// Integration tests that would require actual SMTP server
#[cfg(test)]
mod integration_tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires an SMTP catcher such as MailHog on localhost:1025
    async fn test_send_email_integration() {
        init_tracing();
        let service = SmtpEmailService::new(create_test_config()).unwrap();

        let message = EmailMessage::new(
            "frontdesk@example.com".to_string(),
            "Integration Test Email".to_string(),
        )
        .with_text_body("This is a test email from the integration test.".to_string());

        let result = service.send(message).await;
        assert!(result.is_ok());
    }
}
