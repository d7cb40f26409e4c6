use serde::{Deserialize, Serialize};

use crate::dto::field::{honeypot, scalar_text};

/// Contact form body. Fields are lenient so a scripted client sending
/// numbers or booleans still gets the relay's own verdict.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "honeypot")]
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// `{ "ok": true }`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// `{ "ok": true, "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse { ok: true, message: message.into() }
    }
}
