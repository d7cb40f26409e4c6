use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::dto::contact_dto::{ContactRequest, MessageResponse, NewsletterRequest, OkResponse};
use crate::handler::extract::JsonOrForm;
use crate::service::contact_service::{ContactRelay, ContactService};
use crate::service::newsletter_service::NewsletterService;
use crate::util::error::HandlerError;

pub async fn status_handler() -> impl IntoResponse {
    Json(MessageResponse::new("Contact server running"))
}

pub async fn contact_handler(
    State(relay): State<Arc<ContactRelay>>,
    JsonOrForm(payload): JsonOrForm<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[contact_handler] Handler called");
    relay.handle_contact(payload).await?;
    Ok(Json(OkResponse { ok: true }))
}

pub async fn newsletter_handler(
    State(service): State<Arc<NewsletterService>>,
    JsonOrForm(payload): JsonOrForm<NewsletterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let message = service.subscribe(payload.email.as_deref())?;
    Ok(Json(MessageResponse::new(message)))
}
