use axum::{Router, routing::{get, post}};
use std::sync::Arc;

use crate::handler::contact_handler::{contact_handler, newsletter_handler, status_handler};
use crate::service::contact_service::ContactRelay;
use crate::service::newsletter_service::NewsletterService;

pub fn contact_router(relay: Arc<ContactRelay>, newsletter: Arc<NewsletterService>) -> Router {
    let contact = Router::new()
        .route("/", get(status_handler))
        .route("/contact", post(contact_handler))
        .with_state(relay);

    let newsletter = Router::new()
        .route("/newsletter", post(newsletter_handler))
        .with_state(newsletter);

    contact.merge(newsletter)
}
