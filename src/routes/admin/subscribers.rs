use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use anyhow::Context;

use crate::authentication::AdminGate;
use crate::domain::Subscriber;
use crate::routes::error_chain_fmt;
use crate::store::SubscriberStore;
use crate::utils::json_error;

#[derive(thiserror::Error)]
pub enum ListError {
    #[error("Unauthorized access")]
    Unauthorized(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ListError {
    fn status_code(&self) -> StatusCode {
        match self {
            ListError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ListError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ListError::Unauthorized(_) => "Unauthorized access",
            ListError::UnexpectedError(_) => "Failed to fetch subscribers",
        };
        json_error(self.status_code(), message)
    }
}

#[derive(serde::Serialize)]
pub struct SubscriberList {
    pub subscribers: Vec<Subscriber>,
    pub count: usize,
}

/// List every subscriber for the admin page.
/// The admin gate is checked before the store is touched.
/// # Arguments
/// * `request` - The incoming request, inspected by the admin gate.
/// * `gate` - The configured admin gate.
/// * `store` - The subscriber store.
/// # Returns
/// 200 with the subscribers in subscription order, or 401.
#[tracing::instrument(
    name = "List subscribers",
    skip(request, gate, store),
    fields(subscriber_count = tracing::field::Empty)
)]
pub async fn list_subscribers(
    request: HttpRequest,
    gate: web::Data<dyn AdminGate>,
    store: web::Data<SubscriberStore>,
) -> Result<HttpResponse, ListError> {
    gate.authorize(&request).map_err(ListError::Unauthorized)?;

    let subscribers = store
        .list()
        .context("Failed to read the subscribers from the store.")?;
    let count = subscribers.len();
    tracing::Span::current().record("subscriber_count", count);

    Ok(HttpResponse::Ok().json(SubscriberList { subscribers, count }))
}
