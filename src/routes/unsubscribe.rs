use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;

use crate::routes::subscriptions::{INVALID_EMAIL_MESSAGE, SubscribeResponse, parse_email};
use crate::routes::error_chain_fmt;
use crate::store::SubscriberStore;
use crate::utils::json_error;

#[derive(serde::Deserialize)]
pub struct UnsubscribeBody {
    email: Option<serde_json::Value>,
}

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UnsubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            UnsubscribeError::ValidationError(_) => INVALID_EMAIL_MESSAGE,
            UnsubscribeError::UnexpectedError(_) => "Failed to unsubscribe",
        };
        json_error(self.status_code(), message)
    }
}

/// Mark a subscriber as unsubscribed.
/// Known and unknown addresses get the same answer, so this endpoint cannot be
/// used to find out who is subscribed.
/// No credentials are asked for: anyone who knows an address can unsubscribe it.
/// The record is kept and a new subscribe reactivates it.
#[tracing::instrument(
    name = "Unsubscribing a subscriber",
    skip(body, store),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn unsubscribe(
    body: web::Json<UnsubscribeBody>,
    store: web::Data<SubscriberStore>,
) -> Result<HttpResponse, UnsubscribeError> {
    let email = parse_email(body.email.as_ref()).map_err(UnsubscribeError::ValidationError)?;
    tracing::Span::current().record("subscriber_email", tracing::field::display(&email));

    let outcome = store
        .unsubscribe(&email)
        .context("Failed to unsubscribe the subscriber in the store.")?;
    tracing::info!(?outcome, "Unsubscription processed");

    Ok(HttpResponse::Ok().json(SubscribeResponse {
        success: true,
        message: "You have been unsubscribed.",
    }))
}
