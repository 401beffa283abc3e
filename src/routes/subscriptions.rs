use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::domain::{NewSubscriber, SubscriberEmail};
use crate::routes::error_chain_fmt;
use crate::store::{SubscribeOutcome, SubscriberStore};
use crate::utils::json_error;

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

#[derive(serde::Deserialize)]
pub struct SubscribeBody {
    // Kept loose so a missing or non-string email is a validation failure.
    email: Option<serde_json::Value>,
    source: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

#[derive(serde::Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
}

impl TryFrom<SubscribeBody> for NewSubscriber {
    type Error = String;

    fn try_from(body: SubscribeBody) -> Result<Self, Self::Error> {
        let email = parse_email(body.email.as_ref())?;
        Ok(Self {
            email,
            source: body.source,
            timestamp: body.timestamp,
        })
    }
}

/// Validate the `email` field of a JSON body.
pub fn parse_email(value: Option<&serde_json::Value>) -> Result<SubscriberEmail, String> {
    let email = value
        .ok_or_else(|| "The email is missing.".to_string())?
        .as_str()
        .ok_or_else(|| "The email is not a string.".to_string())?;
    SubscriberEmail::parse(email.to_string())
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SubscribeError::ValidationError(_) => INVALID_EMAIL_MESSAGE,
            SubscribeError::UnexpectedError(_) => "Failed to subscribe",
        };
        json_error(self.status_code(), message)
    }
}

/// Subscribe an email address, or reactivate it if it had unsubscribed.
/// # Arguments
/// * `body` - The JSON body with the email and optional source and timestamp.
/// * `store` - The subscriber store.
/// # Returns
/// 201 for a new subscriber, 200 for a reactivated or already active one.
#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(body, store),
    fields(
        subscriber_email = tracing::field::Empty,
        subscriber_source = tracing::field::Empty,
    )
)]
pub async fn subscribe(
    body: web::Json<SubscribeBody>,
    store: web::Data<SubscriberStore>,
) -> Result<HttpResponse, SubscribeError> {
    let new_subscriber: NewSubscriber = body
        .into_inner()
        .try_into()
        .map_err(SubscribeError::ValidationError)?;
    let span = tracing::Span::current();
    span.record("subscriber_email", tracing::field::display(&new_subscriber.email));
    if let Some(source) = &new_subscriber.source {
        span.record("subscriber_source", source.as_str());
    }

    let outcome = store
        .subscribe(new_subscriber)
        .context("Failed to save the subscriber in the store.")?;
    tracing::info!(?outcome, "Subscription processed");

    let (status, message) = match outcome {
        SubscribeOutcome::Created => (StatusCode::CREATED, "Successfully subscribed!"),
        SubscribeOutcome::Reactivated => (
            StatusCode::OK,
            "Welcome back! Your subscription has been reactivated.",
        ),
        SubscribeOutcome::AlreadySubscribed => (StatusCode::OK, "Email already subscribed"),
    };
    Ok(HttpResponse::build(status).json(SubscribeResponse {
        success: true,
        message,
    }))
}
