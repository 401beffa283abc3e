use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

/// Body of every JSON error response.
#[derive(serde::Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Build a JSON error response of the form `{"error": message}`.
/// # Arguments
/// * `status` - The HTTP status code of the response.
/// * `message` - The message shown to the client.
/// # Returns
/// An HttpResponse with a JSON body.
pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

/// Error handler for the JSON extractor.
/// Malformed bodies are answered with a 400 in the same shape as the other
/// API errors instead of actix-web's plain text default.
pub fn json_payload_error(err: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected a malformed JSON body");
    let response = json_error(StatusCode::BAD_REQUEST, "Invalid request body");
    InternalError::from_response(err, response).into()
}
