use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

/// Serve the landing page with the newsletter sign-up form.
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("home.html"))
}
