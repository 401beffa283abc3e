use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

/// Serve the admin page.
/// The page fetches `GET /api/subscribe` from the browser, which sends this
/// page as the `Referer` the admin gate looks for.
pub async fn admin_dashboard() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("admin.html"))
}
