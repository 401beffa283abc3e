use actix_web::{HttpResponse, web};

use crate::store::SubscriberStore;

/// Liveness probe for monitoring.
/// Answers 200 while the subscriber store is usable and 503 once its lock is
/// poisoned, since every subscription request would fail from then on.
pub async fn health_check(store: web::Data<SubscriberStore>) -> HttpResponse {
    match store.len() {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => {
            tracing::error!(error = %e, "Subscriber store is unavailable");
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
