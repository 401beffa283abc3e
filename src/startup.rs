use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::authentication::AdminGate;
use crate::configuration::Settings;
use crate::routes::{
    admin_dashboard, cors_preflight, health_check, home, list_subscribers, subscribe, unsubscribe,
};
use crate::store::SubscriberStore;
use crate::telemetry::SojournRootSpanBuilder;
use crate::utils::json_payload_error;

// Application struct representing the running application.
pub struct Application {
    port: u16,
    server: Server,
    store: web::Data<SubscriberStore>,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, io::Error> {
        let listener = TcpListener::bind(configuration.application.address())?;
        let port = listener.local_addr()?.port();
        let store = web::Data::new(SubscriberStore::new());
        let server = run(
            listener,
            store.clone(),
            configuration.admin.gate(),
            configuration.application.allowed_origin,
        )?;

        Ok(Self {
            port,
            server,
            store,
        })
    }

    /// Get the port that the application is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle on the store shared with the request handlers.
    pub fn store(&self) -> web::Data<SubscriberStore> {
        self.store.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> Result<(), io::Error> {
        self.server.await
    }
}

/// Run the HTTP server.
/// # Arguments
/// * `listener` - A TcpListener for incoming connections.
/// * `store` - The subscriber store shared by every worker.
/// * `admin_gate` - The gate guarding the subscriber listing.
/// * `allowed_origin` - The CORS origin allowed on the JSON API.
/// # Returns
/// A Result containing the Server or an io::Error.
pub fn run(
    listener: TcpListener,
    store: web::Data<SubscriberStore>,
    admin_gate: Arc<dyn AdminGate>,
    allowed_origin: String,
) -> Result<Server, io::Error> {
    let admin_gate: web::Data<dyn AdminGate> = web::Data::from(admin_gate);
    let allowed_origin = HeaderValue::from_str(&allowed_origin)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let server = HttpServer::new(move || {
        App::new()
            // Middleware logger
            .wrap(TracingLogger::<SojournRootSpanBuilder>::new())
            .route("/", web::get().to(home))
            .route("/admin", web::get().to(admin_dashboard))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .wrap(DefaultHeaders::new().add((
                        header::ACCESS_CONTROL_ALLOW_ORIGIN,
                        allowed_origin.clone(),
                    )))
                    .service(
                        web::resource("/subscribe")
                            .route(web::post().to(subscribe))
                            .route(web::get().to(list_subscribers))
                            .route(web::method(Method::OPTIONS).to(cors_preflight)),
                    )
                    .service(
                        web::resource("/unsubscribe")
                            .route(web::post().to(unsubscribe))
                            .route(web::method(Method::OPTIONS).to(cors_preflight)),
                    ),
            )
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_payload_error),
            )
            // Get a pointer copy and attach it to the application state
            .app_data(store.clone())
            .app_data(admin_gate.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
