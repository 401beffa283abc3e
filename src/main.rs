use anyhow::Context;

use sojourn_backend::configuration::get_configuration;
use sojourn_backend::startup::Application;
use sojourn_backend::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("sojourn-backend".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Accepting subscriptions");
    application.run_until_stopped().await?;
    Ok(())
}
