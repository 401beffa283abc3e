mod admin;
mod cors;
mod health_check;
mod home;
mod subscriptions;
mod unsubscribe;

pub use admin::*;
pub use cors::*;
pub use health_check::*;
pub use home::*;
pub use subscriptions::*;
pub use unsubscribe::*;

/// Write an error and every cause below it, one per line.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
