use actix_web::HttpRequest;
use actix_web::http::{Uri, header};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

/// Decides whether a request may read the subscriber list.
///
/// `Ok(())` authorizes the request; the error explains a rejection and is
/// meant for the logs, never for the client.
pub trait AdminGate: Send + Sync {
    fn authorize(&self, request: &HttpRequest) -> Result<(), anyhow::Error>;
}

/// Best-effort gate: only requests issued from the admin page get through.
///
/// The `Referer` header must point at `admin_path` on the host the request was
/// sent to. Any client can forge the header, so this keeps casual visitors out
/// and nothing more.
pub struct RefererGate {
    admin_path: String,
}

impl RefererGate {
    pub fn new(admin_path: String) -> Self {
        Self { admin_path }
    }
}

impl AdminGate for RefererGate {
    fn authorize(&self, request: &HttpRequest) -> Result<(), anyhow::Error> {
        let referer = request
            .headers()
            .get(header::REFERER)
            .context("The 'Referer' header is missing")?
            .to_str()
            .context("The 'Referer' header is not a valid UTF-8 string")?;
        let referer: Uri = referer
            .parse()
            .context("The 'Referer' header is not a valid URL")?;
        let authority = referer
            .authority()
            .context("The 'Referer' header is not an absolute URL")?;

        if let Some(host) = request.headers().get(header::HOST) {
            let host = host
                .to_str()
                .context("The 'Host' header is not a valid UTF-8 string")?;
            if !authority.as_str().eq_ignore_ascii_case(host) {
                anyhow::bail!("The request was referred by a foreign host: {}", authority);
            }
        }

        if referer.path().trim_end_matches('/') != self.admin_path.trim_end_matches('/') {
            anyhow::bail!("The request was referred by {}, not the admin page", referer.path());
        }
        Ok(())
    }
}

/// Gate accepting `Authorization: Bearer <token>` with the configured token.
pub struct TokenGate {
    token: SecretString,
}

impl TokenGate {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl AdminGate for TokenGate {
    fn authorize(&self, request: &HttpRequest) -> Result<(), anyhow::Error> {
        let header_value = request
            .headers()
            .get(header::AUTHORIZATION)
            .context("The 'Authorization' header is missing")?
            .to_str()
            .context("The 'Authorization' header is not a valid UTF-8 string")?;
        let candidate = header_value
            .strip_prefix("Bearer ")
            .context("The 'Authorization' header is not a Bearer token")?;

        if candidate != self.token.expose_secret() {
            anyhow::bail!("Invalid admin token.");
        }
        Ok(())
    }
}
