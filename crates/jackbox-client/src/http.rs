//! Shared HTTP client for the room lookup and the handshake bootstrap.

use jackbox_core::error::{JackboxError, Result};

use crate::config::SessionSection;

/// Build the HTTP client. A timeout is applied only when configured.
pub fn build_client(session: &SessionSection) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = session.http_timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| JackboxError::Fatal(format!("http client init failed: {e}")))
}

/// Map a request/transport failure (no response) to an error kind.
pub(crate) fn transport_error(what: &str, e: reqwest::Error) -> JackboxError {
    JackboxError::Transient(format!("{what} request failed: {e}"))
}
