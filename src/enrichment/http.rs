//! Shared blocking HTTP plumbing for the enrichment sources.

use super::traits::SourceError;
use crate::error::{CveEnrichError, Result, SetupErrorKind};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;

/// Default request timeout for every upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client with the given timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            CveEnrichError::source_setup(
                "building HTTP client",
                SetupErrorKind::HttpClient(e.to_string()),
            )
        })
}

/// Map an HTTP status code to a lookup error, if it is one.
pub fn check_status(status: u16) -> std::result::Result<(), SourceError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(SourceError::RateLimited),
        404 => Err(SourceError::NotFound),
        other => Err(SourceError::Status(other)),
    }
}

/// Send a request and return the status code and body text.
pub fn send(request: RequestBuilder) -> std::result::Result<(u16, String), SourceError> {
    let response = request.send().map_err(|e| SourceError::from_reqwest(&e))?;
    let status = response.status().as_u16();
    let body = response.text().map_err(|e| SourceError::from_reqwest(&e))?;
    Ok((status, body))
}

/// Reject base URLs that reqwest would fail on at request time.
pub fn validate_base_url(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(CveEnrichError::source_setup(
            format!("endpoint '{url}'"),
            SetupErrorKind::InvalidEndpoint("must start with http:// or https://".to_string()),
        ))
    }
}
