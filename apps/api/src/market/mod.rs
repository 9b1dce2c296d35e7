//! Clients for the third-party REST APIs behind the plan, jobs and progress
//! endpoints. Each call is a single attempt returning `Result<_, MarketError>`;
//! callers supply the fallback payload.

pub mod cache;
pub mod exchange;
pub mod handlers;
pub mod jobs;
pub mod news;
pub mod photos;
pub mod videos;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("access denied (status {0})")]
    Forbidden(u16),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Maps non-success statuses onto `MarketError`.
pub(crate) fn check_status(response: &reqwest::Response) -> Result<(), MarketError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else if status.as_u16() == 401 || status.as_u16() == 403 {
        Err(MarketError::Forbidden(status.as_u16()))
    } else {
        Err(MarketError::Status(status.as_u16()))
    }
}
