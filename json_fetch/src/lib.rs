//! Fetch a URL and decode its JSON body.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed. {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Response was not the expected JSON. {0}")]
    Decode(#[from] serde_json::Error),
}

/// GETs `url` and decodes the body as `T`. Any non-2xx status is an error.
pub fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    tracing::debug!(url, "fetching json");
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        tracing::debug!(url, %status, "json fetch rejected");
        return Err(FetchError::Status { status, body });
    }
    Ok(serde_json::from_str(&body)?)
}
