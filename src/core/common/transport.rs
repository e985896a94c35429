use std::fmt::Display;

use serde_json::Value;

use crate::api::Action;

/// An HNAP call answered with a result other than `OK`.
///
/// The raw response is kept for diagnostics; some results such as `UN-AUTH`
/// mean the session expired and the caller may log in again.
#[derive(Debug)]
pub struct CallHnapError {
    pub action: Action,
    pub response: Value,
}

impl CallHnapError {
    pub fn new(action: Action, response: Value) -> Self {
        Self { action, response }
    }

    /// Value of `{Action}Result`, if present.
    pub fn result(&self) -> Option<&str> {
        self.response
            .get(self.action.response_key())
            .and_then(|r| r.get(self.action.result_key()))
            .and_then(Value::as_str)
    }
}

impl Display for CallHnapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed with result {}: {}",
            self.action,
            self.result().unwrap_or("<missing>"),
            self.response
        )
    }
}

impl std::error::Error for CallHnapError {}

#[derive(Debug)]
pub struct HttpStatusError {
    pub status: reqwest::StatusCode,
    pub url: String,
}

impl HttpStatusError {
    pub fn new(status: reqwest::StatusCode, url: String) -> Self {
        Self { status, url }
    }
}

impl Display for HttpStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP status {} for {}", self.status, self.url)
    }
}

impl std::error::Error for HttpStatusError {}

/// The modem did not answer within the configured timeout.
#[derive(Debug)]
pub struct TimeoutError {
    pub url: String,
}

impl Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request to {} timed out", self.url)
    }
}

impl std::error::Error for TimeoutError {}

#[derive(Debug)]
pub struct EmptyBatchError;

impl Display for EmptyBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GetMultipleHNAPs needs at least one action")
    }
}

impl std::error::Error for EmptyBatchError {}

/// Maps a reqwest failure to [`TimeoutError`] when it is one.
pub fn map_transport_error(
    e: reqwest::Error,
    url: &str,
) -> Box<dyn std::error::Error + Send + Sync> {
    if e.is_timeout() {
        return Box::new(TimeoutError {
            url: url.to_string(),
        });
    }
    Box::new(e)
}
