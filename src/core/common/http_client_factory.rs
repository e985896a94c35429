use std::time::Duration;

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE},
    Client,
};

const X_REQUESTED_WITH: &str = "x-requested-with";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Headers the modem web UI sends with every HNAP call.
pub fn shared_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(X_REQUESTED_WITH),
        HeaderValue::from_static("XMLHttpRequest"),
    );

    headers
}

/// Creates the HTTP client used for a whole modem session.
///
/// Certificates are not verified: the modem serves a self-signed
/// certificate that cannot be replaced. Cookies are handled by the session,
/// not by reqwest.
pub fn http_client_factory(timeout: Duration) -> Result<Client, reqwest::Error> {
    debug!("creating HTTP client");

    reqwest::ClientBuilder::new()
        .danger_accept_invalid_certs(true)
        .default_headers(shared_headers())
        .timeout(timeout)
        .user_agent(APP_USER_AGENT)
        .build()
}
