use std::{
    future::Future,
    ops::{Deref, DerefMut},
    pin::Pin,
    time::Duration,
};

use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, COOKIE, SET_COOKIE},
    Url,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    api::{
        registry::{must_be_batched, BATCH_ACTION},
        Action, HnapRequest, MultipleHnaps,
    },
    core::{
        authenticator::{
            authentication_error::ProtocolViolationError,
            signing::{hnap_auth, soap_action_uri, Clock, SystemClock},
            Authenticator,
        },
        common::{
            http_client_factory::http_client_factory,
            transport::{map_transport_error, CallHnapError, EmptyBatchError, HttpStatusError},
        },
        configuration::ConfigurationError,
        session::Session,
    },
};


const HNAP_AUTH_HEADER: &str = "hnap_auth";
const SOAP_ACTION_HEADER: &str = "soapaction";
const HNAP1_PATH: &str = "HNAP1/";
const LOGOUT_PATH: &str = "Logout.html";

/// Path of the artifact cookie created when the modem answers with a bare
/// `Set-Cookie: Secure`. It must never be sent back.
const STALE_COOKIE_PATH: &str = "/HNAP1";
const STALE_COOKIE_NAME: &str = "Secure";

pub const DEFAULT_HOST: &str = "192.168.100.1";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HNAP client bound to one modem and one session.
///
/// Every call mutates the session (cookies), hence `&mut self`: sharing a
/// client between tasks needs external synchronization.
pub struct Client {
    base_url: Url,
    host: String,
    http: reqwest::Client,
    session: Session,
    clock: Box<dyn Clock>,
}

impl Client {
    /// Client for `https://{host}/`.
    pub fn new(host: &str, timeout: Duration) -> Result<Self, BoxError> {
        Self::with_base_url(&format!("https://{host}/"), timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, BoxError> {
        let mut base_url = Url::parse(base_url)?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let host = match base_url.host_str() {
            Some(h) => h.to_string(),
            None => {
                return Err(Box::new(ConfigurationError::new(format!(
                    "{base_url} has no host"
                ))))
            }
        };

        Ok(Self {
            base_url,
            host,
            http: http_client_factory(timeout)?,
            session: Session::new(),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn endpoint(&self) -> Result<Url, BoxError> {
        Ok(self.base_url.join(HNAP1_PATH)?)
    }

    /// Invokes `action` with `payload` sent verbatim as JSON body.
    ///
    /// Actions the firmware only answers in a batch are sent as a
    /// single-action `GetMultipleHNAPs` call whose result is not checked.
    /// When `check` is set, anything but `{Action}Result == "OK"` is a
    /// [`CallHnapError`].
    pub async fn call_hnap(
        &mut self,
        action: &Action,
        payload: Option<&Value>,
        check: bool,
    ) -> Result<Value, BoxError> {
        if must_be_batched(action) {
            debug!("{action} must be called through {BATCH_ACTION}");
            return self
                .call_multiple_hnaps(std::slice::from_ref(action), false)
                .await;
        }

        self.dispatch(action, payload, check).await
    }

    /// Invokes every action of `actions` in a single `GetMultipleHNAPs` round trip.
    pub async fn call_multiple_hnaps(
        &mut self,
        actions: &[Action],
        check: bool,
    ) -> Result<Value, BoxError> {
        let envelope = MultipleHnaps::new(actions);

        if envelope.is_empty() {
            return Err(Box::new(EmptyBatchError));
        }

        let payload = wrap(&BATCH_ACTION, serde_json::to_value(&envelope)?);

        self.dispatch(&BATCH_ACTION, Some(&payload), check).await
    }

    /// Typed call: sends `{"<Action>": request}` and returns the
    /// `{Action}Response` body.
    pub async fn call<R: HnapRequest>(&mut self, request: &R) -> Result<R::Response, BoxError> {
        let action = request.action();
        let payload = wrap(&action, serde_json::to_value(request)?);

        let res = self.call_hnap(&action, Some(&payload), true).await?;

        if must_be_batched(&action) {
            let batch = res.get(BATCH_ACTION.response_key()).cloned().unwrap_or(Value::Null);
            return extract_response(&action, &batch);
        }

        extract_response(&action, &res)
    }

    /// Notifies the modem that the session ends. Local session state is kept.
    ///
    /// The modem answers with a plain page, only transport failures are
    /// reported.
    pub async fn logout(&self) -> Result<(), BoxError> {
        let url = self.base_url.join(LOGOUT_PATH)?;

        let mut request = self.http.get(url.clone());
        if let Some(cookies) = self.session.cookies.header_for(&self.host, url.path()) {
            request = request.header(COOKIE, cookies);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, url.as_str()))?;

        debug!("logout answered with status {}", resp.status());

        Ok(())
    }

    /// Logs in with `authenticator` and returns a guard that logs out when
    /// closed or dropped.
    pub async fn open(mut self, authenticator: &Authenticator) -> Result<HnapSession, BoxError> {
        authenticator.login(&mut self).await?;

        Ok(HnapSession {
            client: self,
            closed: false,
        })
    }

    /// Runs `work` between login and logout. Logout is attempted whether
    /// `work` succeeds or fails; the error of `work` takes precedence.
    pub async fn scoped<T, F>(self, authenticator: &Authenticator, work: F) -> Result<T, BoxError>
    where
        F: for<'a> FnOnce(
            &'a mut Client,
        ) -> Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'a>>,
    {
        let mut session = self.open(authenticator).await?;

        let result = work(&mut session.client).await;
        let closed = session.close().await;

        match (result, closed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(v), Ok(())) => Ok(v),
        }
    }

    async fn dispatch(
        &mut self,
        action: &Action,
        payload: Option<&Value>,
        check: bool,
    ) -> Result<Value, BoxError> {
        if self
            .session
            .cookies
            .remove(&self.host, STALE_COOKIE_PATH, STALE_COOKIE_NAME)
        {
            debug!("cleared stale {STALE_COOKIE_NAME} cookie");
        }

        let url = self.endpoint()?;
        let headers = self.headers(action, url.path())?;

        debug!("calling {action}");
        debug!("headers: {headers:?}");
        debug!("payload: {payload:?}");

        let mut request = self.http.post(url.clone()).headers(headers);
        if let Some(p) = payload {
            request = request.json(p);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, url.as_str()))?;

        for set_cookie in resp.headers().get_all(SET_COOKIE).iter() {
            if let Ok(value) = set_cookie.to_str() {
                self.session
                    .cookies
                    .store_set_cookie(value, &self.host, url.path());
            }
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(Box::new(HttpStatusError::new(status, url.to_string())));
        }

        let res = resp
            .json::<Value>()
            .await
            .map_err(|e| map_transport_error(e, url.as_str()))?;

        debug!("response: {res}");

        if check && !is_ok(action, &res) {
            return Err(Box::new(CallHnapError::new(action.clone(), res)));
        }

        Ok(res)
    }

    fn headers(&self, action: &Action, path: &str) -> Result<HeaderMap, BoxError> {
        let mut headers = HeaderMap::new();

        let auth = hnap_auth(action.as_str(), self.session.private_key(), self.clock.as_ref())?;

        headers.insert(
            HeaderName::from_static(HNAP_AUTH_HEADER),
            HeaderValue::from_str(&auth)?,
        );
        headers.insert(
            HeaderName::from_static(SOAP_ACTION_HEADER),
            HeaderValue::from_str(&soap_action_uri(action.as_str()))?,
        );

        if let Some(cookies) = self.session.cookies.header_for(&self.host, path) {
            debug!("cookies: {cookies}");
            headers.insert(COOKIE, HeaderValue::from_str(&cookies)?);
        }

        Ok(headers)
    }

    fn logout_task(&self) -> Option<impl Future<Output = ()> + Send + 'static> {
        let url = self.base_url.join(LOGOUT_PATH).ok()?;
        let cookies = self.session.cookies.header_for(&self.host, url.path());
        let http = self.http.clone();

        Some(async move {
            let mut request = http.get(url);
            if let Some(c) = cookies {
                request = request.header(COOKIE, c);
            }
            if let Err(e) = request.send().await {
                warn!("logout failed: {e}");
            }
        })
    }
}

/// Request body `{"<Action>": body}`.
fn wrap(action: &Action, body: Value) -> Value {
    let mut payload = Map::new();
    payload.insert(action.to_string(), body);
    Value::Object(payload)
}

/// `true` when `{Action}Response.{Action}Result` is `OK`.
pub fn is_ok(action: &Action, response: &Value) -> bool {
    response
        .get(action.response_key())
        .and_then(|r| r.get(action.result_key()))
        .and_then(Value::as_str)
        == Some("OK")
}

/// Deserializes the `{Action}Response` body of `response`.
pub fn extract_response<T: DeserializeOwned>(
    action: &Action,
    response: &Value,
) -> Result<T, BoxError> {
    let body = match response.get(action.response_key()) {
        Some(b) => b.clone(),
        None => {
            return Err(Box::new(ProtocolViolationError::new(format!(
                "{} is missing",
                action.response_key()
            ))))
        }
    };

    Ok(serde_json::from_value(body)?)
}

/// Logged-in client. Dereferences to [`Client`].
///
/// [`HnapSession::close`] logs out; a session dropped without being closed
/// schedules a best-effort logout on the current tokio runtime.
pub struct HnapSession {
    client: Client,
    closed: bool,
}

impl HnapSession {
    pub async fn close(mut self) -> Result<(), BoxError> {
        self.closed = true;
        self.client.logout().await
    }
}

impl Deref for HnapSession {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl DerefMut for HnapSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.client
    }
}

impl Drop for HnapSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let task = match self.client.logout_task() {
            Some(t) => t,
            None => return,
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("session dropped, logging out");
                handle.spawn(task);
            }
            Err(_) => warn!("session dropped outside of a runtime, logout skipped"),
        }
    }
}
