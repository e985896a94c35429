use authentication_error::{LockedError, LoginFailedError, ProtocolViolationError};
use log::{debug, info};
use password_provider::PasswordProvider;
use serde_json::json;
use signing::hmac_md5_upper;

use crate::{
    api::{Action, LoginPayload, LoginResponse},
    core::{
        client::{extract_response, Client},
        session::Cookie,
    },
};

pub mod authentication_error;
pub mod password_provider;
pub mod signing;


const ROOT_PATH: &str = "/";
const UID_COOKIE: &str = "uid";
const PRIVATE_KEY_COOKIE: &str = "PrivateKey";

/// Paths where a browser holds the empty-name `Secure` cookie after login.
/// The modem's own `Set-Cookie` for this slot is ambiguous, so it is set
/// up front.
pub const DECOY_COOKIE_PATHS: [&str; 7] =
    ["/font", "/js/SOAP", "/js", "/css", "/", "/image", "/HNAP1"];
const DECOY_COOKIE_VALUE: &str = "Secure";

struct Challenge {
    public_key: String,
    challenge: String,
}

/// Runs the two-phase HNAP login against a [`Client`].
pub struct Authenticator {
    username: String,
    password_provider: Box<dyn PasswordProvider>,
}

impl Authenticator {
    pub fn new(username: String, password_provider: Box<dyn PasswordProvider>) -> Self {
        Self {
            username,
            password_provider,
        }
    }

    /// Negotiates a private key and installs it in the client session.
    ///
    /// Phase one asks for a challenge while signing with the sentinel key,
    /// phase two answers it signing with the derived key. Cookies stored in
    /// phase one are kept when phase two is rejected. Any previous session
    /// state is dropped first, so logging in again after `UN-AUTH` starts
    /// from the sentinel key.
    pub async fn login(
        &self,
        client: &mut Client,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!("login in");

        let password = self.password_provider.get().await?;

        client.session_mut().reset();

        let challenge = self.request_challenge(client).await?;

        let private_key = hmac_md5_upper(
            format!("{}{}", challenge.public_key, password).as_str(),
            challenge.challenge.as_str(),
        )?;

        self.install_private_key(client, private_key.clone());

        let login_password = hmac_md5_upper(private_key.as_str(), challenge.challenge.as_str())?;

        self.answer_challenge(client, login_password).await?;

        info!("logged in as {}", self.username);
        Ok(())
    }

    async fn request_challenge(
        &self,
        client: &mut Client,
    ) -> Result<Challenge, Box<dyn std::error::Error + Send + Sync>> {
        debug!("requesting login challenge");

        let payload = LoginPayload::request(&self.username, String::new());
        let res = client
            .call_hnap(&Action::Login, Some(&json!({ "Login": payload })), false)
            .await?;

        let res: LoginResponse = extract_response(&Action::Login, &res)?;

        if res.login_result == "FAILED" {
            return Err(Box::new(LockedError));
        }

        let (public_key, challenge) = match (res.public_key, res.challenge) {
            (Some(p), Some(c)) => (p, c),
            _ => {
                return Err(Box::new(ProtocolViolationError::new(
                    "login challenge without PublicKey or Challenge".to_string(),
                )))
            }
        };

        if let Some(uid) = res.cookie {
            let host = client.host().to_string();
            client
                .session_mut()
                .cookies
                .set(Cookie::new(UID_COOKIE, &uid, &host, ROOT_PATH));
        }

        Ok(Challenge {
            public_key,
            challenge,
        })
    }

    fn install_private_key(&self, client: &mut Client, private_key: String) {
        debug!("installing private key");

        let host = client.host().to_string();
        let session = client.session_mut();

        session
            .cookies
            .set(Cookie::new(PRIVATE_KEY_COOKIE, &private_key, &host, ROOT_PATH));

        for path in DECOY_COOKIE_PATHS {
            session
                .cookies
                .set(Cookie::new("", DECOY_COOKIE_VALUE, &host, path).http_only());
        }

        session.set_private_key(private_key);
    }

    async fn answer_challenge(
        &self,
        client: &mut Client,
        login_password: String,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!("answering login challenge");

        let payload = LoginPayload::request(&self.username, login_password);
        let res = client
            .call_hnap(&Action::Login, Some(&json!({ "Login": payload })), false)
            .await?;

        let res: LoginResponse = extract_response(&Action::Login, &res)?;

        if res.login_result != "OK" {
            return Err(Box::new(LoginFailedError::new(res.login_result)));
        }

        Ok(())
    }
}
