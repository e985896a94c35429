use crate::core::authenticator::signing::SENTINEL_PRIVATE_KEY;

pub mod cookie_jar;

pub use cookie_jar::{Cookie, CookieJar};

/// Per-client state negotiated with the modem.
///
/// Each client owns its session; nothing is shared between clients.
#[derive(Clone, Debug)]
pub struct Session {
    private_key: String,
    pub cookies: CookieJar,
}

impl Session {
    pub fn new() -> Self {
        Self {
            private_key: SENTINEL_PRIVATE_KEY.to_string(),
            cookies: CookieJar::default(),
        }
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn set_private_key(&mut self, private_key: String) {
        self.private_key = private_key;
    }

    /// Back to the sentinel key with no cookies, as before any login.
    pub fn reset(&mut self) {
        self.private_key = SENTINEL_PRIVATE_KEY.to_string();
        self.cookies = CookieJar::default();
    }

    /// `true` once a login handshake replaced the sentinel key.
    pub fn has_private_key(&self) -> bool {
        self.private_key != SENTINEL_PRIVATE_KEY
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
