use std::fmt::Display;

/// The challenge was refused: the modem locks its login after failed attempts.
#[derive(Debug)]
pub struct LockedError;

impl Display for LockedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The modem interface is most likely locked due to failed login attempts. \
             Wait at least five minutes before attempting again."
        )
    }
}

impl std::error::Error for LockedError {}

/// The challenge answer was rejected, the credentials are most likely wrong.
#[derive(Debug)]
pub struct LoginFailedError {
    pub result: String,
}

impl LoginFailedError {
    pub fn new(result: String) -> Self {
        Self { result }
    }
}

impl Display for LoginFailedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "login failed with result {}", self.result)
    }
}

impl std::error::Error for LoginFailedError {}

/// The modem answered outside of the known protocol, e.g. a challenge
/// without public key. Not recoverable.
#[derive(Debug)]
pub struct ProtocolViolationError {
    reason: String,
}

impl ProtocolViolationError {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl Display for ProtocolViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected modem response: {}", self.reason)
    }
}

impl std::error::Error for ProtocolViolationError {}
