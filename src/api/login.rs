use serde::{Deserialize, Serialize};

use super::{Action, HnapRequest};

/// Body of the `Login` action.
///
/// Both handshake phases send `Action = "request"`; the first one with an
/// empty `LoginPassword`, the second one with the challenge answer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoginPayload {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "LoginPassword")]
    pub login_password: String,
    #[serde(rename = "Captcha")]
    pub captcha: String,
    #[serde(rename = "PrivateLogin")]
    pub private_login: String,
}

impl LoginPayload {
    pub fn request(username: &str, login_password: String) -> Self {
        Self {
            action: "request".to_string(),
            username: username.to_string(),
            login_password,
            captcha: String::new(),
            private_login: "LoginPassword".to_string(),
        }
    }
}

impl HnapRequest for LoginPayload {
    type Response = LoginResponse;

    fn action(&self) -> Action {
        Action::Login
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoginResponse {
    #[serde(rename = "LoginResult")]
    pub login_result: String,
    #[serde(rename = "Challenge")]
    pub challenge: Option<String>,
    #[serde(rename = "Cookie")]
    pub cookie: Option<String>,
    #[serde(rename = "PublicKey")]
    pub public_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{LoginPayload, LoginResponse};

    #[test]
    fn request_payload_uses_device_field_names() {
        let payload = LoginPayload::request("admin", String::new());

        assert_eq!(
            json!({
                "Action": "request",
                "Username": "admin",
                "LoginPassword": "",
                "Captcha": "",
                "PrivateLogin": "LoginPassword"
            }),
            serde_json::to_value(&payload).unwrap()
        );
    }

    #[test]
    fn challenge_fields_are_optional() {
        let res: LoginResponse =
            serde_json::from_value(json!({ "LoginResult": "FAILED" })).unwrap();

        assert_eq!("FAILED", res.login_result);
        assert!(res.challenge.is_none());
        assert!(res.public_key.is_none());
        assert!(res.cookie.is_none());
    }
}
