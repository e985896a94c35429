use chrono::Utc;
use hmac::{digest::InvalidLength, Hmac, Mac};
use md5::Md5;
use mockall::automock;

type HmacMd5 = Hmac<Md5>;

const SOAP_NAMESPACE: &str = "http://purenetworks.com/HNAP1/";

/// Key signing the first login call, before any private key is negotiated.
pub const SENTINEL_PRIVATE_KEY: &str = "withoutloginkey";

/// Timestamps are reduced modulo this value before signing.
const TIMESTAMP_MODULUS: i64 = 2_000_000_000_000;

#[automock]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// `SOAPACTION` header value, quotes included.
pub fn soap_action_uri(action: &str) -> String {
    format!("\"{SOAP_NAMESPACE}{action}\"")
}

/// HMAC-MD5 of `message` keyed with `key`, as uppercase hexadecimal.
pub fn hmac_md5_upper(key: &str, message: &str) -> Result<String, InvalidLength> {
    let mut mac = HmacMd5::new_from_slice(key.as_bytes())?;

    mac.update(message.as_bytes());

    let code = mac.finalize().into_bytes();
    let res = code
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join("");

    Ok(res)
}

/// `HNAP_AUTH` header value for `action` signed at `millis`.
pub fn hnap_auth_at(action: &str, private_key: &str, millis: i64) -> Result<String, InvalidLength> {
    let timestamp = millis.rem_euclid(TIMESTAMP_MODULUS).to_string();
    let auth = hmac_md5_upper(
        private_key,
        format!("{timestamp}{}", soap_action_uri(action)).as_str(),
    )?;

    Ok(format!("{auth} {timestamp}"))
}

/// `HNAP_AUTH` header value for `action` signed now.
pub fn hnap_auth(
    action: &str,
    private_key: &str,
    clock: &dyn Clock,
) -> Result<String, InvalidLength> {
    hnap_auth_at(action, private_key, clock.now_millis())
}

#[cfg(test)]
mod tests {
    use super::{hmac_md5_upper, hnap_auth, hnap_auth_at, soap_action_uri, MockClock};

    #[test]
    fn soap_action_uri_is_quoted() {
        let uri = soap_action_uri("GetMotoStatusLog");

        assert_eq!("\"http://purenetworks.com/HNAP1/GetMotoStatusLog\"", uri);
        assert!(uri.starts_with('"') && uri.ends_with('"'));
    }

    #[test]
    fn hmac_md5_matches_rfc2202_vector() {
        assert_eq!(
            "750C783E6AB0B503EAA86E310A5DB738",
            hmac_md5_upper("Jefe", "what do ya want for nothing?").unwrap()
        );
    }

    #[test]
    fn auth_header_shape() {
        let header = hnap_auth_at("Login", "withoutloginkey", 1_712_345_678_901).unwrap();
        let (digest, timestamp) = header.split_once(' ').unwrap();

        assert_eq!(32, digest.len());
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert!(timestamp.len() <= 13);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn auth_header_rotates_timestamp() {
        let header = hnap_auth_at("Login", "key", 3_712_345_678_901).unwrap();

        assert!(header.ends_with(" 1712345678901"));
        assert_eq!(header, hnap_auth_at("Login", "key", 1_712_345_678_901).unwrap());
    }

    #[test]
    fn auth_header_signs_timestamp_and_action_uri() {
        let header = hnap_auth_at("Login", "key", 42).unwrap();
        let expected = hmac_md5_upper("key", "42\"http://purenetworks.com/HNAP1/Login\"").unwrap();

        assert_eq!(format!("{expected} 42"), header);
    }

    #[test]
    fn auth_header_uses_injected_clock() {
        let mut clock = MockClock::new();
        clock.expect_now_millis().times(2).returning(|| 1_000);

        let first = hnap_auth("GetMultipleHNAPs", "ABC", &clock).unwrap();
        let second = hnap_auth("GetMultipleHNAPs", "ABC", &clock).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with(" 1000"));
        assert_ne!(first, hnap_auth_at("GetMultipleHNAPs", "ABD", 1_000).unwrap());
    }
}
