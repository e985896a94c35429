use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::core::{
    authenticator::{
        authentication_error::LoginFailedError, password_provider::StaticProvider, Authenticator,
    },
    client::Client,
    common::transport::CallHnapError,
    configuration::{Configuration, ConfigurationError},
    core::{batch, call, clear_log, connect, login_check, reboot, render},
};

fn client_for(mock_server: &MockServer) -> Client {
    Client::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap()
}

fn authenticator() -> Authenticator {
    Authenticator::new(
        "admin".to_string(),
        Box::new(StaticProvider::new("pass".to_string())),
    )
}

async fn mount_login(mock_server: &MockServer, second_result: &str) {
    Mock::given(method("POST"))
        .and(path("/HNAP1/"))
        .and(header("soapaction", "\"http://purenetworks.com/HNAP1/Login\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LoginResponse": {
                "Challenge": "a",
                "LoginResult": "OK",
                "PublicKey": "a"
            }
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/HNAP1/"))
        .and(header("soapaction", "\"http://purenetworks.com/HNAP1/Login\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "LoginResponse": { "LoginResult": second_result } })),
        )
        .up_to_n_times(1)
        .mount(mock_server)
        .await;
}

async fn mount_action(mock_server: &MockServer, action: &str, response: Value) {
    Mock::given(method("POST"))
        .and(path("/HNAP1/"))
        .and(header(
            "soapaction",
            format!("\"http://purenetworks.com/HNAP1/{action}\"").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mount_logout(mock_server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/Logout.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn call_decodes_tables() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_action(
        &mock_server,
        "GetMultipleHNAPs",
        json!({
            "GetMultipleHNAPsResponse": {
                "GetMotoStatusLogResponse": {
                    "MotoStatusLogList": "a^b}-{c^d",
                    "GetMotoStatusLogResult": "OK"
                },
                "GetMultipleHNAPsResult": "OK"
            }
        }),
    )
    .await;
    mount_logout(&mock_server, 1).await;

    let res = call(
        client_for(&mock_server),
        &authenticator(),
        "GetMotoStatusLog",
        None,
        true,
    )
    .await
    .unwrap();

    assert_eq!(
        json!([["a", "b"], ["c", "d"]]),
        res["GetMultipleHNAPsResponse"]["GetMotoStatusLogResponse"]["MotoStatusLogList"]
    );
}

#[tokio::test]
async fn call_rejects_invalid_payload() {
    let mock_server = MockServer::start().await;

    let err = call(
        client_for(&mock_server),
        &authenticator(),
        "SetMotoLagStatus",
        Some("{not json"),
        true,
    )
    .await
    .unwrap_err();

    assert!(err.downcast_ref::<serde_json::Error>().is_some());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_sends_one_request() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_action(
        &mock_server,
        "GetMultipleHNAPs",
        json!({ "GetMultipleHNAPsResponse": { "GetMultipleHNAPsResult": "OK" } }),
    )
    .await;
    mount_logout(&mock_server, 1).await;

    let res = batch(
        client_for(&mock_server),
        &authenticator(),
        &["GetHomeAddress".to_string(), "GetHomeConnection".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(
        "OK",
        res["GetMultipleHNAPsResponse"]["GetMultipleHNAPsResult"]
    );
}

#[tokio::test]
async fn clear_log_test() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_action(
        &mock_server,
        "SetStatusLogSettings",
        json!({ "SetStatusLogSettingsResponse": { "SetStatusLogSettingsResult": "OK" } }),
    )
    .await;
    mount_logout(&mock_server, 1).await;

    clear_log(client_for(&mock_server), &authenticator())
        .await
        .unwrap();
}

#[tokio::test]
async fn reboot_test() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_action(
        &mock_server,
        "SetStatusSecuritySettings",
        json!({ "SetStatusSecuritySettingsResponse": { "SetStatusSecuritySettingsResult": "OK" } }),
    )
    .await;
    mount_logout(&mock_server, 1).await;

    reboot(client_for(&mock_server), &authenticator())
        .await
        .unwrap();
}

#[tokio::test]
async fn login_check_test() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_logout(&mock_server, 1).await;

    login_check(client_for(&mock_server), &authenticator())
        .await
        .unwrap();
}

#[tokio::test]
async fn login_check_reports_wrong_password() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "FAILED").await;
    mount_logout(&mock_server, 0).await;

    let err = login_check(client_for(&mock_server), &authenticator())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<LoginFailedError>().is_some());
}

#[test]
fn connect_needs_a_password() {
    let err = match connect(&Configuration::default()) {
        Ok(_) => panic!("connected without a password"),
        Err(e) => e,
    };
    assert!(err.downcast_ref::<ConfigurationError>().is_some());

    let conf = Configuration::default().merge(None, None, Some("secret".to_string()));
    let (client, _) = connect(&conf).unwrap();
    assert_eq!("192.168.100.1", client.host());
}

#[test]
fn render_is_pretty() {
    let rendered = render(&json!({ "a": 1 })).unwrap();
    assert_eq!("{\n  \"a\": 1\n}", rendered);
}

#[tokio::test]
async fn reboot_logs_out_when_refused() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "OK").await;
    mount_action(
        &mock_server,
        "SetStatusSecuritySettings",
        json!({ "SetStatusSecuritySettingsResponse": { "SetStatusSecuritySettingsResult": "ERROR" } }),
    )
    .await;
    mount_logout(&mock_server, 1).await;

    let err = reboot(client_for(&mock_server), &authenticator())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<CallHnapError>().is_some());

    let logouts = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/Logout.html")
        .count();
    assert_eq!(1, logouts);
}
