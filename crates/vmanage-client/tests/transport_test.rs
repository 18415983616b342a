//! Tests for the reqwest transport against a local mock server

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use vmanage_client::{
    ApiRequest, HttpClient, HttpMethod, RequestBody, Transport, TransportSettings, VManageConfig,
    VManageError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn transport() -> anyhow::Result<HttpClient> {
    let config = VManageConfig::new("admin", "s3cret", "127.0.0.1");
    Ok(HttpClient::new(&config)?)
}

fn default_headers() -> Vec<(String, String)> {
    vmanage_client::default_headers()
}

#[test]
fn test_form_post_sends_urlencoded_credentials() -> anyhow::Result<()> {
    init_tracing();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/dataservice/j_security_check")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("j_username".into(), "admin".into()),
            Matcher::UrlEncoded("j_password".into(), "s3cret".into()),
        ]))
        .with_status(200)
        .create();

    let request = ApiRequest::new(
        HttpMethod::Post,
        format!("{}/dataservice/j_security_check", server.url()),
    )
    .with_headers(vec![(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    )])
    .with_body(RequestBody::Form(vec![
        ("j_username".to_string(), "admin".to_string()),
        ("j_password".to_string(), "s3cret".to_string()),
    ]));

    let response = transport()?.execute(&request)?;
    assert_eq!(response.status, 200);
    mock.assert();
    Ok(())
}

#[test]
fn test_get_returns_status_headers_and_body() -> anyhow::Result<()> {
    init_tracing();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/dataservice/system/device/vedges")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("x-request-id", "42")
        .with_body(r#"{"data":[]}"#)
        .create();

    let request = ApiRequest::new(
        HttpMethod::Get,
        format!("{}/dataservice/system/device/vedges", server.url()),
    )
    .with_headers(default_headers());

    let response = transport()?.execute(&request)?;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("x-request-id"), Some("42"));
    assert_eq!(response.body, r#"{"data":[]}"#);
    mock.assert();
    Ok(())
}

#[test]
fn test_error_status_is_a_response() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/dataservice/group/map/devices")
        .with_status(403)
        .with_body("<html>login</html>")
        .create();

    let request = ApiRequest::new(
        HttpMethod::Get,
        format!("{}/dataservice/group/map/devices", server.url()),
    );
    let response = transport()?.execute(&request)?;
    assert_eq!(response.status, 403);
    assert_eq!(response.status_text(), "Forbidden");
    assert!(matches!(
        response.error_for_status(),
        Err(VManageError::Authentication(_))
    ));
    Ok(())
}

#[test]
fn test_put_and_delete() -> anyhow::Result<()> {
    let mut server = Server::new();
    let put = server
        .mock("PUT", "/dataservice/template/device/abc")
        .match_body(Matcher::Json(json!({"templateName": "branch"})))
        .with_status(200)
        .create();
    let delete = server
        .mock("DELETE", "/dataservice/template/device/abc")
        .with_status(200)
        .create();

    let url = format!("{}/dataservice/template/device/abc", server.url());
    let transport = transport()?;

    let request = ApiRequest::new(HttpMethod::Put, url.clone())
        .with_headers(default_headers())
        .with_body(RequestBody::Json(json!({"templateName": "branch"})));
    assert_eq!(transport.execute(&request)?.status, 200);

    let request = ApiRequest::new(HttpMethod::Delete, url).with_headers(default_headers());
    assert_eq!(transport.execute(&request)?.status, 200);

    put.assert();
    delete.assert();
    Ok(())
}

#[test]
fn test_session_cookie_is_reused() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _login = server
        .mock("POST", "/dataservice/j_security_check")
        .with_status(200)
        .with_header("set-cookie", "JSESSIONID=abc123; Path=/")
        .create();
    let devices = server
        .mock("GET", "/dataservice/system/device/controllers")
        .match_header("cookie", Matcher::Regex("JSESSIONID=abc123".to_string()))
        .with_status(200)
        .create();

    let transport = transport()?;
    let login = ApiRequest::new(
        HttpMethod::Post,
        format!("{}/dataservice/j_security_check", server.url()),
    )
    .with_body(RequestBody::Form(vec![
        ("j_username".to_string(), "admin".to_string()),
        ("j_password".to_string(), "s3cret".to_string()),
    ]));
    transport.execute(&login)?;

    let request = ApiRequest::new(
        HttpMethod::Get,
        format!("{}/dataservice/system/device/controllers", server.url()),
    );
    transport.execute(&request)?;

    devices.assert();
    Ok(())
}

#[test]
fn test_unreachable_server_is_http_error() -> anyhow::Result<()> {
    let request =
        ApiRequest::new(HttpMethod::Get, "http://127.0.0.1:1/dataservice/group/map/devices");
    let result = transport()?.execute(&request);
    assert!(matches!(result, Err(VManageError::Http(_))));
    Ok(())
}

#[test]
fn test_tls_verification_follows_config() -> anyhow::Result<()> {
    let default = transport()?;
    assert_eq!(
        default.settings(),
        TransportSettings {
            accept_invalid_certs: true,
            timeout: None,
        },
        "Certificates should not be verified unless asked for"
    );

    let config = VManageConfig::new("admin", "s3cret", "127.0.0.1").with_verify_tls(true);
    let verifying = HttpClient::new(&config)?;
    assert!(!verifying.settings().accept_invalid_certs);
    Ok(())
}

#[test]
fn test_sub_second_timeout_still_reaches_server() -> anyhow::Result<()> {
    let mut server = Server::new();
    let mock = server.mock("GET", "/dataservice/group/map/devices").with_status(200).create();

    let config = VManageConfig::new("admin", "s3cret", "127.0.0.1")
        .with_timeout(Duration::from_millis(500));
    let transport = HttpClient::new(&config)?;
    assert_eq!(transport.settings().timeout, Some(Duration::from_millis(500)));

    let request = ApiRequest::new(
        HttpMethod::Get,
        format!("{}/dataservice/group/map/devices", server.url()),
    );
    assert_eq!(transport.execute(&request)?.status, 200);
    mock.assert();
    Ok(())
}

#[test]
fn test_json_body_without_headers_is_sent_as_json() -> anyhow::Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/dataservice/device/action/reboot")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"action": "reboot"})))
        .with_status(200)
        .create();

    let request = ApiRequest::new(
        HttpMethod::Post,
        format!("{}/dataservice/device/action/reboot", server.url()),
    )
    .with_body(RequestBody::Json(json!({"action": "reboot"})));
    assert_eq!(transport()?.execute(&request)?.status, 200);
    mock.assert();
    Ok(())
}
