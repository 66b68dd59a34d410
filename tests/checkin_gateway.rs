use mockito::{Matcher, Server};
use qriva::domain::checkin::{CheckInOutcome, CheckInResult, MALFORMED_RESPONSE_MESSAGE};
use qriva::domain::payload::classify;
use qriva::gateways::apps_script::AppsScriptGateway;
use qriva::service::checkin_service::CheckInService;
use std::sync::Arc;

fn service(endpoint: String) -> CheckInService {
    CheckInService::new(Arc::new(AppsScriptGateway::new(endpoint, 5_000)))
}

#[tokio::test]
async fn success_reply_records_time_in() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/exec")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Regex(r#"^\{"uuid":".*REGULAR-123.*\\"status\\":\\"P\\""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"timeIn":"10:00"}"#)
        .expect(1)
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url()))
        .check_in(&classify("REGULAR-123"))
        .await;

    mock.assert_async().await;
    assert_eq!(
        out,
        CheckInResult::Success {
            time_in: Some("10:00".to_string()),
            status: Some("P".to_string()),
        }
    );
}

#[tokio::test]
async fn legacy_payload_is_sent_verbatim() {
    let raw = r#"{"type":"uuid","data":"77","status":"vip"}"#;
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/exec")
        .match_body(Matcher::Json(serde_json::json!({ "uuid": raw })))
        .with_status(200)
        .with_body(r#"{"success":true,"timeIn":"11:15"}"#)
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify(raw)).await;

    mock.assert_async().await;
    assert_eq!(
        out,
        CheckInResult::Success {
            time_in: Some("11:15".to_string()),
            status: Some("vip".to_string()),
        }
    );
}

#[tokio::test]
async fn already_scanned_keeps_prior_time_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(200)
        .with_body(r#"{"success":false,"alreadyScanned":true,"timeIn":"09:55","securityMessage":"Already checked in"}"#)
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify("VIP-S-9")).await;

    assert_eq!(
        out,
        CheckInResult::AlreadyScanned {
            time_in: Some("09:55".to_string()),
            security_message: Some("Already checked in".to_string()),
        }
    );
}

#[tokio::test]
async fn rejection_carries_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(200)
        .with_body(r#"{"success":false,"message":"Bad id"}"#)
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify("GENAD-5")).await;

    assert_eq!(out, CheckInResult::failure("Bad id"));
}

#[tokio::test]
async fn unparsable_body_is_generic_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(200)
        .with_body("<html>moved</html>")
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify("GENAD-5")).await;

    assert_eq!(out, CheckInResult::failure(MALFORMED_RESPONSE_MESSAGE));
}

#[tokio::test]
async fn server_error_is_failure_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/exec")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify("VIP-1")).await;

    mock.assert_async().await;
    assert_eq!(out, CheckInResult::failure("Failed to process Time In (HTTP 503)"));
}

#[tokio::test]
async fn unpaid_badge_never_reaches_gateway() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/exec").expect(0).create_async().await;

    let out = service(format!("{}/exec", server.url())).check_in(&classify("VIP-UP-42")).await;

    mock.assert_async().await;
    assert_eq!(out.outcome(), CheckInOutcome::Unpaid);
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_transport_error() {
    let out = service("http://127.0.0.1:1/exec".to_string())
        .check_in(&classify("REGULAR-1"))
        .await;

    match out {
        CheckInResult::Failure { error_message } => assert!(!error_message.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn silent_endpoint_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let gateway = AppsScriptGateway::new(format!("http://{addr}/exec"), 50);
    let out = CheckInService::new(Arc::new(gateway))
        .check_in(&classify("REGULAR-9"))
        .await;

    assert_eq!(out, CheckInResult::failure("gateway timeout"));
}
