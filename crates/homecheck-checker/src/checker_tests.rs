use super::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use homecheck_config::ConfigError;
use homecheck_notify::{Delivery, NotifyError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::result::CheckMode;

/// Records every message; fails every call when `fail` is set.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            Err(NotifyError::Configuration(ConfigError::MissingCredential(
                "BOT_TOKEN".to_string(),
            )))
        } else {
            Ok(Delivery { message_id: Some(1) })
        }
    }
}

fn listing(server: &MockServer) -> ListingConfig {
    ListingConfig {
        base_url: server.uri(),
        timeout_secs: 1,
    }
}

async fn mount_count(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/properties-count/"))
        .and(query_param("location", "London"))
        .and(query_param("schemeType[]", "14"))
        .and(query_param("rentOrBuy", "2"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn checker(server: &MockServer, notifier: &Arc<RecordingNotifier>) -> AvailabilityChecker {
    AvailabilityChecker::new(&listing(server), notifier.clone()).unwrap()
}

#[test]
fn test_alert_message_embeds_count() {
    let msg = alert_message(3);
    assert!(msg.contains("3 properties available in London"));
    assert!(msg.contains("https://www.sharetobuy.com/"));
}

#[test]
fn test_invalid_base_url_rejected() {
    let config = ListingConfig {
        base_url: "::not a url::".to_string(),
        timeout_secs: 10,
    };
    let result = AvailabilityChecker::new(&config, Arc::new(RecordingNotifier::default()));
    assert!(matches!(result, Err(CheckError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_self_test_any_case_of_true() {
    let server = MockServer::start().await;
    // The listing endpoint must not be queried in self-test mode.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for flag in ["true", "True", "TRUE"] {
        let notifier = Arc::new(RecordingNotifier::default());
        let request = InvocationRequest::test_notify(flag);
        let result = checker(&server, &notifier).run(Some(&request)).await.unwrap();

        assert_eq!(result, CheckResult::test_passed());
        assert_eq!(notifier.messages(), vec![TEST_MESSAGE.to_string()]);
    }
    server.verify().await;
}

#[tokio::test]
async fn test_self_test_success_is_exact() {
    let server = MockServer::start().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let request = InvocationRequest::test_notify("true");

    let result = checker(&server, &notifier).run(Some(&request)).await.unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({"ok": true, "mode": "Test"})
    );
}

#[tokio::test]
async fn test_self_test_failure_reported() {
    let server = MockServer::start().await;
    let notifier = Arc::new(RecordingNotifier::failing());
    let request = InvocationRequest::test_notify("True");

    let result = checker(&server, &notifier).run(Some(&request)).await.unwrap();
    assert!(!result.ok);
    assert_eq!(result.mode, Some(CheckMode::Test));
    let error = result.error.unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("BOT_TOKEN"));
}

#[tokio::test]
async fn test_properties_available_notifies_once() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"count": 3}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.count_of_properties_available, Some(3));
    assert!(result.duration.unwrap() >= 0.0);
    assert!(result.mode.is_none());

    let sent = notifier.messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("3 properties available in London"));
}

#[tokio::test]
async fn test_zero_count_does_not_notify() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"count": 0}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert_eq!(result.count_of_properties_available, Some(0));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_non_test_request_runs_normal_mode() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"count": "2"}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());
    let request = InvocationRequest::test_notify("false");

    let result = checker(&server, &notifier).run(Some(&request)).await.unwrap();
    assert_eq!(result.count_of_properties_available, Some(2));
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_timeout_is_absorbed() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"data": {"count": 5}}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert_eq!(result, CheckResult::checked(0, 0.0));
    assert!(notifier.messages().is_empty());
}

/// Address nothing listens on: bind an ephemeral port, then release it.
fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Serves one response whose body is cut short of its Content-Length.
fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"data\"",
            );
            let _ = stream.flush();
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_connection_refused_is_absorbed() {
    let config = ListingConfig {
        base_url: closed_address(),
        timeout_secs: 1,
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let checker = AvailabilityChecker::new(&config, notifier.clone()).unwrap();

    let result = checker.run(None).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.count_of_properties_available, Some(0));
    assert_eq!(result.duration, Some(0.0));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_truncated_body_keeps_zero_duration() {
    let config = ListingConfig {
        base_url: truncated_body_server(),
        timeout_secs: 2,
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let checker = AvailabilityChecker::new(&config, notifier.clone()).unwrap();

    let result = checker.run(None).await.unwrap();
    assert_eq!(result, CheckResult::checked(0, 0.0));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_error_status_is_absorbed() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(503).set_body_json(serde_json::json!({"data": {"count": 9}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.count_of_properties_available, Some(0));
    assert!(result.duration.unwrap() >= 0.0);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_absorbed() {
    let server = MockServer::start().await;
    mount_count(&server, ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")).await;
    let notifier = Arc::new(RecordingNotifier::default());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert_eq!(result.count_of_properties_available, Some(0));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_missing_count_propagates() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"total": 3}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::default());

    let err = checker(&server, &notifier).run(None).await.unwrap_err();
    assert!(matches!(err, CheckError::MalformedResponse(_)));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notifier_failure_does_not_affect_result() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"count": 4}})),
    )
    .await;
    let notifier = Arc::new(RecordingNotifier::failing());

    let result = checker(&server, &notifier).run(None).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.count_of_properties_available, Some(4));
    assert!(result.error.is_none());
    assert_eq!(notifier.messages().len(), 1);
}
