//! Integration tests for the tracking client
//!
//! These tests run the tracker against a minimal in-process HTTP stub that
//! records every envelope it receives, verifying the end-to-end delivery
//! contract: one attempt per call, correct envelope shape, and no
//! caller-visible failures regardless of endpoint health.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use taskpulse_core::tracker::SESSION_ID_PREFIX;
use taskpulse_core::{IdentityProvider, Tracker, TrackerConfig, PLACEHOLDER_USER_ID};

/// Spawn a stub collection endpoint that answers every POST with `status`
/// and forwards each received JSON body to the returned channel.
async fn spawn_stub(status: u16) -> (SocketAddr, mpsc::UnboundedReceiver<serde_json::Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];

                // Read until end of headers
                let header_end = loop {
                    let n = match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                };

                let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);

                // Read the body
                while buf.len() < header_end + content_length {
                    let n = match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                }

                let body = &buf[header_end..header_end + content_length];
                if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
                    let _ = tx.send(json);
                }

                let reason = if (200..300).contains(&status) {
                    "OK"
                } else {
                    "Internal Server Error"
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status, reason
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (addr, rx)
}

fn tracker_for(addr: SocketAddr) -> Tracker {
    Tracker::with_placeholder_identity(TrackerConfig::new(format!("http://{}", addr))).unwrap()
}

#[tokio::test]
async fn track_event_makes_exactly_one_delivery() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    tracker
        .track_event(taskpulse_core::EventType::UserLogin, None, None)
        .await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["eventType"], "user_login");
    assert_eq!(envelope["userId"], PLACEHOLDER_USER_ID);
    assert!(envelope["sessionId"]
        .as_str()
        .unwrap()
        .starts_with(SESSION_ID_PREFIX));
    // No metadata was supplied, so the envelope must omit the field
    assert!(envelope.get("metadata").is_none());

    // The call has resolved; any further attempt would already be visible
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn explicit_session_id_passes_through_verbatim() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    tracker
        .track_event(
            taskpulse_core::EventType::PageView,
            None,
            Some("session_threaded_by_caller".to_string()),
        )
        .await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["sessionId"], "session_threaded_by_caller");
}

#[tokio::test]
async fn task_completed_wrapper_emits_full_envelope() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    let metadata = [("project".to_string(), serde_json::json!("alpha"))]
        .into_iter()
        .collect();
    tracker.track_task_completed("task-42", Some(metadata)).await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["eventType"], "task_completed");
    assert_eq!(envelope["userId"], PLACEHOLDER_USER_ID);
    assert!(envelope["sessionId"]
        .as_str()
        .unwrap()
        .starts_with(SESSION_ID_PREFIX));

    let metadata = &envelope["metadata"];
    assert_eq!(metadata["taskId"], "task-42");
    assert_eq!(metadata["project"], "alpha");
    let ts = metadata["timestamp"].as_str().expect("capture timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn page_view_wrapper_fixes_kind_and_page_field() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    tracker.track_page_view("home", None).await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["eventType"], "page_view");
    assert_eq!(envelope["metadata"]["page"], "home");
}

#[tokio::test]
async fn custom_event_wrapper_fixes_kind_and_event_name() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    tracker.track_custom_event("theme_changed", None).await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["eventType"], "custom");
    assert_eq!(envelope["metadata"]["eventName"], "theme_changed");
}

#[tokio::test]
async fn session_ids_differ_across_calls_without_explicit_id() {
    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = tracker_for(addr);

    tracker.track_page_view("home", None).await;
    tracker.track_page_view("home", None).await;

    let first = rx.recv().await.expect("first envelope");
    let second = rx.recv().await.expect("second envelope");
    assert_ne!(first["sessionId"], second["sessionId"]);
}

#[tokio::test]
async fn non_success_response_is_swallowed_after_one_attempt() {
    let (addr, mut rx) = spawn_stub(500).await;
    let tracker = tracker_for(addr);

    // Must resolve without panicking or surfacing the failure
    tracker.track_task_created("task-1", None).await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["eventType"], "task_created");
    // No retry on 5xx
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn transport_failure_is_invisible_to_the_caller() {
    // Bind then drop to get an address with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let tracker = tracker_for(addr);
    tracker.track_page_view("home", None).await;
    tracker
        .track_event(taskpulse_core::EventType::UserLogout, None, None)
        .await;
}

#[tokio::test]
async fn injected_identity_replaces_placeholder() {
    struct TestIdentity;

    impl IdentityProvider for TestIdentity {
        fn current_user_id(&self) -> String {
            "user-test-7".to_string()
        }
    }

    let (addr, mut rx) = spawn_stub(200).await;
    let tracker = Tracker::new(
        TrackerConfig::new(format!("http://{}", addr)),
        Arc::new(TestIdentity),
    )
    .unwrap();

    tracker.track_task_created("task-9", None).await;

    let envelope = rx.recv().await.expect("one envelope");
    assert_eq!(envelope["userId"], "user-test-7");
}
