use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use anyx_client::{
    AnyxClient, AnyxConfig, ClientError, InvalidationReason, MemoryStorage, MockTransport,
    Session, SessionObserver, SessionService, SessionStorage, CONNECTIVITY_MESSAGE,
    SESSION_STORAGE_KEY,
};

/// Observer that records every notification it receives
#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<InvalidationReason>>,
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn session_invalidated(&self, reason: &InvalidationReason) {
        self.seen.lock().unwrap().push(*reason);
    }
}

struct Harness {
    client: AnyxClient,
    transport: Arc<MockTransport>,
    session: Arc<SessionService>,
    storage: Arc<MemoryStorage>,
}

fn harness(transport: MockTransport) -> Harness {
    harness_with_config(
        AnyxConfig::new("http://proxy.test", "deploy-1"),
        transport,
    )
}

fn harness_with_config(config: AnyxConfig, transport: MockTransport) -> Harness {
    let transport = Arc::new(transport);
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(SessionService::new(storage.clone()));
    let client = AnyxClient::with_parts(config, transport.clone(), session.clone());
    Harness {
        client,
        transport,
        session,
        storage,
    }
}

#[tokio::test]
async fn test_incomplete_config_fails_before_any_request_is_sent() {
    let h = harness_with_config(AnyxConfig::default(), MockTransport::new());

    let err = h.client.from("books").select("*").await.unwrap_err();

    assert!(matches!(err, ClientError::Configuration { .. }));
    assert_eq!(h.transport.calls(), 0);
}

#[tokio::test]
async fn test_missing_project_id_alone_also_fails_closed() {
    let config = AnyxConfig {
        base_url: Some("http://proxy.test".to_string()),
        project_id: None,
    };
    let h = harness_with_config(config, MockTransport::new());

    let err = h.client.from("books").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::configuration("project id is not set")
    );
    assert_eq!(h.transport.calls(), 0);
}

#[tokio::test]
async fn test_successful_select_returns_the_decoded_document() {
    let h = harness(
        MockTransport::new().with_response(200, "OK", r#"{"rows":[{"id":1,"title":"Dune"}]}"#),
    );

    let value = h
        .client
        .from("books")
        .select("id, title")
        .eq("title", "Dune")
        .execute()
        .await
        .unwrap();

    assert_eq!(value, json!({"rows": [{"id": 1, "title": "Dune"}]}));
    assert_eq!(h.transport.calls(), 1);

    let sent = h.transport.requests();
    assert_eq!(
        sent[0].url,
        "http://proxy.test/api/projects/deploy-1/query"
    );
    assert_eq!(
        sent[0].body,
        json!({
            "collection": "books",
            "operation": "select",
            "columns": "id, title",
            "filters": [{"column": "title", "operator": "eq", "value": "Dune"}],
            "order": [],
            "single": false
        })
    );
}

#[tokio::test]
async fn test_awaiting_the_builder_matches_execute() {
    let body = r#"{"rows":[{"id":1}]}"#;
    let via_execute = harness(MockTransport::new().with_response(200, "OK", body));
    let via_await = harness(MockTransport::new().with_response(200, "OK", body));

    let executed = via_execute
        .client
        .from("books")
        .select("*")
        .limit(1)
        .execute()
        .await
        .unwrap();
    let awaited = via_await
        .client
        .from("books")
        .select("*")
        .limit(1)
        .await
        .unwrap();

    assert_eq!(executed, awaited);
    assert_eq!(via_execute.transport.calls(), 1);
    assert_eq!(via_await.transport.calls(), 1);
    assert_eq!(
        via_execute.transport.requests()[0].body,
        via_await.transport.requests()[0].body
    );
}

#[tokio::test]
async fn test_stored_session_token_rides_along_as_a_bearer() {
    let h = harness(MockTransport::new());
    h.session.store(&Session::new("tok-1")).unwrap();

    h.client.from("books").select("*").await.unwrap();

    assert_eq!(h.transport.requests()[0].bearer.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_absent_session_sends_no_bearer() {
    let h = harness(MockTransport::new());

    h.client.from("books").select("*").await.unwrap();

    assert_eq!(h.transport.requests()[0].bearer, None);
}

#[tokio::test]
async fn test_malformed_session_record_is_treated_as_absent() {
    let h = harness(MockTransport::new());
    h.storage.write(SESSION_STORAGE_KEY, "not json at all");

    h.client.from("books").select("*").await.unwrap();

    assert_eq!(h.transport.calls(), 1);
    assert_eq!(h.transport.requests()[0].bearer, None);
}

#[tokio::test]
async fn test_rejected_token_clears_the_session_and_notifies_once() {
    let h = harness(MockTransport::new().with_response(401, "Unauthorized", "{}"));
    h.session.store(&Session::new("stale-token")).unwrap();

    let observer = Arc::new(RecordingObserver::default());
    h.session.subscribe(observer.clone());

    let err = h.client.from("books").select("*").await.unwrap_err();

    assert_eq!(err, ClientError::SessionExpired);
    assert_eq!(h.storage.read(SESSION_STORAGE_KEY), None);
    assert_eq!(h.session.current(), None);
    assert_eq!(
        observer.seen.lock().unwrap().as_slice(),
        &[InvalidationReason::Rejected { status: 401 }]
    );
}

#[tokio::test]
async fn test_forbidden_is_handled_like_unauthorized() {
    let h = harness(MockTransport::new().with_response(403, "Forbidden", "{}"));
    h.session.store(&Session::new("stale-token")).unwrap();

    let observer = Arc::new(RecordingObserver::default());
    h.session.subscribe(observer.clone());

    let err = h.client.from("books").delete().eq("id", "b-1").await.unwrap_err();

    assert_eq!(err, ClientError::SessionExpired);
    assert_eq!(
        observer.seen.lock().unwrap().as_slice(),
        &[InvalidationReason::Rejected { status: 403 }]
    );
}

#[tokio::test]
async fn test_client_errors_carry_the_proxy_message() {
    let h = harness(MockTransport::new().with_response(
        400,
        "Bad Request",
        r#"{"message":"unknown column 'titel'"}"#,
    ));

    let err = h.client.from("books").select("titel").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::client_query(400, "unknown column 'titel'")
    );
}

#[tokio::test]
async fn test_server_errors_fall_back_to_status_text_without_a_body_message() {
    let h = harness(MockTransport::new().with_response(
        502,
        "Bad Gateway",
        "<html>upstream sad</html>",
    ));

    let err = h.client.from("books").select("*").await.unwrap_err();

    assert_eq!(err, ClientError::server_query(502, "HTTP 502: Bad Gateway"));
}

#[tokio::test]
async fn test_transport_failures_surface_only_the_generic_message() {
    let h = harness(MockTransport::new().with_failure("dns error: no such host proxy.test"));

    let err = h.client.from("books").select("*").await.unwrap_err();

    assert_eq!(err, ClientError::network(CONNECTIVITY_MESSAGE));
    let rendered = err.to_string();
    assert!(!rendered.contains("dns"), "raw cause leaked: {}", rendered);
}

#[tokio::test]
async fn test_network_failure_does_not_touch_the_session() {
    let h = harness(MockTransport::new().with_failure("connection refused"));
    h.session.store(&Session::new("tok-1")).unwrap();

    let observer = Arc::new(RecordingObserver::default());
    h.session.subscribe(observer.clone());

    h.client.from("books").select("*").await.unwrap_err();

    assert_eq!(h.session.current(), Some(Session::new("tok-1")));
    assert!(observer.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unparseable_success_body_is_a_decode_error() {
    let h = harness(MockTransport::new().with_response(200, "OK", "not json"));

    let err = h.client.from("books").select("*").await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_each_call_through_from_builds_an_independent_query() {
    let h = harness(MockTransport::new());

    h.client
        .from("books")
        .select("*")
        .eq("author", "Le Guin")
        .await
        .unwrap();
    h.client.from("books").select("*").await.unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent[0].body["filters"].as_array().unwrap().len(), 1);
    assert_eq!(sent[1].body["filters"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_round_trip_sends_assignments_and_filters() {
    let h = harness(MockTransport::new().with_response(200, "OK", r#"{"rows":[]}"#));

    h.client
        .from("user_books")
        .update(json!({"read": true}))
        .eq("id", "ub-1")
        .await
        .unwrap();

    assert_eq!(
        h.transport.requests()[0].body,
        json!({
            "collection": "user_books",
            "operation": "update",
            "values": {"read": true},
            "filters": [{"column": "id", "operator": "eq", "value": "ub-1"}]
        })
    );
}
