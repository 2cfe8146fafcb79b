//! Draft annotations API client against a mock HTTP server

mod common;

use std::time::Duration;

use annotations_publisher::clients::{
    build_http_client, DraftAnnotationsApiClient, DraftAnnotationsApiConfig,
    DraftAnnotationsClient,
};
use annotations_publisher::error::ClientError;
use annotations_publisher::models::{Annotation, DocumentHash};
use common::{ctx, sample_annotations, sample_annotations_json};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, timeout_ms: u64) -> DraftAnnotationsApiClient {
    DraftAnnotationsApiClient::new(
        DraftAnnotationsApiConfig {
            rw_endpoint: format!("{}/drafts/content/{{uuid}}/annotations", server.uri()),
            timeout_ms,
        },
        build_http_client(Duration::from_millis(timeout_ms)).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_annotations_returns_document_and_hash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drafts/content/uuid-1/annotations"))
        .and(query_param("sendHasBrand", "true"))
        .and(header("X-Request-Id", "tid_test"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Document-Hash", "hash-2")
                .set_body_json(sample_annotations_json()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = client(&server, 1000)
        .get_annotations(&ctx(), "uuid-1")
        .await
        .unwrap();

    assert_eq!(draft.hash, DocumentHash::new("hash-2"));
    assert_eq!(draft.annotations.annotations, vec![Annotation::new("p", "c")]);
}

#[tokio::test]
async fn test_get_annotations_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drafts/content/uuid-2/annotations"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server, 1000)
        .get_annotations(&ctx(), "uuid-2")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::NotFound { ref uuid } if uuid == "uuid-2"));
}

#[tokio::test]
async fn test_get_annotations_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server, 1000)
        .get_annotations(&ctx(), "uuid-1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus { status: 500, .. }));
    assert!(!err.is_timeout());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_get_annotations_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server, 1000)
        .get_annotations(&ctx(), "uuid-1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Serialization(_)));
}

#[tokio::test]
async fn test_get_annotations_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_annotations_json())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = client(&server, 100)
        .get_annotations(&ctx(), "uuid-1")
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_request_deadline_bounds_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_annotations_json())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let ctx = ctx().with_timeout(Duration::from_millis(100));
    let err = client(&server, 5000)
        .get_annotations(&ctx, "uuid-1")
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_save_annotations_sends_precondition_and_reads_new_hash() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/drafts/content/uuid-1/annotations"))
        .and(header("Previous-Document-Hash", "hash-1"))
        .and(header("X-Origin-System-Id", "http://cmdb.test/systems/methode-web-pub"))
        .and(header("X-Request-Id", "tid_test"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(sample_annotations_json()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Document-Hash", "hash-2")
                .set_body_json(json!({
                    "annotations": [{ "predicate": "p", "id": "c", "prefLabel": "Normalised" }]
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let saved = client(&server, 1000)
        .save_annotations(
            &ctx(),
            "uuid-1",
            &DocumentHash::new("hash-1"),
            &sample_annotations(),
        )
        .await
        .unwrap();

    assert_eq!(saved.hash, DocumentHash::new("hash-2"));
    assert_eq!(
        saved.annotations.annotations[0].pref_label.as_deref(),
        Some("Normalised")
    );
}

#[tokio::test]
async fn test_save_annotations_empty_body_returns_sent_document() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).insert_header("Document-Hash", "hash-3"))
        .mount(&server)
        .await;

    let saved = client(&server, 1000)
        .save_annotations(
            &ctx(),
            "uuid-1",
            &DocumentHash::new("hash-2"),
            &sample_annotations(),
        )
        .await
        .unwrap();

    assert_eq!(saved.annotations, sample_annotations());
    assert_eq!(saved.hash, DocumentHash::new("hash-3"));
}

#[tokio::test]
async fn test_save_annotations_created() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/drafts/content/uuid-new/annotations"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Document-Hash", "hash-1")
                .set_body_json(sample_annotations_json()),
        )
        .mount(&server)
        .await;

    let saved = client(&server, 1000)
        .save_annotations(&ctx(), "uuid-new", &DocumentHash::empty(), &sample_annotations())
        .await
        .unwrap();

    assert_eq!(saved.hash, DocumentHash::new("hash-1"));
}

#[tokio::test]
async fn test_save_annotations_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let err = client(&server, 100)
        .save_annotations(&ctx(), "uuid-1", &DocumentHash::empty(), &sample_annotations())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }));
}

#[tokio::test]
async fn test_save_annotations_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let err = client(&server, 1000)
        .save_annotations(
            &ctx(),
            "uuid-1",
            &DocumentHash::new("stale"),
            &sample_annotations(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus { status: 409, .. }));
}

#[tokio::test]
async fn test_gtg() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/__gtg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client(&server, 1000);
    assert_eq!(client.gtg_url(), format!("{}/__gtg", server.uri()));
    assert!(client.gtg().await.is_ok());
}

#[tokio::test]
async fn test_gtg_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/__gtg"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server, 1000).gtg().await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 503, .. }));
}

#[test]
fn test_endpoint_template_requires_placeholder() {
    let result = DraftAnnotationsApiClient::new(
        DraftAnnotationsApiConfig {
            rw_endpoint: "http://draft-store.test/drafts".to_string(),
            timeout_ms: 1000,
        },
        build_http_client(Duration::from_secs(1)).unwrap(),
    );

    assert!(matches!(result, Err(ClientError::InvalidEndpoint { .. })));
}

#[tokio::test]
async fn test_uuid_with_path_characters_stays_in_its_own_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/drafts/content/x%2F..%2Fother-uuid%2Fannotations%3F/annotations",
        ))
        .and(query_param("sendHasBrand", "true"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/drafts/content/other-uuid/annotations"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Document-Hash", "hash-other")
                .set_body_json(sample_annotations_json()),
        )
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, 1000);
    let err = client
        .get_annotations(&ctx(), "x/../other-uuid/annotations?")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));

    let err = client
        .save_annotations(&ctx(), "../other-uuid", &DocumentHash::empty(), &sample_annotations())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_dot_segment_uuid_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, 1000)
        .get_annotations(&ctx(), "..")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
}
