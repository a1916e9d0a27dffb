//! Request correlation tests
//!
//! Every response must carry a `request_id` header; client-supplied ids
//! are echoed when adoption is enabled, and concurrent requests must
//! each see their own id.

use pretty_assertions::assert_eq;
use tests::http::TestApp;
use tests::{TraceConfig, REQUEST_ID_HEADER};

#[tokio::test]
async fn every_response_carries_a_nonempty_request_id() {
    let app = TestApp::spawn().await;

    for path in ["/", "/health", "/api/v1/items"] {
        let response = app.get(path).await;
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap_or_else(|| panic!("missing request_id header on {}", path))
            .to_str()
            .unwrap();
        assert!(!header.is_empty(), "empty request_id on {}", path);
    }
}

#[tokio::test]
async fn client_supplied_id_is_echoed() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header(REQUEST_ID_HEADER, "e2e-supplied-id")
        .send()
        .await
        .expect("GET request failed");

    assert_eq!(
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("missing request_id header")
            .to_str()
            .unwrap(),
        "e2e-supplied-id"
    );
}

#[tokio::test]
async fn generated_ids_are_distinct_across_requests() {
    let app = TestApp::spawn().await;

    let first = app.get("/health").await;
    let second = app.get("/health").await;

    let first_id = first.headers().get(REQUEST_ID_HEADER).unwrap().clone();
    let second_id = second.headers().get(REQUEST_ID_HEADER).unwrap().clone();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn adoption_disabled_generates_fresh_ids() {
    let app = TestApp::spawn_with(TraceConfig {
        adopt_client_id: false,
    })
    .await;

    let response = app
        .client
        .get(app.url("/health"))
        .header(REQUEST_ID_HEADER, "untrusted-client-id")
        .send()
        .await
        .expect("GET request failed");

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("missing request_id header")
        .to_str()
        .unwrap();
    assert_ne!(header, "untrusted-client-id");
    assert!(!header.is_empty());
}

#[tokio::test]
async fn concurrent_requests_keep_their_own_ids() {
    let app = TestApp::spawn().await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = app.client.clone();
        let url = app.url("/health");
        let supplied = format!("concurrent-{}", i);

        handles.push(tokio::spawn(async move {
            let response = client
                .get(url)
                .header(REQUEST_ID_HEADER, &supplied)
                .send()
                .await
                .expect("GET request failed");
            let echoed = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .expect("missing request_id header")
                .to_str()
                .unwrap()
                .to_string();
            (supplied, echoed)
        }));
    }

    for handle in handles {
        let (supplied, echoed) = handle.await.expect("task panicked");
        assert_eq!(supplied, echoed);
    }
}
