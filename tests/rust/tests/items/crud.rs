//! Item CRUD tests

use pretty_assertions::assert_eq;
use serde_json::json;
use tests::http::TestApp;
use uuid::Uuid;

#[tokio::test]
async fn greeting_and_health() {
    let app = TestApp::spawn().await;

    let greeting: serde_json::Value = app.get("/").await.json().await.unwrap();
    assert_eq!(greeting["Hello"], "itemstore");

    let health: serde_json::Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(health["status"], "ok");
    assert!(!health["version"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn create_then_fetch_item() {
    let app = TestApp::spawn().await;

    let created: serde_json::Value = app
        .post_json(
            "/api/v1/items",
            &json!({ "name": "Widget", "description": "A test widget" }),
        )
        .await
        .json()
        .await
        .unwrap();

    let id = created["id"].as_str().expect("missing id");
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["description"], "A test widget");

    let fetched: serde_json::Value = app
        .get(&format!("/api/v1/items/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_created_items() {
    let app = TestApp::spawn().await;

    for name in ["alpha", "beta", "gamma"] {
        let response = app
            .post_json("/api/v1/items", &json!({ "name": name }))
            .await;
        assert!(response.status().is_success());
    }

    let items: Vec<serde_json::Value> = app.get("/api/v1/items").await.json().await.unwrap();
    assert_eq!(items.len(), 3);

    let mut names: Vec<&str> = items.iter().map(|i| i["name"].as_str().unwrap()).collect();
    names.sort();
    assert_eq!(names, ["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn update_changes_name_and_description() {
    let app = TestApp::spawn().await;

    let created: serde_json::Value = app
        .post_json("/api/v1/items", &json!({ "name": "before" }))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let updated: serde_json::Value = app
        .client
        .put(app.url(&format!("/api/v1/items/{}", id)))
        .json(&json!({ "name": "after", "description": "now described" }))
        .send()
        .await
        .expect("PUT request failed")
        .json()
        .await
        .unwrap();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "after");
    assert_eq!(updated["description"], "now described");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn delete_removes_the_item() {
    let app = TestApp::spawn().await;

    let created: serde_json::Value = app
        .post_json("/api/v1/items", &json!({ "name": "doomed" }))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let deleted: serde_json::Value = app
        .client
        .delete(app.url(&format!("/api/v1/items/{}", id)))
        .send()
        .await
        .expect("DELETE request failed")
        .json()
        .await
        .unwrap();
    assert_eq!(deleted["deleted"], true);

    let response = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn unknown_item_returns_404_with_detail() {
    let app = TestApp::spawn().await;

    let id = Uuid::new_v4();
    let response = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains(&id.to_string()));
}

#[tokio::test]
async fn delete_unknown_item_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/items/{}", Uuid::new_v4())))
        .send()
        .await
        .expect("DELETE request failed");
    assert_eq!(response.status().as_u16(), 404);
}
