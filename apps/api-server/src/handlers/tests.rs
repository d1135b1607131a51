use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use blog_infra::InMemoryRepository;
use blog_shared::dto::BlogInfo;

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

fn state() -> AppState {
    AppState::in_memory(BlogInfo {
        title: "Test Blog".to_string(),
        description: None,
        author: Some("tester".to_string()),
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap()
}

#[actix_web::test]
async fn test_create_then_get_post() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"title": "My first post", "content": "Hello there"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let uri = location(&resp);
    assert!(uri.starts_with("/posts/"));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "My first post");
    assert_eq!(body["content"], "Hello there");
    assert_eq!(body["status"], "DRAFT");
    assert!(body["createdAt"].is_string());
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert!(!id.is_nil());
}

#[actix_web::test]
async fn test_get_unknown_post_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get().uri("/posts/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_with_blank_title_is_rejected() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"title": "", "content": "content"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"content": "missing title"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);

    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_list_posts_with_filters() {
    let state = state();
    let app = app!(state);

    for (title, content) in [("rust intro", "basics"), ("go intro", "all about rust")] {
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": title, "content": content}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/posts").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 2);

    let req = test::TestRequest::get().uri("/posts?q=rust").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 2);

    let req = test::TestRequest::get().uri("/posts?q=go").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 1);

    let req = test::TestRequest::get()
        .uri("/posts?status=REJECTED")
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get().uri("/posts?status=BOGUS").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_and_delete_post() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"title": "before", "content": "content"}))
        .to_request();
    let uri = location(&test::call_service(&app, req).await);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"title": "after", "content": "new content"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "after");

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"title": " ", "content": "new content"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"title": "again", "content": "content"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_post_comments() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"title": "commented", "content": "content"}))
        .to_request();
    let uri = location(&test::call_service(&app, req).await);
    let comments_uri = format!("{uri}/comments");

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .set_json(json!({"content": "nice"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .set_json(json!({"content": "a thoughtful comment"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(location(&resp).starts_with("/comments/"));

    let req = test::TestRequest::get().uri(&comments_uri).to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["content"], "a thoughtful comment");
    assert!(body[0].get("postId").is_none());
    assert!(body[0].get("post_id").is_none());

    let missing = format!("/posts/{}/comments", Uuid::new_v4());
    let req = test::TestRequest::get().uri(&missing).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&missing)
        .set_json(json!({"content": "a thoughtful comment"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_comment_on_post_removed_before_insert_is_not_found() {
    // The comment store no longer knows the post the lookup just found.
    let base = state();
    let state = AppState {
        comments: Arc::new(InMemoryRepository::new()),
        ..base
    };
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({"title": "short lived", "content": "content"}))
        .to_request();
    let uri = location(&test::call_service(&app, req).await);

    let req = test::TestRequest::post()
        .uri(&format!("{uri}/comments"))
        .set_json(json!({"content": "a thoughtful comment"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn test_info_health_and_request_id() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/info").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "Test Blog");
    assert_eq!(body["author"], "tester");
    assert!(body.get("description").is_none());

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let request_id = resp.headers().get("x-request-id").unwrap();
    assert_eq!(request_id.to_str().unwrap(), "req-123");
}
