mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::{security, state_with, OWNER};
use todolist_web::state::SecurityConfig;
use todolist_web::test_support::{create_test_app_builder, session_bearer, ScriptedTokenProvider};
use todolist_web::token::{InMemoryTokenCache, TokenError};
use web_test_support::problem_details::assert_problem_details_from_service_response;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn list_backend(items: serde_json::Value) -> MockServer {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todolist"))
        .and(query_param("ownerid", OWNER))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(&backend)
        .await;
    backend
}

#[actix_web::test]
async fn test_get_list_requires_session() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider.clone(), Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(provider.attempts(), 0);
}

#[actix_web::test]
async fn test_get_list_rejects_foreign_session() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let foreign = SecurityConfig::new("some_other_secret_used_by_nobody");
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&foreign, Some(OWNER)).unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[actix_web::test]
async fn test_get_list_requires_owner_claim() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider.clone(), Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), None).unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_OWNER_CLAIM",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(provider.attempts(), 0);
}

#[actix_web::test]
async fn test_get_list_renders_items() {
    let backend = list_backend(serde_json::json!([
        {"Title": "Buy milk", "Owner": OWNER},
        {"Title": "Walk dog", "Owner": OWNER}
    ]))
    .await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({
            "items": [
                {"Title": "Buy milk", "Owner": OWNER},
                {"Title": "Walk dog", "Owner": OWNER}
            ]
        })
    );
}

#[actix_web::test]
async fn test_get_list_token_failure_renders_placeholder() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&backend)
        .await;
    let provider = Arc::new(ScriptedTokenProvider::failing(TokenError::provider(
        "invalid_client",
        "bad secret",
    )));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_message"], "UnexpectedError");
    assert_eq!(body["items"][0]["Title"], "(No items in list)");
    assert_eq!(body["items"][0]["Owner"], "");
}

#[actix_web::test]
async fn test_create_item_redirects_to_list() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/todolist"))
        .and(body_string(format!("Title=Buy+milk&Owner={OWNER}")))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend)
        .await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_form([("item", "Buy milk")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[actix_web::test]
async fn test_create_owner_comes_from_session_not_form() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string(format!("Title=Buy+milk&Owner={OWNER}")))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend)
        .await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_form([("item", "Buy milk"), ("Owner", "someone-else")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_create_empty_item_is_rejected_without_token() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider.clone(), Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_form([("item", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(provider.attempts(), 0);
    let received = backend.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[actix_web::test]
async fn test_create_missing_item_field_is_rejected() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider.clone(), Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_form([("other", "value")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(provider.attempts(), 0);
}

#[actix_web::test]
async fn test_create_non_form_body_is_bad_request() {
    let backend = MockServer::start().await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider.clone(), Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_json(serde_json::json!({"item": "Buy milk"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(provider.attempts(), 0);
}

#[actix_web::test]
async fn test_create_backend_failure_renders_placeholder() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend)
        .await;
    let provider = Arc::new(ScriptedTokenProvider::succeeding("tok"));
    let state = state_with(provider, Arc::new(InMemoryTokenCache::new()), &backend);
    let app = create_test_app_builder(state).build().await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::AUTHORIZATION, session_bearer(&security(), Some(OWNER)).unwrap()))
        .set_form([("item", "Buy milk")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_message"], "UnexpectedError");
}
