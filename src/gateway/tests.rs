use super::*;
use crate::error::ErrorKind;
use crate::request::{HttpMethod, MockHttpClient};
use crate::token::{MemoryTokenStore, TokenStore};
use sentimeter_shared::{
    Credentials, CurrentUserRequest, PredictRequest, RegisterRequest, UpdateProfileRequest,
};
use serde_json::json;
use std::sync::Arc;

const BASE: &str = "http://backend.test";

// =========================================================
// 辅助函数
// =========================================================

fn gateway_with(store: Arc<MemoryTokenStore>) -> Gateway<MockHttpClient> {
    Gateway::new(ClientConfig::new(BASE), MockHttpClient::new(), store)
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn predict() -> PredictRequest {
    PredictRequest {
        text: "the staff were lovely".to_string(),
    }
}

// =========================================================
// 请求构建
// =========================================================

#[test]
fn test_bearer_attached_when_token_present() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    let req = gateway.build(&predict()).unwrap();

    assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.url, url("/predict"));
    assert_eq!(req.method, HttpMethod::Post);
}

#[test]
fn test_bearer_omitted_when_token_absent() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::new()));
    let req = gateway.build(&predict()).unwrap();
    assert_eq!(req.header("Authorization"), None);
}

#[test]
fn test_login_is_form_encoded() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::new()));
    let creds = Credentials {
        username: "alice smith".to_string(),
        password: "p&ss=word".to_string(),
    };
    let req = gateway.build(&creds).unwrap();

    assert_eq!(
        req.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        req.body.as_deref(),
        Some("password=p%26ss%3Dword&username=alice%20smith")
    );
}

#[test]
fn test_get_has_no_body() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    let req = gateway.build(&CurrentUserRequest).unwrap();

    assert_eq!(req.method, HttpMethod::Get);
    assert!(req.body.is_none());
    assert_eq!(req.header("Content-Type"), None);
}

// =========================================================
// 成功响应
// =========================================================

#[tokio::test]
async fn test_success_payload_parsed() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway.client().mock_json(
        HttpMethod::Post,
        &url("/predict"),
        200,
        json!({"result": "positive", "score": 0.87}),
    );

    let resp = gateway.call(&predict()).await.unwrap();
    assert_eq!(resp.result, "positive");
    assert!((resp.score - 0.87).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unparsable_success_body_is_transport_error() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway
        .client()
        .mock_response(HttpMethod::Post, &url("/predict"), 200, "<html>");

    let err = gateway.call(&predict()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.user_message(), "An unexpected error occurred.");
}

#[tokio::test]
async fn test_raw_call_returns_success_body_untouched() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway
        .client()
        .mock_response(HttpMethod::Post, &url("/predict"), 201, "");

    let resp = gateway.call_raw(&predict()).await.unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, "");
}

#[tokio::test]
async fn test_raw_call_still_clears_rejected_token() {
    let store = Arc::new(MemoryTokenStore::with_token("stale"));
    let gateway = gateway_with(store.clone());
    gateway
        .client()
        .mock_response(HttpMethod::Post, &url("/predict"), 401, "");

    let err = gateway.call_raw(&predict()).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(store.get(), None);
}

// =========================================================
// 401 处理
// =========================================================

#[tokio::test]
async fn test_401_clears_token_regardless_of_body() {
    for body in [r#"{"detail":"token expired"}"#, "not json at all", ""] {
        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let gateway = gateway_with(store.clone());
        gateway
            .client()
            .mock_response(HttpMethod::Get, &url("/users/me"), 401, body);

        let err = gateway.call(&CurrentUserRequest).await.unwrap_err();

        assert!(err.is_session_expired());
        assert_eq!(err.user_message(), "Session expired. Please log in again.");
        assert_eq!(err.redirect(), Some(crate::route::AppRoute::Login));
        assert_eq!(store.get(), None);
    }
}

#[tokio::test]
async fn test_401_on_login_is_domain_error_and_keeps_token() {
    let store = Arc::new(MemoryTokenStore::with_token("existing"));
    let gateway = gateway_with(store.clone());
    gateway.client().mock_json(
        HttpMethod::Post,
        &url("/auth/login"),
        401,
        json!({"detail": "invalid credentials"}),
    );

    let creds = Credentials {
        username: "alice".to_string(),
        password: "password123".to_string(),
    };
    let err = gateway.call(&creds).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.user_message(), "invalid credentials");
    assert_eq!(store.get().as_deref(), Some("existing"));
}

// =========================================================
// 错误消息归一化
// =========================================================

#[tokio::test]
async fn test_404_detail_surfaces_exactly() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway
        .client()
        .mock_json(HttpMethod::Post, &url("/predict"), 404, json!({"detail": "not found"}));

    let err = gateway.call(&predict()).await.unwrap_err();
    assert_eq!(err.user_message(), "not found");
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_500_unparsable_body_mentions_status() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway.client().mock_response(
        HttpMethod::Post,
        &url("/predict"),
        500,
        "Internal Server Error",
    );

    let err = gateway.call(&predict()).await.unwrap_err();
    assert!(err.user_message().contains("500"));
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[tokio::test]
async fn test_message_field_used_when_detail_absent() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::new()));
    gateway.client().mock_json(
        HttpMethod::Post,
        &url("/auth/register"),
        409,
        json!({"message": "username taken"}),
    );

    let err = gateway.call(&RegisterRequest::default()).await.unwrap_err();
    assert_eq!(err.user_message(), "username taken");
}

#[test]
fn test_non_string_detail_falls_back() {
    // 校验错误列表形式的 detail 不是字符串
    let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
    assert_eq!(extract_error_message(body), None);
    assert_eq!(
        extract_error_message(r#"{"detail":[1],"message":"bad input"}"#).as_deref(),
        Some("bad input")
    );
    assert_eq!(extract_error_message(r#"{"detail":"  "}"#), None);
}

#[tokio::test]
async fn test_403_does_not_clear_token() {
    let store = Arc::new(MemoryTokenStore::with_token("abc"));
    let gateway = gateway_with(store.clone());
    gateway.client().mock_json(
        HttpMethod::Put,
        &url("/users/me"),
        403,
        json!({"detail": "forbidden"}),
    );

    let err = gateway
        .call(&UpdateProfileRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "forbidden");
    assert_eq!(store.get().as_deref(), Some("abc"));
}

// =========================================================
// 网络失败
// =========================================================

#[tokio::test]
async fn test_network_failure_is_distinct_from_401() {
    let store = Arc::new(MemoryTokenStore::with_token("abc"));
    let gateway = gateway_with(store.clone());
    gateway
        .client()
        .mock_network_error(HttpMethod::Post, &url("/predict"));

    let err = gateway.call(&predict()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.is_session_expired());
    assert_eq!(err.user_message(), "An unexpected error occurred.");
    // 网络失败不影响会话
    assert_eq!(store.get().as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let gateway = gateway_with(Arc::new(MemoryTokenStore::with_token("abc")));
    gateway.client().mock_response(HttpMethod::Post, &url("/predict"), 503, "");

    let _ = gateway.call(&predict()).await;
    assert_eq!(gateway.client().request_count(), 1);
}
