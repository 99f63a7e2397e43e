use super::*;
use crate::error::ErrorKind;
use crate::form::{Banner, FormFlow};
use crate::profile::{ProfileEditor, ProfileField};
use crate::request::{HttpMethod, MockHttpClient};
use crate::sentiment::Sentiment;
use crate::token::{MemoryTokenStore, TokenStore};
use crate::validation::Field;
use serde_json::json;
use std::sync::Arc;

const BASE: &str = "http://backend.test";

// =========================================================
// 辅助函数
// =========================================================

fn create_api(store: Arc<MemoryTokenStore>) -> SentimentApi<MockHttpClient> {
    SentimentApi::new(ClientConfig::new(BASE), MockHttpClient::new(), store)
}

fn client(api: &SentimentApi<MockHttpClient>) -> &MockHttpClient {
    api.gateway().client()
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn alice() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: "password123".to_string(),
    }
}

// =========================================================
// login 测试
// =========================================================

#[tokio::test]
async fn test_login_success_stores_token_and_schedules_redirect() {
    let store = Arc::new(MemoryTokenStore::new());
    let api = create_api(store.clone());
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/auth/login"),
        200,
        json!({"access_token": "abc"}),
    );

    let success = api.login(&alice()).await.unwrap();

    assert_eq!(store.get().as_deref(), Some("abc"));
    assert_eq!(success.redirect.route, AppRoute::Sentiment);
    assert_eq!(success.redirect.after, Duration::from_millis(1200));
    assert_eq!(success.message, LOGIN_SUCCESS_MESSAGE);

    let sent = client(&api).last_request().unwrap();
    assert_eq!(
        sent.body.as_deref(),
        Some("password=password123&username=alice")
    );
}

#[tokio::test]
async fn test_login_accepts_token_field() {
    let store = Arc::new(MemoryTokenStore::new());
    let api = create_api(store.clone());
    client(&api).mock_json(HttpMethod::Post, &url("/auth/login"), 200, json!({"token": "xyz"}));

    api.login(&alice()).await.unwrap();
    assert_eq!(store.get().as_deref(), Some("xyz"));
}

#[tokio::test]
async fn test_failed_login_keeps_store_and_shows_detail() {
    let store = Arc::new(MemoryTokenStore::new());
    let api = create_api(store.clone());
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/auth/login"),
        401,
        json!({"detail": "invalid credentials"}),
    );

    let mut flow = FormFlow::<LoginSuccess>::new();
    let ticket = flow.begin().unwrap();
    let result = api.login(&alice()).await;
    flow.complete(ticket, result);

    assert_eq!(store.get(), None);
    assert_eq!(flow.banner(), Some(&Banner::error("invalid credentials")));
    assert!(!flow.is_submit_disabled());
}

#[tokio::test]
async fn test_login_without_token_in_response() {
    let store = Arc::new(MemoryTokenStore::with_token("previous"));
    let api = create_api(store.clone());
    client(&api).mock_json(HttpMethod::Post, &url("/auth/login"), 200, json!({"ok": true}));

    let err = api.login(&alice()).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);
    assert_eq!(store.get().as_deref(), Some("previous"));
}

#[tokio::test]
async fn test_invalid_login_form_makes_no_request() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    let creds = Credentials {
        username: "alice".to_string(),
        password: String::new(),
    };

    let err = api.login(&creds).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.field_errors().and_then(|e| e.get(Field::Password)),
        Some("Password is required")
    );
    assert_eq!(client(&api).request_count(), 0);
}

// =========================================================
// register 测试
// =========================================================

#[tokio::test]
async fn test_register_posts_json_and_redirects_to_login() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/auth/register"),
        201,
        json!({"id": 1, "username": "alice"}),
    );

    let request = RegisterRequest {
        name: "Alice".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "password123".to_string(),
    };
    let success = api.register(&request).await.unwrap();

    assert_eq!(success.message, REGISTER_SUCCESS_MESSAGE);
    assert_eq!(success.redirect.route, AppRoute::Login);

    let sent = client(&api).last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Alice",
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123"
        })
    );
}

fn signup_request() -> RegisterRequest {
    RegisterRequest {
        name: "Alice".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn test_register_empty_created_body_is_success() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    client(&api).mock_response(HttpMethod::Post, &url("/auth/register"), 201, "");

    let success = api.register(&signup_request()).await.unwrap();

    assert_eq!(success.message, REGISTER_SUCCESS_MESSAGE);
    assert_eq!(success.redirect.route, AppRoute::Login);
}

#[tokio::test]
async fn test_register_non_object_body_is_success() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    client(&api).mock_response(HttpMethod::Post, &url("/auth/register"), 201, "\"created\"");

    let success = api.register(&signup_request()).await.unwrap();

    assert_eq!(success.message, REGISTER_SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_register_uses_server_message() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/auth/register"),
        200,
        json!({"message": "Welcome aboard"}),
    );

    let success = api.register(&signup_request()).await.unwrap();

    assert_eq!(success.message, "Welcome aboard");
}

#[tokio::test]
async fn test_register_conflict_still_fails() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/auth/register"),
        400,
        json!({"detail": "username already exists"}),
    );

    let err = api.register(&signup_request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.user_message(), "username already exists");
}

#[tokio::test]
async fn test_register_short_password_blocked() {
    let api = create_api(Arc::new(MemoryTokenStore::new()));
    let request = RegisterRequest {
        name: "Alice".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "short".to_string(),
    };

    let err = api.register(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(client(&api).request_count(), 0);
}

// =========================================================
// analyze 测试
// =========================================================

#[tokio::test]
async fn test_analysis_renders_label_and_confidence() {
    let api = create_api(Arc::new(MemoryTokenStore::with_token("abc")));
    client(&api).mock_json(
        HttpMethod::Post,
        &url("/predict"),
        200,
        json!({"result": "positive", "score": 0.87}),
    );

    let result = api.analyze("The service was excellent").await.unwrap();

    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.label(), "Positive");
    assert_eq!(result.confidence_display(), "0.870");

    let sent = client(&api).last_request().unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
}

#[tokio::test]
async fn test_analysis_session_expired_clears_token() {
    let store = Arc::new(MemoryTokenStore::with_token("stale"));
    let api = create_api(store.clone());
    client(&api).mock_response(HttpMethod::Post, &url("/predict"), 401, "");

    let err = api.analyze("hello").await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(err.redirect(), Some(AppRoute::Login));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_blank_text_never_sent() {
    let api = create_api(Arc::new(MemoryTokenStore::with_token("abc")));
    assert!(api.analyze("   ").await.is_err());
    assert_eq!(client(&api).request_count(), 0);
}

// =========================================================
// profile 测试
// =========================================================

#[tokio::test]
async fn test_profile_load_then_noop_save_is_blocked() {
    let api = create_api(Arc::new(MemoryTokenStore::with_token("abc")));
    client(&api).mock_json(
        HttpMethod::Get,
        &url("/users/me"),
        200,
        json!({"username": "bob", "email": "b@x.com", "name": "Bob"}),
    );

    let profile = api.fetch_profile().await.unwrap();
    let editor = ProfileEditor::new(profile);

    assert!(!editor.can_save(false));
    assert!(editor.pending_update().is_none());
    // 只有 GET 请求
    assert_eq!(client(&api).request_count(), 1);
}

#[tokio::test]
async fn test_profile_save_sends_only_editable_fields() {
    let api = create_api(Arc::new(MemoryTokenStore::with_token("abc")));
    client(&api).mock_json(
        HttpMethod::Put,
        &url("/users/me"),
        200,
        json!({"username": "bob", "email": "bob@x.com", "name": "Bob"}),
    );

    let mut editor = ProfileEditor::new(UserProfile {
        username: "bob".to_string(),
        email: "b@x.com".to_string(),
        name: "Bob".to_string(),
    });
    editor.set(ProfileField::Username, "mallory");
    editor.set(ProfileField::Email, "bob@x.com");

    let update = editor.pending_update().unwrap();
    let saved = api.update_profile(&update).await.unwrap();
    editor.commit(saved);

    let sent = client(&api).last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"email": "bob@x.com", "name": "Bob"}));
    assert!(!editor.is_dirty());
    assert_eq!(editor.snapshot().email, "bob@x.com");
}

#[tokio::test]
async fn test_profile_update_with_bad_email_blocked() {
    let api = create_api(Arc::new(MemoryTokenStore::with_token("abc")));
    let update = UpdateProfileRequest {
        email: "nope".to_string(),
        name: "Bob".to_string(),
    };

    let err = api.update_profile(&update).await.unwrap_err();
    assert_eq!(
        err.field_errors().and_then(|e| e.get(Field::Email)),
        Some("Invalid email address")
    );
    assert_eq!(client(&api).request_count(), 0);
}

// =========================================================
// logout 测试
// =========================================================

#[test]
fn test_logout_clears_token() {
    let store = Arc::new(MemoryTokenStore::with_token("abc"));
    let api = create_api(store.clone());

    assert_eq!(api.logout(), AppRoute::Login);
    assert_eq!(store.get(), None);
}
