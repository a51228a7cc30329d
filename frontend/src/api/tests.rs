use super::*;
use crate::testing::{TEST_TOKEN, client_with, signed_in_session, signed_out_session};
use hrms_shared::{Department, Page};

#[tokio::test]
async fn test_bearer_token_attached_when_signed_in() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(200, r#"{"success":true,"message":"","data":3}"#);

    let envelope: ApiResponse<u64> = client.get("/notifications/unread-count", &[]).await.unwrap();

    assert_eq!(envelope.data, Some(3));
    let req = transport.last_request();
    assert_eq!(req.url, "https://hr.example.com/api/notifications/unread-count");
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(
        req.header("authorization"),
        Some(format!("Bearer {}", TEST_TOKEN).as_str())
    );
    assert_eq!(req.header("Accept"), Some("application/json"));
    assert!(req.body.is_none());
}

#[tokio::test]
async fn test_no_authorization_header_without_session() {
    let (session, _) = signed_out_session();
    let (client, transport) = client_with(&session);
    transport.push_json(200, r#"{"success":true,"data":null}"#);

    let _: ApiResponse<serde_json::Value> = client.get("health", &[]).await.unwrap();

    let req = transport.last_request();
    assert_eq!(req.url, "https://hr.example.com/api/health");
    assert!(req.header(HEADER_AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_query_pairs_are_encoded() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(200, r#"{"success":true,"data":null}"#);

    let query = vec![
        ("page".to_string(), "0".to_string()),
        ("filterRequest.searchTerm".to_string(), "Ayşe".to_string()),
    ];
    let _: ApiResponse<serde_json::Value> = client.get("/employees", &query).await.unwrap();

    assert_eq!(
        transport.last_request().url,
        "https://hr.example.com/api/employees?page=0&filterRequest.searchTerm=Ay%C5%9Fe"
    );
}

#[tokio::test]
async fn test_failure_envelope_is_a_value() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(
        400,
        r#"{"success":false,"message":"Department name already exists","data":{"name":"duplicate"}}"#,
    );

    let envelope: ApiResponse<Department> = client
        .post("/departments", &serde_json::json!({"name": "IT"}))
        .await
        .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Department name already exists");
    assert!(envelope.data.is_none());
    let req = transport.last_request();
    assert_eq!(req.header(HEADER_CONTENT_TYPE), Some(CONTENT_TYPE_JSON));
    assert_eq!(req.body.as_deref(), Some(r#"{"name":"IT"}"#));
}

#[tokio::test]
async fn test_non_envelope_error_extracts_message() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(500, r#"{"status":500,"error":"Internal Server Error"}"#);

    let err = client
        .get::<Page<Department>>("/departments", &[])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn test_html_error_uses_generic_message() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(502, "<html>Bad Gateway</html>");

    let err = client.delete::<()>("/departments/1").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), crate::error::GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(200, "not json");

    let err = client.get::<u64>("/x", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_empty_success_body() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(204, "");

    let envelope: ApiResponse<()> = client.delete("/departments/4").await.unwrap();
    assert!(envelope.success);
    assert_eq!(transport.last_request().method, HttpMethod::Delete);
}

#[tokio::test]
async fn test_network_error_propagates() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_error(ApiError::Network("Failed to fetch".to_string()));

    let err = client.get::<u64>("/x", &[]).await.unwrap_err();
    assert_eq!(err, ApiError::Network("Failed to fetch".to_string()));
    // 网络错误不影响会话
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_clears_session_centrally() {
    let (session, storage) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(401, "");

    let err = client.get::<u64>("/attendance/7", &[]).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), SESSION_EXPIRED_MESSAGE);
    assert!(!session.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_unauthorized_without_token_is_plain_envelope() {
    // 登录接口的 401 属于业务失败，不应触发会话清理
    let (session, _) = signed_out_session();
    let (client, transport) = client_with(&session);
    transport.push_json(401, r#"{"success":false,"message":"Invalid credentials"}"#);

    let envelope: ApiResponse<serde_json::Value> = client
        .post("/auth/login", &serde_json::json!({}))
        .await
        .unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Invalid credentials");
}

#[tokio::test]
async fn test_stale_token_unauthorized_keeps_new_session() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    transport.push_json(401, r#"{"success":false,"message":"Token expired"}"#);

    let err = client
        .post_with_token::<serde_json::Value>("/auth/logout", "old.token.value")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("Token expired".to_string()));
    assert!(session.is_authenticated());
}
