use super::*;
use crate::session::{Authenticator, MemoryStore, SessionStore};
use crate::testing::{TEST_TOKEN, client_with, page_body, signed_in_session, signed_out_session};
use hrms_shared::{
    DepartmentRequest, HEADER_AUTHORIZATION, HttpMethod, LeaveDecision, Role, SortDirection,
};
use std::collections::BTreeMap;

const DEPARTMENT_JSON: &str = r#"{"id":3,"name":"Finance","description":null,"managerId":12,"managerName":"Elif Şahin","employeeCount":8}"#;

fn query_of(url: &str) -> BTreeMap<String, String> {
    url.split_once('?')
        .map(|(_, q)| q)
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.split_once('='))
        .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().into_owned()))
        .collect()
}

#[tokio::test]
async fn test_list_always_sends_search_term() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(200, &page_body(DEPARTMENT_JSON, 1, 0, 10, 1));

    let envelope = services.departments.list(&ListQuery::new(10)).await.unwrap();

    let page = envelope.into_result().unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Finance");
    assert_eq!(page.data[0].employee_count, 8);

    let req = transport.last_request();
    assert!(req.url.starts_with("https://hr.example.com/api/departments?"));
    let params = query_of(&req.url);
    assert_eq!(params.get("filterRequest.searchTerm"), Some(&String::new()));
    assert_eq!(params.get("page"), Some(&"0".to_string()));
    assert_eq!(params.get("size"), Some(&"10".to_string()));
}

#[tokio::test]
async fn test_list_renders_filters_and_sort() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(200, &page_body("", 0, 0, 10, 0));

    let mut query = ListQuery::new(10)
        .with_sort("startDate", SortDirection::Desc)
        .with_filter("status", "PENDING");
    query.set_search_term("Ayşe");
    let envelope = services.leaves.list(&query).await.unwrap();
    assert!(envelope.into_result().unwrap().is_empty());

    let params = query_of(&transport.last_request().url);
    assert_eq!(params.get("sortBy"), Some(&"startDate".to_string()));
    assert_eq!(params.get("sortDirection"), Some(&"desc".to_string()));
    assert_eq!(params.get("filterRequest.status"), Some(&"PENDING".to_string()));
    assert_eq!(params.get("filterRequest.searchTerm"), Some(&"Ayşe".to_string()));
}

#[tokio::test]
async fn test_create_and_update_send_camel_case_body() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(201, &format!(r#"{{"success":true,"data":{}}}"#, DEPARTMENT_JSON));
    transport.push_json(200, &format!(r#"{{"success":true,"data":{}}}"#, DEPARTMENT_JSON));

    let request = DepartmentRequest {
        name: "Finance".to_string(),
        description: None,
        manager_id: Some(12),
    };
    let created = services.departments.create(&request).await.unwrap();
    assert_eq!(created.into_result().unwrap().id, 3);
    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Post);
    assert!(req.url.ends_with("/departments"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["managerId"], 12);

    services.departments.update(3, &request).await.unwrap();
    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Put);
    assert!(req.url.ends_with("/departments/3"));
}

#[tokio::test]
async fn test_delete_returns_envelope() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(200, r#"{"success":true,"message":"Deleted","data":null}"#);
    transport.push_json(409, r#"{"success":false,"message":"Department has employees"}"#);

    assert!(services.departments.delete(3).await.unwrap().into_unit().is_ok());
    assert_eq!(
        services.departments.delete(4).await.unwrap().into_unit(),
        Err("Department has employees".to_string())
    );
    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Delete);
    assert!(req.url.ends_with("/departments/4"));
}

#[tokio::test]
async fn test_leave_decisions_and_personal_list() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    let leave = r#"{"id":5,"employeeId":2,"leaveType":"ANNUAL","startDate":"2024-07-01","endDate":"2024-07-05","status":"APPROVED"}"#;
    transport.push_json(200, &format!(r#"{{"success":true,"data":{}}}"#, leave));
    transport.push_json(200, &page_body(leave, 1, 0, 10, 1));

    let decision = LeaveDecision {
        comment: Some("İyi tatiller".to_string()),
    };
    let approved = services.leaves.approve(5, &decision).await.unwrap();
    let approved = approved.into_result().unwrap();
    assert_eq!(approved.days(), 5);
    let req = transport.last_request();
    assert!(req.url.ends_with("/leaves/5/approve"));
    assert_eq!(req.body.as_deref(), Some(r#"{"comment":"İyi tatiller"}"#));

    let fetch = services.leaves.mine_source();
    let page = fetch(ListQuery::new(10)).await.unwrap().into_result().unwrap();
    assert_eq!(page.total, 1);
    assert!(transport.last_request().url.contains("/leaves/my?"));
}

#[tokio::test]
async fn test_attendance_check_in_and_today() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    let record = r#"{"id":1,"employeeId":1,"date":"2024-05-02","checkIn":"2024-05-02T08:55:00","status":"PRESENT"}"#;
    transport.push_json(200, &format!(r#"{{"success":true,"data":{}}}"#, record));
    transport.push_json(200, r#"{"success":true,"message":"No record","data":null}"#);

    let attendance = services
        .attendance
        .check_in()
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(attendance.is_checked_in());
    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Post);
    assert!(req.url.ends_with("/attendance/check-in"));

    let today = services.attendance.today().await.unwrap();
    assert!(today.success);
    assert!(today.data.is_none());
}

#[tokio::test]
async fn test_notification_helpers() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(200, r#"{"success":true,"data":4}"#);
    transport.push_json(200, r#"{"success":true,"data":{"id":9,"read":true}}"#);

    let count = services.notifications.unread_count().await.unwrap();
    assert_eq!(count.data, Some(4));

    let marked = services.notifications.mark_read(9).await.unwrap();
    assert!(marked.success);
    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Patch);
    assert!(req.url.ends_with("/notifications/9/read"));
}

#[tokio::test]
async fn test_auth_service_as_authenticator() {
    let (session, _) = signed_out_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(
        200,
        r#"{"success":true,"message":"Login successful","data":{"token":"a.b.c","employeeId":15,"email":"mert@example.com","firstName":"Mert","lastName":"Aydın","role":"EMPLOYEE","mustChangePassword":true}}"#,
    );
    transport.push_json(200, r#"{"success":true,"data":null}"#);

    let logged_in = session
        .login(&services.auth, "mert@example.com", "123456789")
        .await
        .unwrap();
    assert_eq!(logged_in.role(), Role::Employee);
    assert!(logged_in.must_change_password());
    // 登录请求本身不携带 token
    assert!(transport.last_request().header(HEADER_AUTHORIZATION).is_none());

    session.logout(&services.auth).await;
    let req = transport.last_request();
    assert!(req.url.ends_with("/auth/logout"));
    assert_eq!(req.header(HEADER_AUTHORIZATION), Some("Bearer a.b.c"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_sign_out_reports_transport_failure() {
    let storage = std::rc::Rc::new(MemoryStore::new());
    let session = SessionStore::restore(storage);
    let (client, transport) = client_with(&session);
    let auth = AuthService::new(client);
    transport.push_error(crate::error::ApiError::Network("offline".to_string()));

    assert!(auth.sign_out(TEST_TOKEN).await.is_err());
}
