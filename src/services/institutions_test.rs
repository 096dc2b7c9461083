use super::*;
use crate::models::{NewClass, NewComment, NewInstitution, NewResource};
use crate::net::test_helpers::MockTransport;
use reqwest::Method;
use serde_json::json;

fn service() -> (Arc<MockTransport>, EducationalInstitutionsService) {
    let mock = Arc::new(MockTransport::new());
    let service = EducationalInstitutionsService::new(mock.clone());
    (mock, service)
}

fn assert_get(mock: &MockTransport, path: &str) {
    let req = mock.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, path);
    assert_eq!(req.body, None);
}

fn assert_post(mock: &MockTransport, path: &str, body: serde_json::Value) {
    let req = mock.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, path);
    assert_eq!(req.body, Some(body));
}

// =============================================================================
// institutions
// =============================================================================

#[tokio::test]
async fn get_all_lists_institutions() {
    let (mock, service) = service();
    service.get_all().await.unwrap();
    assert_get(&mock, "/educational-institutions");
}

#[tokio::test]
async fn get_addresses_one_institution() {
    let (mock, service) = service();
    service.get("5").await.unwrap();
    assert_get(&mock, "/educational-institutions/5");
}

#[tokio::test]
async fn create_posts_to_root() {
    let (mock, service) = service();
    let data = NewInstitution { name: "ABC University".into(), address: "123 University Ave".into() };
    service.create(&data).await.unwrap();
    assert_post(
        &mock,
        "/educational-institutions",
        json!({ "name": "ABC University", "address": "123 University Ave" }),
    );
}

// =============================================================================
// classes
// =============================================================================

#[tokio::test]
async fn get_all_classes_path() {
    let (mock, service) = service();
    service.get_all_classes("5").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes");
}

#[tokio::test]
async fn create_class_path_and_body() {
    let (mock, service) = service();
    let data = NewClass { name: "Math 101".into(), teacher_id: "t1".into() };
    service.create_class("5", &data).await.unwrap();
    assert_post(
        &mock,
        "/educational-institutions/5/classes",
        json!({ "name": "Math 101", "teacher_id": "t1" }),
    );
}

#[tokio::test]
async fn get_class_path() {
    let (mock, service) = service();
    service.get_class("5", "2").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes/2");
}

// =============================================================================
// resources
// =============================================================================

#[tokio::test]
async fn get_all_resources_path() {
    let (mock, service) = service();
    service.get_all_resources("5", "2").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes/2/resources");
}

#[tokio::test]
async fn create_resource_path_and_body() {
    let (mock, service) = service();
    let data = NewResource { title: "Intro".into(), description: "Slides".into(), file_ids: vec![] };
    service.create_resource("5", "2", &data).await.unwrap();
    assert_post(
        &mock,
        "/educational-institutions/5/classes/2/resources",
        json!({ "title": "Intro", "description": "Slides", "file_ids": [] }),
    );
}

#[tokio::test]
async fn get_resource_path() {
    let (mock, service) = service();
    service.get_resource("5", "2", "r9").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes/2/resources/r9");
}

// =============================================================================
// comments
// =============================================================================

#[tokio::test]
async fn get_all_comments_path() {
    let (mock, service) = service();
    service.get_all_comments("5", "2").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes/2/comments");
}

#[tokio::test]
async fn create_comment_path_and_body() {
    let (mock, service) = service();
    let data = NewComment { content: "Great class".into(), author_id: "u1".into() };
    service.create_comment("5", "2", &data).await.unwrap();
    assert_post(
        &mock,
        "/educational-institutions/5/classes/2/comments",
        json!({ "content": "Great class", "author_id": "u1" }),
    );
}

#[tokio::test]
async fn get_comment_path() {
    let (mock, service) = service();
    service.get_comment("5", "2", "c7").await.unwrap();
    assert_get(&mock, "/educational-institutions/5/classes/2/comments/c7");
}

// =============================================================================
// pass-through
// =============================================================================

#[tokio::test]
async fn ids_are_interpolated_verbatim() {
    let (mock, service) = service();
    service.get_class("665f1c2e", "a-b_c").await.unwrap();
    assert_get(&mock, "/educational-institutions/665f1c2e/classes/a-b_c");
}

#[tokio::test]
async fn errors_propagate_untouched() {
    let mock = Arc::new(MockTransport::with_responses(vec![Err(ApiError::Status {
        status: 404,
        body: json!({ "detail": "Class not found" }),
    })]));
    let service = EducationalInstitutionsService::new(mock);
    let err = service.get_class("5", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("Class not found"));
}

#[tokio::test]
async fn unserializable_payload_fails_before_sending() {
    let (mock, service) = service();
    let mut bad = std::collections::HashMap::new();
    bad.insert((1, 2), "tuple keys are not JSON");
    let err = service.create(&bad).await.unwrap_err();
    assert!(matches!(err, ApiError::Encode(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn each_call_is_independent() {
    let (mock, service) = service();
    service.get_all().await.unwrap();
    service.get("1").await.unwrap();
    service.get_all_classes("1").await.unwrap();
    let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/educational-institutions",
            "/educational-institutions/1",
            "/educational-institutions/1/classes",
        ]
    );
}
