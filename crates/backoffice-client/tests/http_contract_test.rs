// HTTP contract tests
//
// Verify the exact requests HttpTransport puts on the wire and how real HTTP
// responses map onto ClientError.

use backoffice_client::{ApiClient, ClientConfig, ClientError, HttpTransport};
use backoffice_core::{CreateBlogCategory, Page, PageRequest, Sort};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(Arc::new(HttpTransport::new(&server.uri())))
}

fn application(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "position": "Engineer",
        "status": "REVIEWING",
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-02T12:00:00Z"
    })
}

#[tokio::test]
async fn test_list_query_and_envelope() {
    let server = MockServer::start().await;
    let items: Vec<_> = (0..5).map(|i| application(&format!("app-{i}"))).collect();
    let envelope = serde_json::to_value(Page::new(items, &PageRequest::new(1, 5), 12)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/job-applications"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .and(query_param("sort", "createdAt,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).job_applications().list(1, 5).await.unwrap();

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.number, 1);
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.content[0].id, "app-0");
}

#[tokio::test]
async fn test_list_with_custom_sort() {
    let server = MockServer::start().await;
    let envelope =
        serde_json::to_value(Page::<serde_json::Value>::new(vec![], &PageRequest::new(0, 20), 0))
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/blog-categories"))
        .and(query_param("sort", "name,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .blog_categories()
        .list_with(PageRequest::new(0, 20).with_sort(Sort::asc("name")))
        .await
        .unwrap();
    assert!(page.empty);
}

#[tokio::test]
async fn test_delete_404_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/job-applications/abc-123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .job_applications()
        .delete(&"abc-123".to_string())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_success_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/job-applications/abc-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .job_applications()
        .delete(&"abc-123".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_error_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job-applications/abc-123"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .job_applications()
        .get(&"abc-123".to_string())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch applications");
}

#[tokio::test]
async fn test_create_posts_json_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/blog-categories"))
        .and(header("authorization", "Bearer t0k3n"))
        .and(body_json(json!({"name": "News", "slug": "news"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "cat-1",
            "name": "News",
            "slug": "news",
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let category = client(&server)
        .with_token(Some("t0k3n".to_string()))
        .blog_categories()
        .create(&CreateBlogCategory {
            name: "News".to_string(),
            slug: "news".to_string(),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(category.id, "cat-1");
}

#[tokio::test]
async fn test_update_uses_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/job-applications/app-1"))
        .and(body_json(json!({"status": "ACCEPTED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(application("app-1")))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .job_applications()
        .update_status("app-1", backoffice_core::ApplicationStatus::Accepted)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .users()
        .get(&"u1".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_delete_keeps_id_inside_its_resource() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/blogs/[^/]+$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .blogs()
        .delete(&"../users/u1".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dot_segment_id_is_rejected_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .blogs()
        .delete(&"..".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidId { .. }));
    assert_eq!(err.to_string(), "Invalid blog ID: \"..\"");
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    // Nothing listens on port 1
    let client = ApiClient::new(Arc::new(HttpTransport::new("http://127.0.0.1:1")));

    let err = client.blogs().list(0, 5).await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_from_config_uses_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .and(header("authorization", "Bearer from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::to_value(Page::<serde_json::Value>::new(vec![], &PageRequest::default(), 0))
                .unwrap(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_token("from-config");
    let client = ApiClient::from_config(&config).unwrap();

    client.tags().list(0, 10).await.unwrap();
}
