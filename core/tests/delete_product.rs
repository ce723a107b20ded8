use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use httpmock::Method::DELETE;
use httpmock::MockServer;
use product_proxy_core::proxy::{router, AppState, BackendClient};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn app(origin: String) -> Router {
    let backend = BackendClient::new(origin, None).expect("backend client");
    router(AppState::new(backend))
}

fn delete_request(id: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/backend/product/{id}"));
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// An address nothing is listening on.
fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn backend_success_returns_status_json() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/42");
            then.status(200).body("deleted");
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("42", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"status": 200}));
    mock.assert_async().await;
}

#[tokio::test]
async fn backend_success_status_is_mirrored() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/7");
            then.status(202);
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("7", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"status": 202}));
}

#[tokio::test]
async fn backend_not_found_is_relayed_verbatim() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/missing");
            then.status(404).body("Not found");
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("missing", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Not found");
}

#[tokio::test]
async fn backend_server_error_is_relayed_verbatim() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/1");
            then.status(500).body("Server error");
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Server error");
}

#[tokio::test]
async fn backend_json_error_body_is_not_rewritten() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/9");
            then.status(403).body(r#"{"message":"forbidden"}"#);
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("9", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_string(response).await, r#"{"message":"forbidden"}"#);
}

#[tokio::test]
async fn forwards_cookie_and_content_type() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/products/42")
                .header("cookie", "session=abc")
                .header("content-type", "application/json");
            then.status(200);
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("42", Some("session=abc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_cookie_is_sent_empty() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/products/42")
                .header_exists("cookie");
            then.status(200);
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("42", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_backend_returns_generic_error() {
    let response = app(closed_origin())
        .oneshot(delete_request("42", Some("session=abc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"error": "Failed to delete product"}));
}

#[tokio::test]
async fn other_methods_are_not_routed() {
    let response = app(closed_origin())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/backend/product/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_endpoints_report_ok() {
    for path in ["/healthz", "/health"] {
        let response = app(closed_origin())
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }
}

/// Serve the router on a real socket so hyper's body rules apply.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn backend_no_content_still_delivers_status_json() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/products/42");
            then.status(204);
        })
        .await;

    let proxy = serve(app(backend.base_url())).await;
    let response = reqwest::Client::new()
        .delete(format!("{proxy}/api/backend/product/42"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(body, json!({"status": 204}));
}

#[tokio::test]
async fn split_cookie_headers_are_forwarded_together() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/products/42")
                .header("cookie", "a=1; b=2");
            then.status(200);
        })
        .await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/backend/product/42")
        .header(header::COOKIE, "a=1")
        .header(header::COOKIE, "b=2")
        .body(Body::empty())
        .unwrap();
    let response = app(backend.base_url()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_identifier_reaches_backend() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(DELETE);
            then.status(400).body("bad id");
        })
        .await;

    let response = app(backend.base_url())
        .oneshot(delete_request("%FF", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "bad id");
    mock.assert_async().await;
}
