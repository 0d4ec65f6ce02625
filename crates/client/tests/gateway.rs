use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use futures_util::{StreamExt, stream};
use serde_json::json;

use libris_auth::{Role, SessionManager};
use libris_client::error::{GENERIC_FAILURE, UNEXPECTED_RESPONSE};
use libris_client::{ApiClient, ApiConfig, ApiError, AuthorPayload, LibraryApi, LoginRequest, RegisterRequest};
use libris_core::{AuthorId, BookId};
use libris_forms::{AuthorDraft, RegisterDraft};

const TOKEN: &str = "tok-admin";
const AUTHOR_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";
const BOOK_ID: &str = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app()).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn client(&self, sessions: SessionManager) -> ApiClient {
        ApiClient::new(ApiConfig::new(&self.base_url), sessions)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn app() -> Router {
    Router::new()
        .route("/api/author", get(list_authors))
        .route(
            "/api/author/:id",
            get(truncated_unauthorized).put(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/book",
            get(|| async { (StatusCode::OK, "definitely not json") }),
        )
        .route(
            "/api/book/:id",
            get(|| async { StatusCode::FORBIDDEN }).delete(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Database unavailable"})),
                )
            }),
        )
        .route("/api/Account/login", post(login))
        .route(
            "/api/Account/register",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "title": "One or more validation errors occurred.",
                        "errors": {"Email": ["Taken."], "Password": ["Too short."]}
                    })),
                )
            }),
        )
}

async fn list_authors(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([{
        "id": AUTHOR_ID,
        "fullName": "Octavia E. Butler",
        "books": []
    }]))
    .into_response()
}

/// A 401 whose body breaks off after the headers have gone out.
async fn truncated_unauthorized() -> Response {
    let first = stream::iter([Ok::<_, std::io::Error>(r#"{"message":"tok"#)]);
    let reset = stream::once(async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        Err(std::io::Error::other("connection reset"))
    });
    (StatusCode::UNAUTHORIZED, Body::from_stream(first.chain(reset))).into_response()
}

async fn login(headers: HeaderMap) -> Response {
    if headers.contains_key("authorization") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "login must not carry a token"})),
        )
            .into_response();
    }
    Json(json!({"token": TOKEN, "username": "alice"})).into_response()
}

fn signed_in() -> SessionManager {
    let sessions = SessionManager::in_memory();
    sessions.establish_session(TOKEN, "alice", Role::Admin).unwrap();
    sessions
}

#[tokio::test]
async fn protected_calls_carry_the_bearer_token() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let authors = api.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].full_name, "Octavia E. Butler");

    let options = api.author_options().await.unwrap();
    assert_eq!(options[0].id, AUTHOR_ID.parse::<AuthorId>().unwrap());
}

#[tokio::test]
async fn missing_token_surfaces_as_unauthorized() {
    let srv = TestServer::spawn().await;
    let api = srv.client(SessionManager::in_memory());

    assert_eq!(api.list_authors().await.unwrap_err(), ApiError::Unauthorized);
}

#[tokio::test]
async fn unauthorized_survives_an_unreadable_body() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let id: AuthorId = AUTHOR_ID.parse().unwrap();
    assert_eq!(api.get_author(id).await.unwrap_err(), ApiError::Unauthorized);
}

#[tokio::test]
async fn login_never_sends_the_stored_token() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let res = api
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(res.token, TOKEN);
    assert_eq!(res.username, "alice");
    assert_eq!(res.role, None);
}

#[tokio::test]
async fn forbidden_is_distinct_from_unauthorized() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let id: BookId = BOOK_ID.parse().unwrap();
    assert_eq!(api.get_book(id).await.unwrap_err(), ApiError::Forbidden);
}

#[tokio::test]
async fn server_message_is_extracted() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let id: BookId = BOOK_ID.parse().unwrap();
    assert_eq!(
        api.delete_book(id).await.unwrap_err(),
        ApiError::failed("Database unavailable")
    );
}

#[tokio::test]
async fn register_validation_errors_are_joined() {
    let srv = TestServer::spawn().await;
    let api = srv.client(SessionManager::in_memory());

    let draft = RegisterDraft {
        email: "ann@example.com".to_string(),
        username: "ann".to_string(),
        password: "pw".to_string(),
        confirm_password: "pw".to_string(),
        ..RegisterDraft::default()
    };
    assert_eq!(
        api.register(&RegisterRequest::from(&draft)).await.unwrap_err(),
        ApiError::failed("Taken. Too short.")
    );
}

#[tokio::test]
async fn empty_success_bodies_are_fine_for_writes() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    let id: AuthorId = AUTHOR_ID.parse().unwrap();
    let payload = AuthorPayload::from(&AuthorDraft::split("Octavia", "Butler"));
    api.update_author(id, &payload).await.unwrap();
}

#[tokio::test]
async fn undecodable_success_body_is_a_failure() {
    let srv = TestServer::spawn().await;
    let api = srv.client(signed_in());

    assert_eq!(
        api.list_books().await.unwrap_err(),
        ApiError::failed(UNEXPECTED_RESPONSE)
    );
}

#[tokio::test]
async fn no_response_is_a_generic_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(ApiConfig::new(format!("http://{addr}/api")), signed_in());
    assert_eq!(
        api.list_authors().await.unwrap_err(),
        ApiError::failed(GENERIC_FAILURE)
    );
}
