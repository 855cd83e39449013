//! API integration tests
//!
//! Require a running server with its database and Redis. The librarian
//! credentials must match the ones the server bootstrapped with.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("LIBRIS_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Client keeping the session cookie between requests
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// Value unique to this test run
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}{}", prefix, nanos)
}

async fn login(client: &Client, email: &str, password: &str) -> StatusCode {
    client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request")
        .status()
}

async fn librarian_client() -> Client {
    let email = std::env::var("LIBRARIAN_EMAIL").unwrap_or_else(|_| "admin@library.com".to_string());
    let password = std::env::var("LIBRARIAN_PASSWORD").unwrap_or_else(|_| "change-me".to_string());

    let client = client();
    assert_eq!(login(&client, &email, &password).await, StatusCode::OK);
    client
}

/// Register a fresh reader and return a logged-in client for it
async fn reader_client() -> Client {
    let client = client();
    let email = format!("{}@example.com", unique("reader"));

    let response = client
        .post(format!("{}/register", base_url()))
        .json(&json!({ "name": "Test Reader", "email": email, "password": "secret" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(login(&client, &email, "secret").await, StatusCode::OK);
    client
}

async fn add_book(librarian: &Client, isbn: &str) -> i64 {
    let response = librarian
        .post(format!("{}/librarian/books", base_url()))
        .json(&json!({ "title": "Test Book", "author": "Test Author", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["copies"], 1);
    body["book"]["id"].as_i64().expect("No book ID")
}

async fn request_borrow(client: &Client, book_id: i64, start: &str, end: &str) -> reqwest::Response {
    client
        .post(format!("{}/borrow", base_url()))
        .json(&json!({ "book_id": book_id, "start_date": start, "end_date": end }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn set_status(librarian: &Client, request_id: i64, status: &str) -> reqwest::Response {
    librarian
        .put(format!("{}/librarian/borrow-requests/{}", base_url(), request_id))
        .json(&json!({ "status": status }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn history_len(client: &Client) -> usize {
    let history: Value = client
        .get(format!("{}/user/history", base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    history.as_array().expect("History is not an array").len()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = Client::new()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let status = login(&client(), "nobody@example.com", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_logout_ends_session() {
    let reader = reader_client().await;

    let response = reader
        .get(format!("{}/books", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = reader
        .post(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = reader
        .get(format!("{}/books", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected() {
    let client = client();
    let email = format!("{}@example.com", unique("dup"));
    let body = json!({ "name": "Dup", "email": email, "password": "secret" });

    let first = client
        .post(format!("{}/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(format!("{}/register", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_reader_cannot_use_librarian_routes() {
    let reader = reader_client().await;

    let response = reader
        .get(format!("{}/librarian/borrow-requests", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Unauthorized! Only librarians are allowed.");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let librarian = librarian_client().await;
    let isbn = unique("isbn-");
    add_book(&librarian, &isbn).await;

    let response = librarian
        .post(format!("{}/librarian/books", base_url()))
        .json(&json!({ "title": "Other", "author": "Other", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_unknown_borrow_request() {
    let librarian = librarian_client().await;

    let response = librarian
        .put(format!("{}/librarian/borrow-requests/{}", base_url(), i32::MAX))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_empty_history_csv() {
    let reader = reader_client().await;

    let response = reader
        .get(format!("{}/user/download-history", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["csv"], "Book ID,Borrow Date,Return Date\n");
}

#[tokio::test]
#[ignore]
async fn test_borrow_workflow() {
    let librarian = librarian_client().await;
    let first_reader = reader_client().await;
    let second_reader = reader_client().await;

    let book_id = add_book(&librarian, &unique("isbn-")).await;

    // First reader asks for the first ten days of January
    let response = request_borrow(&first_reader, book_id, "2024-01-01", "2024-01-10").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["request"]["status"], "pending");
    let request_id = body["request"]["id"].as_i64().expect("No request ID");

    // Librarian approves
    let response = librarian
        .put(format!("{}/librarian/borrow-requests/{}", base_url(), request_id))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["request"]["status"], "approved");

    // Exactly one history row for the approval
    let history: Value = first_reader
        .get(format!("{}/user/history", base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let history = history.as_array().expect("History is not an array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["book_id"], book_id);
    assert_eq!(history[0]["borrow_date"], "2024-01-01");
    assert_eq!(history[0]["return_date"], "2024-01-10");

    // Overlapping window is refused
    let response = request_borrow(&second_reader, book_id, "2024-01-05", "2024-01-06").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book is already borrowed during this period!");

    // A later window is accepted, then rejected without any history
    let response = request_borrow(&second_reader, book_id, "2024-02-01", "2024-02-05").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_request_id = body["request"]["id"].as_i64().expect("No request ID");

    let response = librarian
        .put(format!("{}/librarian/borrow-requests/{}", base_url(), second_request_id))
        .json(&json!({ "status": "rejected" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let csv: Value = second_reader
        .get(format!("{}/user/download-history", base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(csv["csv"], "Book ID,Borrow Date,Return Date\n");

    // Librarian sees both requests
    let requests: Value = librarian
        .get(format!("{}/librarian/borrow-requests", base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let ids: Vec<i64> = requests
        .as_array()
        .expect("Requests is not an array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(ids.contains(&request_id));
    assert!(ids.contains(&second_request_id));
}

#[tokio::test]
#[ignore]
async fn test_inverted_window_rejected() {
    let librarian = librarian_client().await;
    let reader = reader_client().await;
    let book_id = add_book(&librarian, &unique("isbn-")).await;

    let response = request_borrow(&reader, book_id, "2024-01-10", "2024-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_overlap_checked_only_at_request_time() {
    let librarian = librarian_client().await;
    let first_reader = reader_client().await;
    let second_reader = reader_client().await;
    let book_id = add_book(&librarian, &unique("isbn-")).await;

    // Pending requests never block each other
    let response = request_borrow(&first_reader, book_id, "2024-03-01", "2024-03-10").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let first_id = body["request"]["id"].as_i64().expect("No request ID");

    let response = request_borrow(&second_reader, book_id, "2024-03-01", "2024-03-10").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_id = body["request"]["id"].as_i64().expect("No request ID");

    // Approval does not re-check, so both overlapping requests go through
    assert_eq!(set_status(&librarian, first_id, "approved").await.status(), StatusCode::OK);
    assert_eq!(set_status(&librarian, second_id, "approved").await.status(), StatusCode::OK);
    assert_eq!(history_len(&first_reader).await, 1);
    assert_eq!(history_len(&second_reader).await, 1);

    // Approving again appends another row
    assert_eq!(set_status(&librarian, first_id, "approved").await.status(), StatusCode::OK);
    assert_eq!(history_len(&first_reader).await, 2);

    // Moving back to pending is accepted and keeps the recorded history
    let response = set_status(&librarian, first_id, "pending").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["request"]["status"], "pending");
    assert_eq!(history_len(&first_reader).await, 2);

    // The second approval still blocks new overlapping requests
    let response = request_borrow(&first_reader, book_id, "2024-03-05", "2024-03-06").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
