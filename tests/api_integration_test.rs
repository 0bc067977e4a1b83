//! API integration tests
//!
//! These run against a live server at localhost:8080 seeded with two
//! accounts: "librarian"/"librarian" (can_mark_returned) and
//! "patron"/"patron" (no permission). Run with: cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Client that does not follow redirects, so 303 responses stay visible
fn no_redirect_client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn get_auth_token(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "password": "librarian"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["can_mark_returned"], true);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["per_page"], 10);
    assert!(body["items"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
#[ignore]
async fn test_summary_counts() {
    let client = Client::new();

    let response = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for field in [
        "num_books",
        "num_instances",
        "num_instances_available",
        "num_authors",
        "num_genres",
        "num_word_the",
        "num_visits",
    ] {
        assert!(body[field].is_number(), "missing count: {}", field);
    }
    assert!(
        body["num_instances_available"].as_i64().unwrap() <= body["num_instances"].as_i64().unwrap()
    );
    assert!(body["num_word_the"].as_i64().unwrap() <= body["num_books"].as_i64().unwrap());
}

#[tokio::test]
#[ignore]
async fn test_summary_visit_counter_increments() {
    // Cookie store keeps the visit counter across requests
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let first: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let second: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(
        second["num_visits"].as_u64().unwrap(),
        first["num_visits"].as_u64().unwrap() + 1
    );
}

#[tokio::test]
#[ignore]
async fn test_my_loans_redirects_unauthenticated() {
    let client = no_redirect_client();

    let response = client
        .get(format!("{}/loans/my", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header");
    assert!(location.contains("/auth/login"));
}

#[tokio::test]
#[ignore]
async fn test_all_borrowed_forbidden_without_permission() {
    let client = Client::new();
    let token = get_auth_token(&client, "patron", "patron").await;

    let response = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_all_borrowed_sorted_by_due_date() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    let response = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("items not an array");

    let due_dates: Vec<&str> = items
        .iter()
        .filter_map(|i| i["due_back"].as_str())
        .collect();
    let mut sorted = due_dates.clone();
    sorted.sort();
    assert_eq!(due_dates, sorted, "loans not sorted by due_back ascending");
}

#[tokio::test]
#[ignore]
async fn test_write_endpoints_forbidden_without_permission() {
    let client = Client::new();
    let token = get_auth_token(&client, "patron", "patron").await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Test",
            "last_name": "Author"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_create_update_delete_author() {
    let client = no_redirect_client();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    // Create: redirects to the new author's detail route
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula",
            "last_name": "Le Guin",
            "date_of_birth": "1929-10-21"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header")
        .to_string();

    let author_id = location
        .rsplit('/')
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .expect("No author id in redirect location");

    // Update
    let response = client
        .put(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula K.",
            "last_name": "Le Guin",
            "date_of_birth": "1929-10-21",
            "date_of_death": "2018-01-22"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Delete: redirects to the author list
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header");
    assert!(location.ends_with("/authors"));

    // The record is gone
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_author_not_found() {
    let client = no_redirect_client();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    let response = client
        .delete(format!("{}/authors/999999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_renew_unknown_instance_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    let response = client
        .get(format!("{}/instances/{}/renew", BASE_URL, NIL_UUID))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_renew_rejects_past_date() {
    let client = Client::new();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    // Need an on-loan copy to target
    let body: Value = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let Some(item) = body["items"].as_array().and_then(|a| a.first()) else {
        return; // no active loans in fixture data
    };
    let instance_id = item["id"].as_str().unwrap().to_string();
    let due_back_before = item["due_back"].clone();

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_back": "2000-01-01" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "due_back");

    // The record is unchanged
    let body: Value = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let item = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"].as_str() == Some(instance_id.as_str()))
        .expect("instance disappeared from loan list");
    assert_eq!(item["due_back"], due_back_before);
}

#[tokio::test]
#[ignore]
async fn test_renew_redirects_to_all_borrowed() {
    let client = no_redirect_client();
    let token = get_auth_token(&client, "librarian", "librarian").await;

    let body: Value = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let Some(item) = body["items"].as_array().and_then(|a| a.first()) else {
        return; // no active loans in fixture data
    };
    let instance_id = item["id"].as_str().unwrap().to_string();

    // The pre-filled form proposes a date inside the accepted window
    let form: Value = client
        .get(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let proposed = form["due_back"].as_str().expect("No proposed date");

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_back": proposed }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header");
    assert!(location.ends_with("/loans/borrowed"));
}
