use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

use super::api_path;

/// Test user data
pub struct TestUser {
    pub username: String,
    pub password: String,
    pub user_id: Uuid,
    pub token: String,
}

/// Register a new user through the API and log them in.
///
/// The first account registered in a fresh app gets the admin role, so
/// tests that need a regular user register an admin first.
pub async fn register_test_user(
    client: &TestServer,
    username: Option<&str>,
    password: Option<&str>,
) -> TestUser {
    let username = username.unwrap_or("testuser").to_string();
    let password = password.unwrap_or("password123").to_string();

    let register_response = client
        .post(&api_path("/auth/register"))
        .json(&json!({
            "name": "Test User",
            "email": format!("{}@example.com", username),
            "username": username,
            "password": password,
        }))
        .await;
    assert_eq!(
        register_response.status_code(),
        201,
        "registration failed: {}",
        register_response.text()
    );

    let login_response = client
        .post(&api_path("/auth/login"))
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .await;
    assert_eq!(login_response.status_code(), 200);

    let body: serde_json::Value = login_response.json();
    let token = body["token"].as_str().expect("token in login response").to_string();
    let user_id = Uuid::parse_str(body["user"]["id"].as_str().expect("user id"))
        .expect("valid user id");

    TestUser {
        username,
        password,
        user_id,
        token,
    }
}
