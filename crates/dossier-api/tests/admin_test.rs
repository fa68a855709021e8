mod helpers;

use helpers::auth::register_test_user;
use helpers::fixtures::create_test_agent;
use helpers::{api_path, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_admin_can_list_users() {
    let app = setup_test_app().await;
    let client = app.client();

    let admin = register_test_user(client, Some("admin"), None).await;
    register_test_user(client, Some("regular"), None).await;

    let response = client
        .get(&api_path("/admin/users"))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_regular_user_cannot_access_admin_area() {
    let app = setup_test_app().await;
    let client = app.client();

    register_test_user(client, Some("admin"), None).await;
    let regular = register_test_user(client, Some("regular"), None).await;

    let response = client
        .get(&api_path("/admin/users"))
        .add_header("Authorization", format!("Bearer {}", regular.token))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = client
        .get(&api_path("/admin/agents"))
        .add_header("Authorization", format!("Bearer {}", regular.token))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_admin_can_delete_user() {
    let app = setup_test_app().await;
    let client = app.client();

    let admin = register_test_user(client, Some("admin"), None).await;
    let regular = register_test_user(client, Some("regular"), None).await;

    let response = client
        .delete(&api_path(&format!("/admin/users/{}", regular.user_id)))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path("/admin/users"))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = client
        .delete(&api_path(&format!("/admin/users/{}", regular.user_id)))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_admin_can_manage_agents() {
    let app = setup_test_app().await;
    let client = app.client();

    let admin = register_test_user(client, Some("admin"), None).await;
    create_test_agent(client, &admin, "Alice").await;
    create_test_agent(client, &admin, "Bruna").await;

    let response = client
        .get(&api_path("/admin/agents"))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 2);
    let alice_id = agents
        .iter()
        .find(|a| a["name"] == "Alice")
        .and_then(|a| a["id"].as_str())
        .unwrap()
        .to_string();

    let response = client
        .delete(&api_path(&format!("/admin/agents/{}", alice_id)))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path("/agents"))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Bruna");
}

#[tokio::test]
async fn test_duplicate_agent_username_conflicts() {
    let app = setup_test_app().await;
    let client = app.client();
    let admin = register_test_user(client, Some("admin"), None).await;
    create_test_agent(client, &admin, "Alice").await;

    let response = client
        .post(&api_path("/agents"))
        .add_header("Authorization", format!("Bearer {}", admin.token))
        .json(&json!({
            "name": "Alice Clone",
            "username": "alice",
            "email": "clone@example.com",
        }))
        .await;
    assert_eq!(response.status_code(), 409);
}
