use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::json;

use super::api_path;
use super::auth::TestUser;

/// Minimal but well-formed-enough PDF bytes for upload tests.
pub fn pdf_bytes(marker: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% {}\n%%EOF\n", marker).into_bytes()
}

/// Register an agent so uploads can reference it by name.
pub async fn create_test_agent(client: &TestServer, user: &TestUser, name: &str) {
    let response = client
        .post(&api_path("/agents"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({
            "name": name,
            "username": name.to_lowercase(),
            "email": format!("{}@example.com", name.to_lowercase()),
        }))
        .await;
    assert_eq!(
        response.status_code(),
        201,
        "agent creation failed: {}",
        response.text()
    );
}

/// Multipart form for a batch of PDF uploads.
pub fn upload_form(agent: &str, process_number: &str, file_names: &[&str]) -> MultipartForm {
    let mut form = MultipartForm::new()
        .add_text("agent", agent.to_string())
        .add_text("process_number", process_number.to_string());
    for name in file_names {
        let part = Part::bytes(pdf_bytes(name))
            .file_name(name.to_string())
            .mime_type("application/pdf");
        form = form.add_part("file", part);
    }
    form
}

/// Upload a batch of files and return the created record ids.
pub async fn upload_files(
    client: &TestServer,
    user: &TestUser,
    agent: &str,
    process_number: &str,
    file_names: &[&str],
) -> Vec<uuid::Uuid> {
    let response = client
        .post(&api_path("/records"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(upload_form(agent, process_number, file_names))
        .await;
    assert_eq!(
        response.status_code(),
        201,
        "upload failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    body.as_array()
        .expect("array of created records")
        .iter()
        .map(|record| {
            uuid::Uuid::parse_str(record["id"].as_str().expect("record id")).expect("valid id")
        })
        .collect()
}
