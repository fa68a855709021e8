#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use dossier_api::state::AppState;
use dossier_core::Config;
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the versioned API path.
/// Usage: `api_path("/records")` -> `/api/v0/records`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", dossier_core::constants::API_PREFIX, path)
}

/// Test application with an isolated data directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn create_test_config(data_dir: &std::path::Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: data_dir.display().to_string(),
        jwt_secret: "test-jwt-secret-at-least-32-characters-long".to_string(),
        jwt_expiry_hours: 1,
        // Low cost and no inter-item delay keep the suite fast.
        bcrypt_cost: 4,
        max_upload_kb: 1024,
        bulk_download_delay_ms: 0,
        cors_origins: vec![],
        environment: "test".to_string(),
    }
}

/// Setup a test application with an isolated data directory.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(temp_dir.path());

    let (state, router) = dossier_api::setup::initialize_app(config)
        .await
        .expect("Failed to initialize app");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}
