use dossier_core::Config;
use dossier_db::{AgentRepository, RecordRepository, UserRepository};
use dossier_services::BatchDispatcher;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;

/// Signing material for access tokens, derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Main application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub records: RecordRepository,
    pub users: UserRepository,
    pub agents: AgentRepository,
    pub dispatcher: Arc<BatchDispatcher>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(
        config: Config,
        records: RecordRepository,
        users: UserRepository,
        agents: AgentRepository,
    ) -> Self {
        let jwt = JwtKeys::from_secret(&config.jwt_secret);
        let dispatcher = Arc::new(BatchDispatcher::new(config.bulk_download_delay_ms));
        AppState {
            config,
            records,
            users,
            agents,
            dispatcher,
            jwt,
        }
    }
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
