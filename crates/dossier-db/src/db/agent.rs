use std::sync::Arc;

use dossier_core::models::Agent;
use dossier_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::JsonStore;

const COLLECTION: &str = "agents";

#[derive(Clone)]
pub struct AgentRepository {
    store: JsonStore,
    agents: Arc<RwLock<Vec<Agent>>>,
}

impl AgentRepository {
    pub async fn load(store: JsonStore) -> Self {
        let agents = match store.load::<Agent>(COLLECTION).await {
            Ok(agents) => agents,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load agent collection, starting empty");
                Vec::new()
            }
        };
        AgentRepository {
            store,
            agents: Arc::new(RwLock::new(agents)),
        }
    }

    async fn persist(&self, agents: &[Agent]) {
        if let Err(e) = self.store.save(COLLECTION, agents).await {
            tracing::warn!(error = %e, "Failed to persist agent collection");
        }
    }

    pub async fn create(&self, agent: Agent) -> Result<Agent, AppError> {
        let mut agents = self.agents.write().await;
        if agents.iter().any(|a| a.username == agent.username) {
            return Err(AppError::Conflict(
                "Agent username already exists".to_string(),
            ));
        }
        agents.push(agent.clone());
        self.persist(&agents).await;
        tracing::info!(agent_id = %agent.id, name = %agent.name, "Agent created");
        Ok(agent)
    }

    pub async fn list(&self) -> Vec<Agent> {
        self.agents.read().await.clone()
    }

    /// Whether an agent with this display name exists (upload assignment
    /// references agents by name).
    pub async fn exists_by_name(&self, name: &str) -> bool {
        self.agents.read().await.iter().any(|a| a.name == name)
    }

    pub async fn remove(&self, id: Uuid) -> Result<Agent, AppError> {
        let mut agents = self.agents.write().await;
        let position = agents
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Agent not found: {}", id)))?;
        let removed = agents.remove(position);
        self.persist(&agents).await;
        tracing::info!(agent_id = %id, "Agent removed");
        Ok(removed)
    }
}
