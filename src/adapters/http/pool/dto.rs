//! HTTP DTOs for custom pool endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::pool::CustomPoolView;

/// Request to create a custom pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoolRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Response to successful pool creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePoolResponse {
    pub pool_id: String,
    pub share_code: String,
    pub name: String,
}

/// A custom pool with resolved display names.
#[derive(Debug, Clone, Serialize)]
pub struct PoolResponse {
    pub pool_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub item_ids: Vec<String>,
    pub item_names: Vec<String>,
    pub share_code: String,
}

impl From<CustomPoolView> for PoolResponse {
    fn from(view: CustomPoolView) -> Self {
        Self {
            pool_id: view.pool_id.to_string(),
            name: view.name,
            description: view.description,
            item_ids: view.item_ids.iter().map(|id| id.to_string()).collect(),
            item_names: view.item_names,
            share_code: view.share_code.to_string(),
        }
    }
}
