//! CreateCustomPoolHandler - Command handler for saving custom pools.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, OwnerToken, PoolId};
use crate::domain::pool::{CustomPool, PoolError};
use crate::ports::{CustomPoolStore, ItemCatalog};

/// Command to create a custom pool.
#[derive(Debug, Clone)]
pub struct CreateCustomPoolCommand {
    pub owner: Option<OwnerToken>,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<ItemId>,
    pub is_public: bool,
}

/// Result of successful pool creation.
#[derive(Debug, Clone)]
pub struct CreateCustomPoolResult {
    pub pool: CustomPool,
}

/// Handler for creating custom pools.
pub struct CreateCustomPoolHandler {
    pools: Arc<dyn CustomPoolStore>,
    catalog: Arc<dyn ItemCatalog>,
}

impl CreateCustomPoolHandler {
    pub fn new(pools: Arc<dyn CustomPoolStore>, catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { pools, catalog }
    }

    pub async fn handle(
        &self,
        cmd: CreateCustomPoolCommand,
    ) -> Result<CreateCustomPoolResult, PoolError> {
        // Every id must exist in the catalog before anything is persisted.
        let unknown: Vec<ItemId> = cmd
            .items
            .iter()
            .filter(|item| !self.catalog.contains(item))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(PoolError::unknown_items(unknown));
        }

        let pool = CustomPool::new(
            PoolId::new(),
            cmd.owner,
            cmd.name,
            cmd.description,
            cmd.items,
            cmd.is_public,
        )?;

        self.pools.save(&pool).await?;

        tracing::info!(
            pool_id = %pool.id(),
            items = pool.items().len(),
            "custom pool created"
        );

        Ok(CreateCustomPoolResult { pool })
    }
}
