//! GetCustomPoolHandler - Query handler for saved custom pools.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{ItemId, PoolId, ShareToken};
use crate::domain::pool::PoolError;
use crate::ports::{CustomPoolStore, ItemCatalog};

/// Query for a custom pool by share code.
#[derive(Debug, Clone)]
pub struct GetCustomPoolQuery {
    pub share_code: ShareToken,
}

/// Custom pool with resolved display names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomPoolView {
    pub pool_id: PoolId,
    pub name: String,
    pub description: Option<String>,
    pub item_ids: Vec<ItemId>,
    pub item_names: Vec<String>,
    pub share_code: ShareToken,
}

/// Handler for custom pool lookups.
pub struct GetCustomPoolHandler {
    pools: Arc<dyn CustomPoolStore>,
    catalog: Arc<dyn ItemCatalog>,
}

impl GetCustomPoolHandler {
    pub fn new(pools: Arc<dyn CustomPoolStore>, catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { pools, catalog }
    }

    pub async fn handle(&self, query: GetCustomPoolQuery) -> Result<CustomPoolView, PoolError> {
        let pool = self
            .pools
            .find_by_share_code(&query.share_code)
            .await?
            .ok_or_else(|| PoolError::not_found(query.share_code.clone()))?;

        let item_names = pool
            .items()
            .iter()
            .map(|id| {
                self.catalog
                    .card(id)
                    .map(|card| card.name)
                    .unwrap_or_else(|| id.as_str().to_string())
            })
            .collect();

        Ok(CustomPoolView {
            pool_id: *pool.id(),
            name: pool.name().to_string(),
            description: pool.description().map(String::from),
            item_ids: pool.items().to_vec(),
            item_names,
            share_code: pool.share_code().clone(),
        })
    }
}
