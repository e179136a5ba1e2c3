//! Custom pool store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ShareToken};
use crate::domain::pool::CustomPool;

/// Store port for saved custom pools.
#[async_trait]
pub trait CustomPoolStore: Send + Sync {
    /// Save a newly created custom pool.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, pool: &CustomPool) -> Result<(), DomainError>;

    /// Find a custom pool by its share code.
    ///
    /// Returns `None` if no pool carries the code.
    async fn find_by_share_code(
        &self,
        code: &ShareToken,
    ) -> Result<Option<CustomPool>, DomainError>;
}
