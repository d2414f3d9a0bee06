//! Waiter repository — read-only staff directory

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::Waiter;
use crate::fanout::WaiterDirectory;

const WAITER_TABLE: &str = "waiter";

/// Waiter records are written by the admin console's staff-management
/// routes; the fan-out core only ever looks them up.
#[derive(Clone)]
pub struct WaiterRepository {
    base: BaseRepository,
}

impl WaiterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a waiter by id. Accepts both `waiter:id` and bare `id` forms.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Waiter>> {
        let pure_id = id.strip_prefix("waiter:").unwrap_or(id);
        let waiter: Option<Waiter> = self.base.db().select((WAITER_TABLE, pure_id)).await?;
        Ok(waiter)
    }
}

#[async_trait]
impl WaiterDirectory for WaiterRepository {
    async fn get_waiter(&self, id: &str) -> RepoResult<Option<Waiter>> {
        self.find_by_id(id).await
    }
}
