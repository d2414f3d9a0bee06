//! Recipient resolution
//!
//! Maps waiter ids to staff records. A missing record never fails the
//! batch; it lands in `unresolved` and the loop moves on.

use crate::db::repository::RepoResult;
use crate::fanout::WaiterDirectory;

/// A waiter id successfully mapped to a staff record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWaiter {
    pub id: String,
    pub name: String,
    pub fcm_token: Option<String>,
}

#[derive(Debug, Default)]
pub struct Resolution {
    /// Found waiters, in the input order of the ids that resolved
    pub resolved: Vec<ResolvedWaiter>,
    /// Ids with no staff record
    pub unresolved: Vec<String>,
}

/// Look up every id. Pure reads, no side effects; a directory error is a
/// storage failure and aborts the group.
pub async fn resolve(
    directory: &dyn WaiterDirectory,
    ids: &[String],
) -> RepoResult<Resolution> {
    let mut resolution = Resolution::default();

    for id in ids {
        match directory.get_waiter(id).await? {
            Some(waiter) => {
                // Blank display names fall back to the id itself
                let name = if waiter.name.trim().is_empty() {
                    id.clone()
                } else {
                    waiter.name.clone()
                };
                resolution.resolved.push(ResolvedWaiter {
                    id: id.clone(),
                    name,
                    fcm_token: waiter.fcm_token,
                });
            }
            None => {
                tracing::warn!(waiter = %id, "waiter not found, skipping");
                resolution.unresolved.push(id.clone());
            }
        }
    }

    Ok(resolution)
}
