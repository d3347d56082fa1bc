//! In-memory identity store
//!
//! Backs the authenticator's identity lookup and the back-office user
//! endpoints. Seeded from configuration at startup.

use async_trait::async_trait;
use reviewdesk_core::{Identity, IdentityStore, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    users: Arc<RwLock<HashMap<String, Identity>>>,
}

impl MemoryIdentityStore {
    /// Create a store holding `identities`. Later duplicates replace earlier ones.
    pub fn from_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let users = identities
            .into_iter()
            .map(|identity| (identity.id.clone(), identity))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn get(&self, id: &str) -> Option<Identity> {
        self.users.read().await.get(id).cloned()
    }

    /// All identities, sorted by id
    pub async fn list(&self) -> Vec<Identity> {
        let mut users: Vec<Identity> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    /// Update the ban flag. Returns the updated identity, or `None` if unknown.
    pub async fn set_banned(&self, id: &str, banned: bool) -> Option<Identity> {
        let mut users = self.users.write().await;
        let identity = users.get_mut(id)?;
        identity.banned = banned;
        info!(user_id = id, banned, "Updated ban status");
        Some(identity.clone())
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.get(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewdesk_core::Role;

    fn seeded() -> MemoryIdentityStore {
        MemoryIdentityStore::from_identities(vec![
            Identity::new("u2", Role::Support),
            Identity::new("u1", Role::Manager),
        ])
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = seeded();

        let found = store.find_by_id("u1").await.unwrap();
        assert_eq!(found.map(|i| i.role), Some(Role::Manager));
        assert_eq!(store.find_by_id("missing").await, Ok(None));
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let store = seeded();
        let ids: Vec<String> = store.list().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_set_banned() {
        let store = seeded();

        let updated = store.set_banned("u2", true).await.unwrap();
        assert!(updated.banned);
        assert!(store.get("u2").await.unwrap().banned);

        let updated = store.set_banned("u2", false).await.unwrap();
        assert!(!updated.banned);

        assert!(store.set_banned("missing", true).await.is_none());
    }

    #[tokio::test]
    async fn test_later_duplicate_replaces_earlier() {
        let store = MemoryIdentityStore::from_identities(vec![
            Identity::new("u1", Role::Standard),
            Identity::new("u1", Role::Support),
        ]);

        assert_eq!(store.list().await.len(), 1);
        assert_eq!(store.get("u1").await.unwrap().role, Role::Support);
    }
}
