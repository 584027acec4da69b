//! User store interface used by the access gate to load the current user.
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{self, UserRecord};
use crate::services::auth::principal::UserKey;

/// Loads user records by key.
///
/// Implementations are shared across requests and must be safe for concurrent
/// callers. Nothing here caches.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Returns the store backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `Ok(None)` when no user has this key.
    async fn load_user_by_key(&self, key: &UserKey) -> Result<Option<UserRecord>, RepoError>;
}

/// Postgres-backed store over the `users` table.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn load_user_by_key(&self, key: &UserKey) -> Result<Option<UserRecord>, RepoError> {
        user_repo::get_by_user_no(&self.db, key.as_str()).await
    }
}

/// Process-local store, fixed at construction.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserStore {
    users: Arc<HashMap<UserKey, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|u| (UserKey::new(u.user_no.clone()), u))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn load_user_by_key(&self, key: &UserKey) -> Result<Option<UserRecord>, RepoError> {
        Ok(self.users.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(no: &str) -> UserRecord {
        UserRecord {
            user_no: no.to_string(),
            user_name: format!("user-{no}"),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn in_memory_store_finds_by_key() {
        let store = InMemoryUserStore::new([record("42"), record("7")]);
        let found = store.load_user_by_key(&UserKey::new("42")).await.unwrap();
        assert_eq!(found, Some(record("42")));
    }

    #[tokio::test]
    async fn in_memory_store_reports_absent_users() {
        let store = InMemoryUserStore::new([record("42")]);
        let found = store.load_user_by_key(&UserKey::new("43")).await.unwrap();
        assert!(found.is_none());
    }
}
