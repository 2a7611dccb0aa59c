//! Durable key/value storage for the session store.
//!
//! [`SystemStateStorage`] keeps values in the `system_state` table so they survive
//! restarts; [`MemoryStorage`] keeps them in a map for tests and throwaway sessions.

use crate::{
    entities::{SystemState, system_state},
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;

/// String key/value storage with write-through semantics.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-filled with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Reads a value without going through the async trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage backed by the `system_state` table.
#[derive(Debug, Clone)]
pub struct SystemStateStorage {
    db: DatabaseConnection,
}

impl SystemStateStorage {
    /// Wraps a database connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find(&self, key: &str) -> Result<Option<system_state::Model>> {
        SystemState::find()
            .filter(system_state::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl KeyValueStorage for SystemStateStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.find(key).await?.map(|state| state.value))
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        if let Some(state) = self.find(key).await? {
            let mut active_model: system_state::ActiveModel = state.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_state = system_state::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_state.insert(&self.db).await?;
        }

        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        SystemState::delete_many()
            .filter(system_state::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
