//! The session/objective store.
//!
//! Holds the tri-state login flag and the active objective. Setters write to storage
//! first and update the in-memory value once the write succeeded, so memory never runs
//! ahead of what a restart would restore.

use super::storage::KeyValueStorage;
use crate::{entities::objective, errors::Result};

/// Storage key of the login flag; holds `"true"` while logged in, absent otherwise.
pub const LOGIN_KEY: &str = "is_logged_in";

/// Storage key of the active objective, JSON encoded.
pub const OBJECTIVE_KEY: &str = "selected_objective";

/// Whether the user is authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginState {
    /// Not determined yet (storage not read, auth check pending)
    Unknown,
    /// Known to be logged out
    LoggedOut,
    /// Known to be logged in
    LoggedIn,
}

impl LoginState {
    /// Maps a stored login flag to a state. Only `"true"` counts as logged in.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::LoggedIn,
            _ => Self::LoggedOut,
        }
    }
}

/// Login flag and active objective, backed by durable storage.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    login: LoginState,
    objective: Option<objective::Model>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Creates a store whose login state is still [`LoginState::Unknown`].
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            login: LoginState::Unknown,
            objective: None,
        }
    }

    /// Creates a store and immediately restores it from `storage`.
    pub async fn restore(storage: S) -> Result<Self> {
        let mut store = Self::new(storage);
        store.reload().await?;
        Ok(store)
    }

    /// Re-reads both keys from storage.
    ///
    /// A stored objective that is not a well-formed JSON objective is dropped and
    /// treated as "no objective". Storage failures are still reported.
    pub async fn reload(&mut self) -> Result<()> {
        let login = self.storage.get(LOGIN_KEY).await?;
        let stored_objective = self.storage.get(OBJECTIVE_KEY).await?;

        self.login = LoginState::from_stored(login.as_deref());
        self.objective = stored_objective.as_deref().and_then(decode_objective);

        tracing::debug!(
            "Session restored: login={:?}, objective={:?}",
            self.login,
            self.objective_id()
        );
        Ok(())
    }

    /// Current login state.
    pub const fn login_state(&self) -> LoginState {
        self.login
    }

    /// True only when the user is known to be logged in.
    pub fn is_logged_in(&self) -> bool {
        self.login == LoginState::LoggedIn
    }

    /// The active objective, if any.
    pub const fn objective(&self) -> Option<&objective::Model> {
        self.objective.as_ref()
    }

    /// Id of the active objective, if any.
    pub fn objective_id(&self) -> Option<&str> {
        self.objective.as_ref().map(|o| o.id.as_str())
    }

    /// Sets the login flag.
    pub async fn set_logged_in(&mut self, logged_in: bool) -> Result<()> {
        if logged_in {
            self.storage.set(LOGIN_KEY, "true").await?;
            self.login = LoginState::LoggedIn;
        } else {
            self.storage.remove(LOGIN_KEY).await?;
            self.login = LoginState::LoggedOut;
        }
        Ok(())
    }

    /// Makes `objective` the active objective.
    pub async fn select_objective(&mut self, objective: objective::Model) -> Result<()> {
        let encoded = serde_json::to_string(&objective)?;
        self.storage.set(OBJECTIVE_KEY, &encoded).await?;
        tracing::info!("Selected objective '{}' ({})", objective.name, objective.id);
        self.objective = Some(objective);
        Ok(())
    }

    /// Clears the active objective.
    pub async fn clear_objective(&mut self) -> Result<()> {
        self.storage.remove(OBJECTIVE_KEY).await?;
        self.objective = None;
        Ok(())
    }

    /// Logs out and forgets the active objective.
    pub async fn logout(&mut self) -> Result<()> {
        self.clear_objective().await?;
        self.set_logged_in(false).await
    }

    /// The underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn decode_objective(raw: &str) -> Option<objective::Model> {
    match serde_json::from_str(raw) {
        Ok(objective) => Some(objective),
        Err(e) => {
            tracing::warn!("Discarding malformed stored objective: {e}");
            None
        }
    }
}
