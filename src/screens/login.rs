//! Login screen - credential form with an inline, retryable error.

use crate::{
    config::app::AuthConfig,
    errors::{Error, Result},
    session::{KeyValueStorage, SessionStore},
};
use async_trait::async_trait;

/// Message shown under the form when credentials are rejected.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "E-mail ou senha inválidos.";

/// Checks credentials.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns `Err(Error::CredentialsRejected)` for wrong credentials. Other errors mean
    /// the check itself could not run.
    async fn authenticate(&self, email: &str, password: &str) -> Result<()>;
}

/// Accepts exactly one configured e-mail/password pair.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    email: String,
    password: String,
}

impl StaticAuthenticator {
    /// Creates an authenticator from the `[auth]` config section.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            email: config.email.clone(),
            password: config.password.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().eq_ignore_ascii_case(&self.email) && password == self.password {
            Ok(())
        } else {
            Err(Error::CredentialsRejected)
        }
    }
}

/// State of the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    /// E-mail field
    pub email: String,
    /// Password field
    pub password: String,
    error: Option<String>,
    loading: bool,
}

impl LoginScreen {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline error from the last attempt, if it was rejected.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a submission waits for the authenticator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submits the form.
    ///
    /// Returns `Ok(true)` after a successful login (the session is marked logged in),
    /// `Ok(false)` when a field is empty or the credentials were rejected.
    pub async fn submit<S: KeyValueStorage>(
        &mut self,
        authenticator: &dyn Authenticator,
        session: &mut SessionStore<S>,
    ) -> Result<bool> {
        if !super::all_filled(&[&self.email, &self.password]) {
            return Ok(false);
        }

        self.error = None;
        self.loading = true;
        let outcome = authenticator.authenticate(&self.email, &self.password).await;
        self.loading = false;

        match outcome {
            Ok(()) => {
                session.set_logged_in(true).await?;
                self.password.clear();
                tracing::info!("User {} logged in", self.email.trim());
                Ok(true)
            }
            Err(Error::CredentialsRejected) => {
                tracing::info!("Rejected login for {}", self.email.trim());
                self.error = Some(INVALID_CREDENTIALS_MESSAGE.to_string());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
