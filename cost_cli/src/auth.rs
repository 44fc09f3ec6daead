//! Authentication gate.
//!
//! The estimator views are only shown to an authenticated user. The identity
//! provider itself is external; the CLI talks to it through [`AuthGate`] and
//! ships an in-memory [`OfflineAuth`] for local use.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("username and password must not be empty")]
    EmptyCredentials,

    #[error("account '{0}' already exists")]
    AlreadyRegistered(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NotAuthenticated,
}

/// Capability interface over an identity provider.
pub trait AuthGate {
    fn is_authenticated(&self) -> bool;

    /// Sign in with existing credentials
    fn login(&mut self, user: &str, password: &str) -> Result<(), AuthError>;

    /// Create an account and sign in with it
    fn register(&mut self, user: &str, password: &str) -> Result<(), AuthError>;

    fn logout(&mut self);

    /// Fail with `NotAuthenticated` unless signed in
    fn require(&self) -> Result<(), AuthError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}

/// Accounts held in process memory; nothing is persisted.
#[derive(Debug, Default)]
pub struct OfflineAuth {
    accounts: HashMap<String, String>,
    signed_in: Option<String>,
}

impl OfflineAuth {
    pub fn new() -> Self {
        OfflineAuth::default()
    }

    /// Name of the signed-in user
    pub fn current_user(&self) -> Option<&str> {
        self.signed_in.as_deref()
    }
}

fn check_credentials(user: &str, password: &str) -> Result<(), AuthError> {
    if user.trim().is_empty() || password.is_empty() {
        return Err(AuthError::EmptyCredentials);
    }
    Ok(())
}

impl AuthGate for OfflineAuth {
    fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    fn login(&mut self, user: &str, password: &str) -> Result<(), AuthError> {
        check_credentials(user, password)?;
        let user = user.trim();
        match self.accounts.get(user) {
            Some(stored) if stored == password => {
                tracing::info!(user, "signed in");
                self.signed_in = Some(user.to_string());
                Ok(())
            }
            _ => {
                tracing::warn!(user, "rejected sign-in");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn register(&mut self, user: &str, password: &str) -> Result<(), AuthError> {
        check_credentials(user, password)?;
        let user = user.trim();
        if self.accounts.contains_key(user) {
            return Err(AuthError::AlreadyRegistered(user.to_string()));
        }
        self.accounts.insert(user.to_string(), password.to_string());
        self.login(user, password)
    }

    fn logout(&mut self) {
        if let Some(user) = self.signed_in.take() {
            tracing::info!(user = %user, "signed out");
        }
    }
}
