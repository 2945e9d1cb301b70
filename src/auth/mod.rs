//! Operator Authentication
//!
//! Server-side gate for the management operations. Operator accounts live in
//! the clinic store with Argon2 password hashes; a successful login issues an
//! opaque bearer token backed by a stored session with a fixed lifetime.
//!
//! Nothing here is shipped to the browser: the client only ever holds the
//! token returned by [`AdminAuth::login`].

mod password;

pub use password::{hash_password, verify_password};

use chrono::{Duration, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::storage::{AdminUser, ClinicStore, Session, StorageError};

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username/password pair did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token unknown, revoked or expired
    #[error("Invalid or expired session")]
    InvalidSession,

    /// Old password supplied to a password change was wrong
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// Store error
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Issues and checks operator sessions
pub struct AdminAuth {
    store: Arc<ClinicStore>,
    session_ttl: Duration,
}

impl AdminAuth {
    pub fn new(store: Arc<ClinicStore>, session_ttl: Duration) -> Self {
        Self { store, session_ttl }
    }

    /// Session lifetime
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Make sure at least one operator account exists
    ///
    /// When the store has no accounts, `username` is created with
    /// `initial_password`, or with a random password if none is given.
    /// Returns the generated password so the caller can report it once.
    pub fn bootstrap(
        &self,
        username: &str,
        initial_password: Option<&str>,
    ) -> AuthResult<Option<String>> {
        if self.store.admin_count()? > 0 {
            return Ok(None);
        }

        if username.trim().is_empty() {
            return Err(AuthError::Validation(
                "Admin username cannot be empty".to_string(),
            ));
        }

        let (password, generated) = match initial_password.filter(|p| !p.is_empty()) {
            Some(p) => (p.to_string(), None),
            None => {
                let p = uuid::Uuid::new_v4().simple().to_string();
                (p.clone(), Some(p))
            }
        };

        self.store.insert_admin(&AdminUser {
            username: username.to_string(),
            password_hash: hash_password(&password)?,
            created_at: Utc::now(),
        })?;

        tracing::info!(username = %username, "Created initial admin account");
        Ok(generated)
    }

    /// Verify credentials and open a new session
    pub fn login(&self, username: &str, password: &str) -> AuthResult<Session> {
        let admin = self
            .store
            .find_admin(username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &admin.password_hash) {
            tracing::warn!(username = %username, "Rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| AuthError::Validation("Session lifetime is out of range".to_string()))?;

        let purged = self.store.purge_expired_sessions(now)?;
        if purged > 0 {
            tracing::debug!(purged, "Purged expired admin sessions");
        }

        let session = Session {
            token: new_token(),
            username: admin.username,
            expires_at,
        };
        self.store.insert_session(&session)?;

        tracing::info!(username = %session.username, "Admin logged in");
        Ok(session)
    }

    /// Resolve a bearer token to a live session
    pub fn authenticate(&self, token: &str) -> AuthResult<Session> {
        let session = self
            .store
            .find_session(token)?
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired(Utc::now()) {
            self.store.delete_session(token)?;
            return Err(AuthError::InvalidSession);
        }

        Ok(session)
    }

    /// Revoke a session
    pub fn logout(&self, session: &Session) -> AuthResult<()> {
        self.store.delete_session(&session.token)?;
        tracing::info!(username = %session.username, "Admin logged out");
        Ok(())
    }

    /// Change the password of the session's account
    ///
    /// The calling session stays valid; every other session of the account
    /// is revoked.
    pub fn change_password(
        &self,
        session: &Session,
        old_password: &str,
        new_password: &str,
    ) -> AuthResult<()> {
        if new_password.is_empty() {
            return Err(AuthError::Validation(
                "New password cannot be empty".to_string(),
            ));
        }

        let admin = self
            .store
            .find_admin(&session.username)?
            .ok_or(AuthError::InvalidSession)?;

        if !verify_password(old_password, &admin.password_hash) {
            return Err(AuthError::IncorrectPassword);
        }

        let hash = hash_password(new_password)?;
        self.store
            .update_admin_password(&admin.username, &hash, Some(&session.token))?;

        tracing::info!(username = %admin.username, "Admin password changed");
        Ok(())
    }
}

/// 64 hex characters from two v4 UUIDs
fn new_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}
