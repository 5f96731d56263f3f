//! Fake login service.
//!
//! There is no credential check. Any non-blank email and password log the
//! visitor in; the password is never stored or compared.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::{Latency, ServiceError};
use crate::models::CurrentUser;
use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// Outcome of a successful login.
pub struct LoginOutcome {
    pub user: CurrentUser,
    /// Opaque session token; redacted in `Debug` output.
    pub token: SecretString,
}

impl std::fmt::Debug for LoginOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOutcome")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Login state against one visitor's storage.
pub struct SessionService<'a, S> {
    store: &'a S,
    latency: Latency,
}

impl<'a, S: KeyValueStore> SessionService<'a, S> {
    /// Create a new session service.
    #[must_use]
    pub const fn new(store: &'a S, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Log in with any non-blank email and password.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidCredentials` if either value is empty.
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ServiceError> {
        self.latency.simulate().await;

        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = issue_token(email);
        let user = CurrentUser::new(email);

        self.store
            .set(keys::AUTH_TOKEN, token.expose_secret().to_owned())
            .await?;
        write_json(self.store, keys::AUTH_USER, &user).await?;

        tracing::info!(email, "Visitor logged in");
        Ok(LoginOutcome { user, token })
    }

    /// Log out. Safe to call when not logged in.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the store fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.latency.simulate().await;

        self.store.remove(keys::AUTH_TOKEN).await?;
        self.store.remove(keys::AUTH_USER).await?;
        Ok(())
    }

    /// The logged-in user, if any.
    ///
    /// Missing or unreadable state of any kind means "not logged in"; this
    /// never fails and never waits on simulated latency.
    pub async fn current_user(&self) -> Option<CurrentUser> {
        let token = self.store.get(keys::AUTH_TOKEN).await.ok().flatten()?;
        if token.is_empty() {
            return None;
        }

        read_json(self.store, keys::AUTH_USER).await.ok().flatten()
    }
}

/// Build an opaque token from the email and the current time.
fn issue_token(email: &str) -> SecretString {
    let raw = format!("{email}:{}", Utc::now().timestamp_millis());
    SecretString::from(STANDARD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_login_then_current_user() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        let outcome = sessions.login("shopper@example.com", "hunter2").await.unwrap();

        assert_eq!(outcome.user.email, "shopper@example.com");
        assert_eq!(
            sessions.current_user().await,
            Some(CurrentUser::new("shopper@example.com"))
        );
        assert_eq!(
            store.get(keys::AUTH_USER).await.unwrap().as_deref(),
            Some(r#"{"email":"shopper@example.com"}"#)
        );
    }

    #[tokio::test]
    async fn test_any_password_is_accepted() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        assert!(sessions.login("a", "b").await.is_ok());
        assert!(sessions.login("not-an-email", "x").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_credentials_are_rejected() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        assert!(matches!(
            sessions.login("", "pw").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("a@b.c", "").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_whitespace_credentials_are_kept_as_typed() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        let outcome = sessions.login(" a@b.c ", " ").await.unwrap();

        assert_eq!(outcome.user.email, " a@b.c ");
        assert_eq!(
            sessions.current_user().await,
            Some(CurrentUser::new(" a@b.c "))
        );
    }

    #[tokio::test]
    async fn test_token_encodes_email_and_time() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        let outcome = sessions.login("x@y.z", "pw").await.unwrap();
        let decoded = STANDARD.decode(outcome.token.expose_secret()).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();

        let (email, millis) = decoded.rsplit_once(':').unwrap();
        assert_eq!(email, "x@y.z");
        assert!(millis.parse::<i64>().is_ok());
        assert!(!format!("{outcome:?}").contains(outcome.token.expose_secret()));
    }

    #[tokio::test]
    async fn test_logout_clears_and_is_idempotent() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(&store, Latency::none());

        sessions.login("shopper@example.com", "pw").await.unwrap();
        sessions.logout().await.unwrap();
        assert_eq!(sessions.current_user().await, None);
        assert!(store.is_empty().unwrap());

        sessions.logout().await.unwrap();
        assert_eq!(sessions.current_user().await, None);
    }

    #[tokio::test]
    async fn test_corrupt_user_record_means_logged_out() {
        let store = MemoryStore::new();
        store
            .set(keys::AUTH_TOKEN, "token".to_string())
            .await
            .unwrap();
        store
            .set(keys::AUTH_USER, "{\"email\":".to_string())
            .await
            .unwrap();

        let sessions = SessionService::new(&store, Latency::none());
        assert_eq!(sessions.current_user().await, None);
    }

    #[tokio::test]
    async fn test_user_record_without_token_means_logged_out() {
        let store = MemoryStore::new();
        write_json(&store, keys::AUTH_USER, &CurrentUser::new("a@b.c"))
            .await
            .unwrap();

        let sessions = SessionService::new(&store, Latency::none());
        assert_eq!(sessions.current_user().await, None);
    }
}
