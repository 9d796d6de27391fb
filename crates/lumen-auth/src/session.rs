//! The signed-in user for the current storefront session.

use crate::{AuthError, AuthState, Authenticator, Credentials, Registration, User};
use lumen_cache::{Cache, Record, USER_KEY};
use lumen_commerce::ids::UserId;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Holds the current [`AuthState`] and mirrors it to the `user` record.
///
/// State only changes after the service confirms a login or registration;
/// a failed attempt leaves the previous user in place.
pub struct UserSession {
    authenticator: Arc<dyn Authenticator>,
    record: Record<User>,
    state: RwLock<AuthState>,
}

impl UserSession {
    /// Restore the persisted user, falling back to a guest.
    pub fn open(authenticator: Arc<dyn Authenticator>, cache: Cache) -> Self {
        let record: Record<User> = Record::new(cache, USER_KEY);
        let state = match record.load() {
            Some(user) => {
                info!(user_id = %user.id, "restored signed-in user");
                AuthState::SignedIn(user)
            }
            None => AuthState::Guest,
        };
        Self {
            authenticator,
            record,
            state: RwLock::new(state),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user_id()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user_id().is_some()
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User, AuthError> {
        let credentials = Credentials::new(email, password);
        let user = self.authenticator.login(&credentials).await?;
        self.commit(user.clone());
        Ok(user)
    }

    pub async fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<User, AuthError> {
        let registration = Registration::new(email, password, name);
        let user = self.authenticator.register(&registration).await?;
        self.commit(user.clone());
        Ok(user)
    }

    /// Forget the user in memory and on disk.
    pub fn logout(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = AuthState::Guest;
        if let Err(e) = self.record.clear() {
            warn!(error = %e, "failed to clear persisted user");
        }
        info!("signed out");
    }

    fn commit(&self, user: User) {
        if let Err(e) = self.record.store(&user) {
            warn!(user_id = %user.id, error = %e, "failed to persist signed-in user");
        }
        info!(user_id = %user.id, "signed in");
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = AuthState::SignedIn(user);
    }
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeAuth;

    #[async_trait]
    impl Authenticator for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
            credentials.validate()?;
            if credentials.password == "secret" {
                Ok(User::new(UserId::new(1), &credentials.email, "Анна"))
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
            registration.validate()?;
            if registration.email == "taken@example.com" {
                return Err(AuthError::Rejected {
                    status: 409,
                    message: "User already exists".into(),
                });
            }
            Ok(User::new(UserId::new(2), &registration.email, &registration.name))
        }
    }

    fn session(cache: &Cache) -> UserSession {
        UserSession::open(Arc::new(FakeAuth), cache.clone())
    }

    #[tokio::test]
    async fn test_login_commits_and_persists() {
        let cache = Cache::in_memory();
        let s = session(&cache);
        assert_eq!(s.state(), AuthState::Guest);

        let user = s.login("anna@example.com", "secret").await.unwrap();
        assert_eq!(s.current_user_id(), Some(user.id));

        let restored = session(&cache);
        assert_eq!(restored.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let cache = Cache::in_memory();
        let s = session(&cache);
        s.login("anna@example.com", "secret").await.unwrap();

        let err = s.login("anna@example.com", "wrong").await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(s.current_user_id(), Some(UserId::new(1)));
    }

    #[tokio::test]
    async fn test_failed_register_stays_guest() {
        let cache = Cache::in_memory();
        let s = session(&cache);

        let err = s
            .register("taken@example.com", "pw", "Анна")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected { status: 409, .. }));
        assert!(!s.is_signed_in());
        assert!(!cache.exists(USER_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        let s = session(&cache);

        s.register("new@example.com", "pw", "Олег").await.unwrap();
        assert!(cache.exists(USER_KEY).unwrap());

        s.logout();
        assert!(!s.is_signed_in());
        assert!(!cache.exists(USER_KEY).unwrap());
        assert!(!session(&cache).is_signed_in());
    }

    #[test]
    fn test_corrupt_user_record_restores_guest() {
        let cache = Cache::in_memory();
        cache.set(USER_KEY, &"garbage").unwrap();
        assert_eq!(session(&cache).state(), AuthState::Guest);
    }
}
