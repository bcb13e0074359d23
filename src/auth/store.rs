//! Auth Store

use tracing::warn;

use crate::{
    auth::session::{AuthSession, AuthState, User},
    storage::{StateStorage, load_state, save_state},
};

/// Storage key for the persisted session.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Session-scoped auth container. Only the session (user and token) is persisted; the error and
/// loading flags live for the current attempt.
#[derive(Debug)]
pub struct AuthStore<S: StateStorage> {
    state: AuthState,
    storage: S,
}

impl<S: StateStorage> AuthStore<S> {
    /// Rehydrate the session from `storage`.
    pub fn open(storage: S) -> Self {
        let session = match load_state::<AuthSession, _>(&storage, AUTH_STORAGE_KEY) {
            Ok(session) => session.unwrap_or_default(),
            Err(source) => {
                warn!("discarding unreadable persisted session: {source}");

                AuthSession::default()
            }
        };

        Self {
            state: AuthState::with_session(session),
            storage,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Current session
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        self.state.session()
    }

    /// See [`AuthState::start_attempt`].
    pub fn start_attempt(&mut self) {
        self.state.start_attempt();
    }

    /// See [`AuthState::sign_in`]; the new session is persisted.
    pub fn sign_in(&mut self, user: User, token: impl Into<String>) {
        self.state.sign_in(user, token);
        self.persist();
    }

    /// See [`AuthState::fail`].
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state.fail(message);
    }

    /// See [`AuthState::sign_out`]; the persisted session is removed.
    pub fn sign_out(&mut self) {
        self.state.sign_out();

        if let Err(source) = self.storage.remove_item(AUTH_STORAGE_KEY) {
            warn!("failed to remove persisted session: {source}");
        }
    }

    /// See [`AuthState::clear_error`].
    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    /// Borrow the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        if let Err(source) = save_state(&self.storage, AUTH_STORAGE_KEY, self.state.session()) {
            warn!("failed to persist session: {source}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        auth::session::{Role, UserId},
        storage::MemoryStorage,
    };

    use super::*;

    fn admin() -> User {
        User {
            id: UserId::new("a1"),
            name: "Ravi".to_string(),
            role: Role::Admin,
            email: Some("ravi@example.com".to_string()),
            phone: None,
        }
    }

    #[test]
    fn session_survives_reopen() {
        let mut store = AuthStore::open(MemoryStorage::new());

        store.sign_in(admin(), "tok");

        let reopened = AuthStore::open(store.storage);

        assert!(reopened.session().is_authenticated());
        assert_eq!(reopened.session().role(), Some(Role::Admin));
    }

    #[test]
    fn errors_are_not_persisted() {
        let mut store = AuthStore::open(MemoryStorage::new());

        store.sign_in(admin(), "tok");
        store.start_attempt();
        store.fail("Invalid credentials");

        let reopened = AuthStore::open(store.storage);

        assert_eq!(reopened.state().error(), None);
        assert!(reopened.session().is_authenticated());
    }

    #[test]
    fn sign_out_removes_persisted_session() {
        let mut store = AuthStore::open(MemoryStorage::new());

        store.sign_in(admin(), "tok");
        store.sign_out();

        let reopened = AuthStore::open(store.storage);

        assert!(!reopened.session().is_authenticated());
    }
}
