//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the router guard before every navigation and written by the
//! sign-in flow. In-memory state does not survive a reload on its own: every
//! setter mirrors its field into a [`KeyValueStore`] key, and `refresh`
//! rebuilds memory from those keys.
//!
//! TRADE-OFFS
//! ==========
//! Setters are independent. Signing in runs four of them in sequence, so a
//! reader between calls can see a token without a user id. Callers finish all
//! four before consulting `is_authenticated`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::storage::KeyValueStore;
use crate::models::SignInResponse;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const ROLE_KEY: &str = "role";
pub const NAME_KEY: &str = "name";

/// Profile fields of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub role: String,
    pub name: String,
}

/// Token plus user profile. Empty strings mean "unset".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    /// True iff the token and all three user fields are non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
            && !self.user.id.is_empty()
            && !self.user.role.is_empty()
            && !self.user.name.is_empty()
    }
}

/// In-memory session mirrored into a key-value store.
#[derive(Debug)]
pub struct SessionStore<S> {
    session: Session,
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Empty session over `storage`. Persisted values are not read until
    /// [`SessionStore::refresh`].
    pub fn new(storage: S) -> Self {
        Self { session: Session::default(), storage }
    }

    /// Session populated from whatever `storage` already holds.
    pub fn hydrated(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.refresh();
        store
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.session.token
    }

    #[must_use]
    pub fn user(&self) -> &SessionUser {
        &self.session.user
    }

    /// Recomputed on every call from current state.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn set_auth(&mut self, token: &str) {
        token.clone_into(&mut self.session.token);
        self.storage.set_item(TOKEN_KEY, token);
    }

    pub fn set_user_id(&mut self, id: &str) {
        id.clone_into(&mut self.session.user.id);
        self.storage.set_item(USER_ID_KEY, id);
    }

    pub fn set_role(&mut self, role: &str) {
        role.clone_into(&mut self.session.user.role);
        self.storage.set_item(ROLE_KEY, role);
    }

    pub fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.session.user.name);
        self.storage.set_item(NAME_KEY, name);
    }

    /// Run the four setters for a successful sign-in, token first.
    pub fn apply_sign_in(&mut self, response: &SignInResponse) {
        self.set_auth(response.session_token());
        self.set_user_id(&response.user_id);
        self.set_role(&response.role);
        self.set_name(&response.name);
        tracing::info!(user_id = %response.user_id, role = %response.role, "session signed in");
    }

    /// Reload every field from storage; absent keys become empty strings.
    pub fn refresh(&mut self) {
        let read = |key: &str| self.storage.get_item(key).unwrap_or_default();
        self.session = Session {
            token: read(TOKEN_KEY),
            user: SessionUser { id: read(USER_ID_KEY), role: read(ROLE_KEY), name: read(NAME_KEY) },
        };
    }

    /// Clear memory and remove all four persisted keys.
    pub fn logout(&mut self) {
        self.session = Session::default();
        for key in [TOKEN_KEY, ROLE_KEY, USER_ID_KEY, NAME_KEY] {
            self.storage.remove_item(key);
        }
        tracing::debug!("session cleared");
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying store, dropping in-memory state.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
