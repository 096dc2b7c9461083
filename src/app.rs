//! Application context: the one object that owns session, router, and
//! services.
//!
//! SYSTEM CONTEXT
//! ==============
//! Replaces ambient global state. Whoever performs navigation or sign-in holds
//! a `SecClient` and passes through it; the session is hydrated when the
//! context is built and torn down by [`SecClient::logout`].
//!
//! The sign-in flow here is what a login view does: call the service, then
//! run the four session setters in order. A failed call leaves the session
//! untouched.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::models::{SignInRequest, SignInResponse, SignUpRequest, UserResponse};
use crate::net::{ApiError, HttpClient, HttpTransport};
use crate::router::{Navigation, Route, Router};
use crate::services::{AccessService, EducationalInstitutionsService};
use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

pub struct SecClient<S> {
    access: AccessService,
    institutions: EducationalInstitutionsService,
    session: SessionStore<S>,
    router: Router,
}

impl<S: KeyValueStore> SecClient<S> {
    /// Build the `reqwest` transport from `config` and hydrate the session
    /// from `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, storage: S) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config.base_url)?;
        Ok(Self::with_transport(Arc::new(http), storage))
    }

    /// Build around any transport; the session is hydrated from `storage`.
    pub fn with_transport(http: Arc<dyn HttpTransport>, storage: S) -> Self {
        Self {
            access: AccessService::new(Arc::clone(&http)),
            institutions: EducationalInstitutionsService::new(http),
            session: SessionStore::hydrated(storage),
            router: Router::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.session
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn access(&self) -> &AccessService {
        &self.access
    }

    #[must_use]
    pub fn institutions(&self) -> &EducationalInstitutionsService {
        &self.institutions
    }

    /// Run the navigation guard for `path` and move there.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        self.router.push(&mut self.session, path)
    }

    /// Sign in, store the session, and land on the default view.
    ///
    /// # Errors
    ///
    /// Propagates the service error (e.g. `401`), or [`ApiError::Decode`] if
    /// the reply is not a sign-in response. The session is unchanged on error.
    pub async fn sign_in(&mut self, credentials: &SignInRequest) -> Result<SignInResponse, ApiError> {
        let response: SignInResponse = self.access.sign_in(credentials).await?.json()?;
        self.session.apply_sign_in(&response);
        self.navigate(&Route::DEFAULT.path());
        Ok(response)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Propagates the service error (e.g. `400` for a taken email), or
    /// [`ApiError::Decode`] if the reply is not a user.
    pub async fn sign_up(&mut self, profile: &SignUpRequest) -> Result<UserResponse, ApiError> {
        let user: UserResponse = self.access.sign_up(profile).await?.json()?;
        tracing::info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    /// Clear the session and go to the login view.
    pub fn logout(&mut self) -> Navigation {
        self.session.logout();
        tracing::info!("signed out");
        self.navigate(&Route::Login.path())
    }

    /// Hand back the key-value store, e.g. to reopen it after a reload.
    pub fn into_storage(self) -> S {
        self.session.into_storage()
    }
}
