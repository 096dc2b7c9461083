//! Client routes and the authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation passes through [`before_each`], which refreshes the
//! session from storage and then applies the redirect rules. Routes split into
//! public (login, register) and protected (everything else, including paths
//! that match no view).
//!
//! The two redirect conditions are mutually exclusive for a given session, so
//! a redirect target always passes the guard and no cycle can form.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::fmt;

use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

/// A resolved client view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Class list; served at `/`, `/classes`, and `/home`.
    Classes,
    /// A single class, `/classes/:id`.
    Class { id: String },
    Login,
    Register,
    /// Any path no view claims.
    NotFound { path: String },
}

impl Route {
    /// Landing view for signed-in users.
    pub const DEFAULT: Route = Route::Classes;

    /// Match a URL path to a view. Query strings, fragments, and a trailing
    /// `/` are ignored.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["classes" | "home"] => Self::Classes,
            ["classes", id] => Self::Class { id: (*id).to_owned() },
            ["login"] => Self::Login,
            ["sign-up"] => Self::Register,
            _ => Self::NotFound { path: path.to_owned() },
        }
    }

    /// Canonical path for this view.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Classes => "/".to_owned(),
            Self::Class { id } => format!("/classes/{id}"),
            Self::Login => "/login".to_owned(),
            Self::Register => "/sign-up".to_owned(),
            Self::NotFound { path } => path.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Class { .. } => "class",
            Self::Login => "login",
            Self::Register => "register",
            Self::NotFound { .. } => "not-found",
        }
    }

    /// Login and register are reachable without a session.
    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of the guard for one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect { from: Route, to: Route },
}

impl Navigation {
    /// The route the user ends up on.
    #[must_use]
    pub fn destination(&self) -> &Route {
        match self {
            Self::Proceed(route) => route,
            Self::Redirect { to, .. } => to,
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Guard run before every navigation.
///
/// 1. Refresh the session from storage.
/// 2. Public target while authenticated: redirect to [`Route::DEFAULT`].
/// 3. Protected target while unauthenticated: redirect to [`Route::Login`].
/// 4. Otherwise proceed.
pub fn before_each<S: KeyValueStore>(session: &mut SessionStore<S>, target: Route) -> Navigation {
    session.refresh();
    let authenticated = session.is_authenticated();

    if target.is_public() && authenticated {
        Navigation::Redirect { from: target, to: Route::DEFAULT }
    } else if !target.is_public() && !authenticated {
        Navigation::Redirect { from: target, to: Route::Login }
    } else {
        Navigation::Proceed(target)
    }
}

/// Oldest entries are dropped once history holds this many routes.
pub const HISTORY_LIMIT: usize = 64;

/// Tracks the current view and where the user has been.
#[derive(Clone, Debug, Default)]
pub struct Router {
    current: Option<Route>,
    history: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path`, run the guard, and move to wherever it lands.
    pub fn push<S: KeyValueStore>(&mut self, session: &mut SessionStore<S>, path: &str) -> Navigation {
        let navigation = before_each(session, Route::resolve(path));
        match &navigation {
            Navigation::Proceed(route) => tracing::debug!(route = %route, "navigate"),
            Navigation::Redirect { from, to } => tracing::debug!(from = %from, to = %to, "navigation redirected"),
        }
        let destination = navigation.destination().clone();
        if let Some(previous) = self.current.replace(destination) {
            if self.history.len() == HISTORY_LIMIT {
                self.history.remove(0);
            }
            self.history.push(previous);
        }
        navigation
    }

    #[must_use]
    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Routes visited before the current one, oldest first, at most
    /// [`HISTORY_LIMIT`] of them.
    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}
