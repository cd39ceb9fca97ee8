//! Screen routes and the login guard.

use std::fmt;

use super::auth_state::AuthState;

/// Addressable screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/search-client`.
    SearchClient,
    /// `/login`.
    Login,
    /// `/client-contacted`.
    ClientContacted,
    /// Unknown path, kept for display.
    NotFound(String),
}

impl Route {
    /// Default landing route after login.
    pub const HOME: Self = Self::SearchClient;

    /// Resolves a path. `/` is an alias of `/search-client`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "/" | "" | "/search-client" => Self::SearchClient,
            "/login" => Self::Login,
            "/client-contacted" => Self::ClientContacted,
            other => Self::NotFound(other.to_string()),
        }
    }

    /// Canonical path of the route.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::SearchClient => "/search-client",
            Self::Login => "/login",
            Self::ClientContacted => "/client-contacted",
            Self::NotFound(path) => path,
        }
    }

    /// Routes that require a logged in operator.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::SearchClient | Self::ClientContacted)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the requested route.
    Render(Route),
    /// Show login, then return to `return_to`.
    RedirectToLogin {
        /// Route to open after login.
        return_to: Route,
    },
    /// Already authenticated; skip the login screen.
    RedirectTo(Route),
}

/// Decides what to show for `route` given the auth state.
#[must_use]
pub fn guard(route: Route, auth: AuthState) -> RouteDecision {
    match route {
        Route::Login if auth.logged_in => RouteDecision::RedirectTo(Route::HOME),
        protected if protected.is_protected() && !auth.logged_in => {
            RouteDecision::RedirectToLogin {
                return_to: protected,
            }
        }
        other => RouteDecision::Render(other),
    }
}
