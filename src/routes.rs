//! Route guards - decide which screen a requested path leads to.
//!
//! Navigation passes two gates in order: the login gate, then the objective gate.
//! Guards are pure: the same (login state, objective id, path) always yields the same
//! [`Navigation`].

use crate::session::LoginState;
use std::fmt;

/// Every screen the client can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Credential form
    Login,
    /// Objective picker
    SelectObjective,
    /// Progress overview
    Dashboard,
    /// Transactions
    Finance,
    /// Milestones
    Objectives,
    /// Document records
    Documents,
    /// Profile and members
    Settings,
}

impl Route {
    /// All routes, login first.
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::SelectObjective,
        Self::Dashboard,
        Self::Finance,
        Self::Objectives,
        Self::Documents,
        Self::Settings,
    ];

    /// Canonical path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::SelectObjective => "/select-objective",
            Self::Dashboard => "/dashboard",
            Self::Finance => "/finance",
            Self::Objectives => "/objectives",
            Self::Documents => "/documents",
            Self::Settings => "/settings",
        }
    }

    /// Parses a requested path. `/` and the empty path lead to the dashboard; a trailing
    /// slash and a leading `#` (hash routing) are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_start_matches('#');
        let normalized = trimmed.trim_end_matches('/');
        if normalized.is_empty() {
            return Some(Self::Dashboard);
        }
        let normalized = if normalized.starts_with('/') {
            normalized.to_string()
        } else {
            format!("/{normalized}")
        };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether the route needs a logged-in user.
    #[must_use]
    pub const fn requires_login(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Whether the route needs an active objective.
    #[must_use]
    pub const fn requires_objective(self) -> bool {
        !matches!(self, Self::Login | Self::SelectObjective)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of resolving a requested path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Show the requested screen
    Render(Route),
    /// Go to another screen instead
    Redirect(Route),
    /// Login state not known yet; show nothing until it is
    Pending,
}

/// Resolves `path` against the login state and the active objective id.
///
/// Unknown paths redirect to the login screen.
#[must_use]
pub fn resolve(login: LoginState, objective_id: Option<&str>, path: &str) -> Navigation {
    let Some(route) = Route::from_path(path) else {
        return Navigation::Redirect(Route::Login);
    };

    if route.requires_login() {
        match login {
            LoginState::Unknown => return Navigation::Pending,
            LoginState::LoggedOut => return Navigation::Redirect(Route::Login),
            LoginState::LoggedIn => {}
        }
    }

    if route.requires_objective() && objective_id.is_none() {
        return Navigation::Redirect(Route::SelectObjective);
    }

    Navigation::Render(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES: [Route; 5] = [
        Route::Dashboard,
        Route::Finance,
        Route::Objectives,
        Route::Documents,
        Route::Settings,
    ];

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/finance/"), Some(Route::Finance));
        assert_eq!(Route::from_path("#/documents"), Some(Route::Documents));
        assert_eq!(Route::from_path("settings"), Some(Route::Settings));
        assert_eq!(Route::from_path("/nowhere"), None);
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_login_always_renders() {
        for login in [LoginState::Unknown, LoginState::LoggedOut, LoginState::LoggedIn] {
            for objective in [None, Some("1")] {
                assert_eq!(
                    resolve(login, objective, "/login"),
                    Navigation::Render(Route::Login)
                );
            }
        }
    }

    #[test]
    fn test_login_gate_precedes_objective_gate() {
        for route in FEATURES {
            for objective in [None, Some("1")] {
                assert_eq!(
                    resolve(LoginState::LoggedOut, objective, route.path()),
                    Navigation::Redirect(Route::Login)
                );
                assert_eq!(
                    resolve(LoginState::Unknown, objective, route.path()),
                    Navigation::Pending
                );
            }
            assert_eq!(
                resolve(LoginState::LoggedIn, None, route.path()),
                Navigation::Redirect(Route::SelectObjective)
            );
            assert_eq!(
                resolve(LoginState::LoggedIn, Some("1"), route.path()),
                Navigation::Render(route)
            );
        }
    }

    #[test]
    fn test_objective_selection_needs_login_only() {
        let path = Route::SelectObjective.path();
        assert_eq!(
            resolve(LoginState::LoggedOut, None, path),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(LoginState::LoggedIn, None, path),
            Navigation::Render(Route::SelectObjective)
        );
        assert_eq!(
            resolve(LoginState::LoggedIn, Some("1"), path),
            Navigation::Render(Route::SelectObjective)
        );
    }

    #[test]
    fn test_unknown_path_redirects_to_login() {
        assert_eq!(
            resolve(LoginState::LoggedIn, Some("1"), "/admin"),
            Navigation::Redirect(Route::Login)
        );
    }
}
