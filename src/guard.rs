//! Role-based admission for console pages.

use tracing::debug;

use crate::auth::AuthSnapshot;
use crate::role::{Role, RoleSet};

/// Where to send the user instead of the requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// The path that was refused, so a login page can return to it.
    pub from: Option<String>,
    /// Replace the current history entry rather than push a new one.
    pub replace: bool,
}

impl Redirect {
    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
            replace: true,
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The persisted session hasn't been resolved yet.
    Loading,
    /// Render the requested page.
    Admitted,
    Redirected(Redirect),
}

/// Admits or redirects navigation to a protected page.
///
/// Rules, in order:
/// 1. session still resolving → [`GuardOutcome::Loading`]
/// 2. signed out → the login page matching the attempted path's prefix
/// 3. allow-list set and the user's role not on it → that role's home page
/// 4. otherwise → [`GuardOutcome::Admitted`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: RoleSet,
}

impl RouteGuard {
    /// A guard that only requires a signed-in user.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn allow(roles: impl Into<RoleSet>) -> Self {
        Self {
            allowed: roles.into(),
        }
    }

    pub fn allowed_roles(&self) -> RoleSet {
        self.allowed
    }

    pub fn check(&self, auth: &AuthSnapshot, path: &str) -> GuardOutcome {
        if auth.loading {
            return GuardOutcome::Loading;
        }

        let Some(user) = auth.user.as_ref() else {
            let login = login_path_for(path);
            debug!(path, to = login, "not signed in");
            return GuardOutcome::Redirected(Redirect::replace(login).with_from(path));
        };

        if !self.allowed.is_empty() && !self.allowed.contains(user.role) {
            let home = user.role.home_path();
            debug!(path, role = %user.role, to = home, "role not allowed");
            return GuardOutcome::Redirected(Redirect::replace(home));
        }

        GuardOutcome::Admitted
    }
}

/// Advisor paths send signed-out users to the advisor login; everything else
/// to the admin login.
pub fn login_path_for(path: &str) -> &'static str {
    let prefix = Role::Advisor.route_prefix();
    if path
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    {
        Role::Advisor.login_path()
    } else {
        Role::Admin.login_path()
    }
}
