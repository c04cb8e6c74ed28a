//! The console's route map.
//!
//! [`navigate`] turns a requested path plus the current [`AuthSnapshot`] into
//! what the UI should do: render a page, follow a redirect, or keep showing
//! the "checking authentication" screen.

use crate::auth::AuthSnapshot;
use crate::guard::{GuardOutcome, Redirect, RouteGuard};
use crate::role::Role;

/// Every page the console renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    AdminLogin,
    AdvisorLogin,

    AdminDashboard,
    AdminProjects,
    AdminProjectAdd,
    AdminProjectEdit { id: String },
    AdminLeads,
    AdminLeadDetail { id: String },
    AdminSiteVisits,
    AdminSiteVisitDetail { id: String },
    AdminAdvisors,
    AdminAdvisorAdd,
    AdminAdvisorEdit { id: String },

    AdvisorDashboard,
    AdvisorLeads,
    AdvisorLeadDetail { id: String },
    AdvisorSiteVisits,
    AdvisorSiteVisitDetail { id: String },
    AdvisorProfile,
}

impl Page {
    /// The role a page belongs to; `None` for the public login pages.
    pub fn required_role(&self) -> Option<Role> {
        use Page::*;
        match self {
            AdminLogin | AdvisorLogin => None,
            AdminDashboard | AdminProjects | AdminProjectAdd | AdminProjectEdit { .. }
            | AdminLeads | AdminLeadDetail { .. } | AdminSiteVisits
            | AdminSiteVisitDetail { .. } | AdminAdvisors | AdminAdvisorAdd
            | AdminAdvisorEdit { .. } => Some(Role::Admin),
            AdvisorDashboard | AdvisorLeads | AdvisorLeadDetail { .. } | AdvisorSiteVisits
            | AdvisorSiteVisitDetail { .. } | AdvisorProfile => Some(Role::Advisor),
        }
    }

    /// Canonical path of the page.
    pub fn path(&self) -> String {
        use Page::*;
        match self {
            AdminLogin => "/admin/login".to_string(),
            AdvisorLogin => "/advisor/login".to_string(),
            AdminDashboard => "/admin/dashboard".to_string(),
            AdminProjects => "/admin/projects".to_string(),
            AdminProjectAdd => "/admin/projects/add".to_string(),
            AdminProjectEdit { id } => format!("/admin/projects/{id}/edit"),
            AdminLeads => "/admin/leads".to_string(),
            AdminLeadDetail { id } => format!("/admin/leads/{id}"),
            AdminSiteVisits => "/admin/site-visits".to_string(),
            AdminSiteVisitDetail { id } => format!("/admin/site-visits/{id}"),
            AdminAdvisors => "/admin/advisors".to_string(),
            AdminAdvisorAdd => "/admin/advisors/add".to_string(),
            AdminAdvisorEdit { id } => format!("/admin/advisors/{id}/edit"),
            AdvisorDashboard => "/advisor/dashboard".to_string(),
            AdvisorLeads => "/advisor/leads".to_string(),
            AdvisorLeadDetail { id } => format!("/advisor/leads/{id}"),
            AdvisorSiteVisits => "/advisor/site-visits".to_string(),
            AdvisorSiteVisitDetail { id } => format!("/advisor/site-visits/{id}"),
            AdvisorProfile => "/advisor/profile".to_string(),
        }
    }
}

/// Result of matching a path against the route map, before any auth check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(Page),
    /// `/admin` or `/advisor` on their own: the role's dashboard, behind the
    /// same guard as the rest of that section.
    SectionIndex(Role),
    Root,
    NotFound,
}

/// Matches `path` (query string and fragment ignored, trailing `/` tolerated).
/// Literal segments match regardless of ASCII case; ids keep theirs.
pub fn resolve(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let lowered: Vec<String> = segments.iter().map(|s| s.to_ascii_lowercase()).collect();
    let keys: Vec<&str> = lowered.iter().map(String::as_str).collect();
    let id = |i: usize| segments[i].to_string();

    let page = match keys.as_slice() {
        [] => return Route::Root,
        ["admin"] => return Route::SectionIndex(Role::Admin),
        ["advisor"] => return Route::SectionIndex(Role::Advisor),

        ["admin", "login"] => Page::AdminLogin,
        ["advisor", "login"] => Page::AdvisorLogin,

        ["admin", "dashboard"] => Page::AdminDashboard,
        ["admin", "projects"] => Page::AdminProjects,
        ["admin", "projects", "add"] => Page::AdminProjectAdd,
        ["admin", "projects", _, "edit"] => Page::AdminProjectEdit { id: id(2) },
        ["admin", "leads"] => Page::AdminLeads,
        ["admin", "leads", _] => Page::AdminLeadDetail { id: id(2) },
        ["admin", "site-visits"] => Page::AdminSiteVisits,
        ["admin", "site-visits", _] => Page::AdminSiteVisitDetail { id: id(2) },
        ["admin", "advisors"] => Page::AdminAdvisors,
        ["admin", "advisors", "add"] => Page::AdminAdvisorAdd,
        ["admin", "advisors", _, "edit"] => Page::AdminAdvisorEdit { id: id(2) },

        ["advisor", "dashboard"] => Page::AdvisorDashboard,
        ["advisor", "leads"] => Page::AdvisorLeads,
        ["advisor", "leads", _] => Page::AdvisorLeadDetail { id: id(2) },
        ["advisor", "site-visits"] => Page::AdvisorSiteVisits,
        ["advisor", "site-visits", _] => Page::AdvisorSiteVisitDetail { id: id(2) },
        ["advisor", "profile"] => Page::AdvisorProfile,

        _ => return Route::NotFound,
    };
    Route::Page(page)
}

/// What the UI should do for a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Loading,
    Render(Page),
    Redirect(Redirect),
}

impl From<Redirect> for Navigation {
    fn from(redirect: Redirect) -> Self {
        Navigation::Redirect(redirect)
    }
}

/// Resolves `path` and runs it through the route guard.
///
/// - login pages render, unless someone is already signed in, who is then sent
///   to their home page;
/// - section pages are guarded by their role;
/// - `/` goes home when signed in, to the admin login otherwise;
/// - unknown paths go to the admin login.
pub fn navigate(path: &str, auth: &AuthSnapshot) -> Navigation {
    match resolve(path) {
        Route::Page(page) => match page.required_role() {
            None => match &auth.user {
                Some(user) if !auth.loading => Redirect::replace(user.role.home_path()).into(),
                _ => Navigation::Render(page),
            },
            Some(role) => match RouteGuard::allow(role).check(auth, path) {
                GuardOutcome::Loading => Navigation::Loading,
                GuardOutcome::Admitted => Navigation::Render(page),
                GuardOutcome::Redirected(redirect) => redirect.into(),
            },
        },
        Route::SectionIndex(role) => match RouteGuard::allow(role).check(auth, path) {
            GuardOutcome::Loading => Navigation::Loading,
            GuardOutcome::Admitted => Redirect::replace(role.home_path()).into(),
            GuardOutcome::Redirected(redirect) => redirect.into(),
        },
        Route::Root => {
            if auth.loading {
                Navigation::Loading
            } else {
                match &auth.user {
                    Some(user) => Redirect::replace(user.role.home_path()).into(),
                    None => Redirect::replace(Role::Admin.login_path()).into(),
                }
            }
        }
        Route::NotFound => Redirect::replace(Role::Admin.login_path()).into(),
    }
}
