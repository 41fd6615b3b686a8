//! Navigation guard backed by the session state.
//!
//! This is a UX guard: it keeps signed-out users away from pages that would
//! only fail, and keeps signed-in users off the login and register pages.
//! Real access control lives on the API.

use crate::{
    features::auth::session::SessionState,
    routes::{GuardDecision, NavigationGuard, Redirect, RouteMatch, RouteMeta, RouteName},
};
use tokio::sync::watch;

/// Where signed-out users are sent.
pub const LOGIN_ROUTE: RouteName = RouteName::Login;
/// Where signed-in users land by default.
pub const LANDING_ROUTE: RouteName = RouteName::Dashboard;
/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Decides a navigation from route metadata and the signed-in flag.
///
/// `requires_auth` is checked first, so a route carrying both flags falls
/// through to the login redirect for signed-out users.
#[must_use]
pub fn decide(meta: RouteMeta, full_path: &str, logged_in: bool) -> GuardDecision {
    if meta.requires_auth && !logged_in {
        GuardDecision::Redirect(Redirect::to(LOGIN_ROUTE).with_query(REDIRECT_PARAM, full_path))
    } else if meta.guest_only && logged_in {
        GuardDecision::Redirect(Redirect::to(LANDING_ROUTE))
    } else {
        GuardDecision::Allow
    }
}

/// Path to open after a successful login, given the `redirect` query value.
///
/// Only same-origin absolute paths are honored; anything else lands on the
/// dashboard.
#[must_use]
pub fn post_login_destination(redirect: Option<&str>) -> String {
    match redirect.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/dashboard".to_string(),
    }
}

/// Guard reading the latest published session state on every navigation.
#[derive(Clone, Debug)]
pub struct AuthGuard {
    session: watch::Receiver<SessionState>,
}

impl AuthGuard {
    #[must_use]
    pub fn new(session: watch::Receiver<SessionState>) -> Self {
        Self { session }
    }
}

impl NavigationGuard for AuthGuard {
    fn before_each(&self, to: &RouteMatch, _from: Option<&RouteMatch>) -> GuardDecision {
        let logged_in = self.session.borrow().is_logged_in();
        decide(to.meta(), &to.full_path(), logged_in)
    }
}
