//! History-backed router with a single before-each hook.
//!
//! Every navigation (push, replace, back, forward) resolves the target against
//! the route table and asks the guard before committing. A guard redirect
//! restarts resolution at the redirect target; the chain is bounded so a
//! misconfigured guard cannot spin forever.

use super::{Location, ROUTES, RouteDef, RouteMatch, RouteName, fill_path, find_route, match_path};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_REDIRECTS: usize = 8;
/// Oldest entries are dropped beyond this many.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("invalid in-app path: {0}")]
    InvalidPath(String),
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("no route named {0}")]
    UnknownName(RouteName),
    #[error("missing route parameter: {0}")]
    MissingParam(String),
    #[error("redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

/// Named redirect target produced by a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub name: RouteName,
    pub query: Vec<(String, String)>,
}

impl Redirect {
    #[must_use]
    pub fn to(name: RouteName) -> Self {
        Self {
            name,
            query: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

/// Hook consulted before every navigation commits.
pub trait NavigationGuard {
    fn before_each(&self, to: &RouteMatch, from: Option<&RouteMatch>) -> GuardDecision;
}

impl<F> NavigationGuard for F
where
    F: Fn(&RouteMatch, Option<&RouteMatch>) -> GuardDecision,
{
    fn before_each(&self, to: &RouteMatch, from: Option<&RouteMatch>) -> GuardDecision {
        self(to, from)
    }
}

/// Result of a committed navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub route: RouteMatch,
    /// Full path originally requested when a guard redirected elsewhere.
    pub redirected_from: Option<String>,
}

#[derive(Debug)]
pub struct Router<G> {
    routes: &'static [RouteDef],
    guard: G,
    history: Vec<RouteMatch>,
    position: usize,
}

impl<G: NavigationGuard> Router<G> {
    /// Router over the application route table.
    #[must_use]
    pub fn new(guard: G) -> Self {
        Self::with_routes(ROUTES, guard)
    }

    #[must_use]
    pub fn with_routes(routes: &'static [RouteDef], guard: G) -> Self {
        Self {
            routes,
            guard,
            history: Vec::new(),
            position: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&RouteMatch> {
        self.history.get(self.position)
    }

    #[must_use]
    pub fn history(&self) -> &[RouteMatch] {
        &self.history
    }

    /// Matches an in-app path against the route table without navigating.
    ///
    /// # Errors
    /// Returns `RouterError` if the path is invalid or matches no route.
    pub fn resolve(&self, full_path: &str) -> Result<RouteMatch, RouterError> {
        let location = Location::parse(full_path)?;
        self.routes
            .iter()
            .find_map(|route| {
                match_path(route.path, &location.path).map(|params| RouteMatch {
                    route,
                    location: location.clone(),
                    params,
                })
            })
            .ok_or_else(|| RouterError::NotFound(location.path.clone()))
    }

    /// Builds the location for a named route.
    ///
    /// # Errors
    /// Returns `RouterError` if the name is unknown or a parameter is missing.
    pub fn resolve_named(
        &self,
        name: RouteName,
        params: &[(String, String)],
        query: &[(String, String)],
    ) -> Result<RouteMatch, RouterError> {
        let route = find_route(self.routes, name).ok_or(RouterError::UnknownName(name))?;
        let location = Location {
            path: fill_path(route.path, params)?,
            query: query.to_vec(),
            hash: None,
        };
        let params = match_path(route.path, &location.path)
            .ok_or_else(|| RouterError::NotFound(location.path.clone()))?;
        Ok(RouteMatch {
            route,
            location,
            params,
        })
    }

    /// Href for a named route, for links.
    ///
    /// # Errors
    /// Returns `RouterError` if the name is unknown or a parameter is missing.
    pub fn href(&self, name: RouteName, params: &[(String, String)]) -> Result<String, RouterError> {
        Ok(self.resolve_named(name, params, &[])?.full_path())
    }

    /// Navigates to `full_path`, adding a history entry.
    ///
    /// # Errors
    /// Returns `RouterError` if the path or a redirect target cannot be resolved.
    pub fn push(&mut self, full_path: &str) -> Result<Navigation, RouterError> {
        let target = self.resolve(full_path)?;
        let navigation = self.run_guard(target)?;
        if !self.history.is_empty() {
            self.history.truncate(self.position + 1);
        }
        self.history.push(navigation.route.clone());
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
        self.position = self.history.len() - 1;
        Ok(navigation)
    }

    /// Navigates to `full_path`, replacing the current history entry.
    ///
    /// # Errors
    /// Returns `RouterError` if the path or a redirect target cannot be resolved.
    pub fn replace(&mut self, full_path: &str) -> Result<Navigation, RouterError> {
        let target = self.resolve(full_path)?;
        let navigation = self.run_guard(target)?;
        if self.history.is_empty() {
            self.history.push(navigation.route.clone());
        } else {
            self.history[self.position] = navigation.route.clone();
        }
        Ok(navigation)
    }

    /// Goes back one entry. The guard runs again, so a page that became
    /// protected since it was visited redirects instead.
    ///
    /// Returns `None` when there is no earlier entry.
    pub fn back(&mut self) -> Option<Result<Navigation, RouterError>> {
        let index = self.position.checked_sub(1)?;
        Some(self.traverse(index))
    }

    /// Goes forward one entry, re-running the guard.
    pub fn forward(&mut self) -> Option<Result<Navigation, RouterError>> {
        let index = self.position + 1;
        if index >= self.history.len() {
            return None;
        }
        Some(self.traverse(index))
    }

    fn traverse(&mut self, index: usize) -> Result<Navigation, RouterError> {
        let target = self.history[index].clone();
        let navigation = self.run_guard(target)?;
        // A redirected entry is rewritten in place.
        self.history[index] = navigation.route.clone();
        self.position = index;
        Ok(navigation)
    }

    fn run_guard(&self, mut target: RouteMatch) -> Result<Navigation, RouterError> {
        let requested = target.full_path();
        let from = self.current();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            match self.guard.before_each(&target, from) {
                GuardDecision::Allow => {
                    debug!(route = %target.name(), path = %target.full_path(), "navigation allowed");
                    return Ok(Navigation {
                        route: target,
                        redirected_from,
                    });
                }
                GuardDecision::Redirect(redirect) => {
                    debug!(
                        from = %target.full_path(),
                        to = %redirect.name,
                        "navigation redirected"
                    );
                    redirected_from.get_or_insert_with(|| requested.clone());
                    target = self.resolve_named(redirect.name, &[], &redirect.query)?;
                }
            }
        }

        warn!(path = %requested, "redirect loop");
        Err(RouterError::RedirectLoop(requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn allow_all(_: &RouteMatch, _: Option<&RouteMatch>) -> GuardDecision {
        GuardDecision::Allow
    }

    #[test]
    fn push_matches_params_and_query() {
        let mut router = Router::new(allow_all);
        let navigation = router.push("/test/42/result?attempt=2").unwrap();
        assert_eq!(navigation.route.name(), RouteName::TestResult);
        assert_eq!(navigation.route.param("id"), Some("42"));
        assert_eq!(navigation.route.location.query_value("attempt"), Some("2"));
        assert!(navigation.redirected_from.is_none());
    }

    #[test]
    fn static_segment_wins_over_param() {
        let router = Router::new(allow_all);
        assert_eq!(router.resolve("/test/generate").unwrap().name(), RouteName::GenerateTest);
        assert_eq!(router.resolve("/test/7").unwrap().name(), RouteName::TakeTest);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let mut router = Router::new(allow_all);
        assert_eq!(
            router.push("/nowhere"),
            Err(RouterError::NotFound("/nowhere".to_string()))
        );
        assert!(router.current().is_none());
    }

    #[test]
    fn history_keeps_only_recent_entries() {
        let mut router = Router::new(allow_all);
        for id in 0..MAX_HISTORY + 5 {
            router.push(&format!("/test/{id}")).unwrap();
        }
        assert_eq!(router.history().len(), MAX_HISTORY);
        assert_eq!(router.history()[0].param("id"), Some("5"));
        let last = (MAX_HISTORY + 4).to_string();
        assert_eq!(router.current().and_then(|m| m.param("id")), Some(last.as_str()));

        let back = router.back().unwrap().unwrap();
        let previous = (MAX_HISTORY + 3).to_string();
        assert_eq!(back.route.param("id"), Some(previous.as_str()));
    }

    #[test]
    fn href_fills_params() {
        let router = Router::new(allow_all);
        let params = vec![("id".to_string(), "3".to_string())];
        assert_eq!(router.href(RouteName::TextbookDetail, &params).unwrap(), "/textbooks/3");
        assert_eq!(
            router.href(RouteName::TextbookDetail, &[]),
            Err(RouterError::MissingParam("id".to_string()))
        );
    }

    #[test]
    fn guard_redirect_records_origin() {
        let guard = |to: &RouteMatch, _: Option<&RouteMatch>| {
            if to.name() == RouteName::Profile {
                GuardDecision::Redirect(Redirect::to(RouteName::Login).with_query("redirect", to.full_path()))
            } else {
                GuardDecision::Allow
            }
        };
        let mut router = Router::new(guard);
        let navigation = router.push("/profile").unwrap();
        assert_eq!(navigation.route.name(), RouteName::Login);
        assert_eq!(navigation.route.location.query_value("redirect"), Some("/profile"));
        assert_eq!(navigation.redirected_from.as_deref(), Some("/profile"));
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn redirect_loop_is_reported() {
        let guard = |to: &RouteMatch, _: Option<&RouteMatch>| {
            let next = if to.name() == RouteName::Login {
                RouteName::Dashboard
            } else {
                RouteName::Login
            };
            GuardDecision::Redirect(Redirect::to(next))
        };
        let mut router = Router::new(guard);
        assert_eq!(
            router.push("/chat"),
            Err(RouterError::RedirectLoop("/chat".to_string()))
        );
    }

    #[test]
    fn back_and_forward_rerun_the_guard() {
        let calls = Cell::new(0);
        let guard = |_: &RouteMatch, _: Option<&RouteMatch>| {
            calls.set(calls.get() + 1);
            GuardDecision::Allow
        };
        let mut router = Router::new(guard);
        router.push("/").unwrap();
        router.push("/chat").unwrap();
        assert!(router.forward().is_none());

        let back = router.back().unwrap().unwrap();
        assert_eq!(back.route.name(), RouteName::Home);
        assert!(router.back().is_none());

        let forward = router.forward().unwrap().unwrap();
        assert_eq!(forward.route.name(), RouteName::Chat);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut router = Router::new(allow_all);
        router.push("/").unwrap();
        router.push("/chat").unwrap();
        router.back().unwrap().unwrap();
        router.push("/statistics").unwrap();
        let names: Vec<RouteName> = router.history().iter().map(RouteMatch::name).collect();
        assert_eq!(names, vec![RouteName::Home, RouteName::Statistics]);
        assert!(router.forward().is_none());
    }

    #[test]
    fn replace_swaps_current_entry() {
        let mut router = Router::new(allow_all);
        router.push("/").unwrap();
        router.replace("/dashboard").unwrap();
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.current().map(RouteMatch::name), Some(RouteName::Dashboard));
    }
}
