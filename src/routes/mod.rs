//! Page routes of the learning client.
//!
//! The table is static: every page has a path pattern (`:name` segments are
//! parameters), a route name used for named redirects, the view that renders
//! it, and metadata telling the navigation guard whether the page requires a
//! signed-in user or is only meaningful to guests.

mod router;

pub use router::{GuardDecision, Navigation, NavigationGuard, Redirect, Router, RouterError};

use std::fmt;
use url::{Url, form_urlencoded};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
    Register,
    Dashboard,
    Textbooks,
    TextbookDetail,
    Chat,
    GenerateTest,
    TakeTest,
    TestResult,
    Statistics,
    Profile,
}

impl RouteName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::Dashboard => "Dashboard",
            RouteName::Textbooks => "Textbooks",
            RouteName::TextbookDetail => "TextbookDetail",
            RouteName::Chat => "Chat",
            RouteName::GenerateTest => "GenerateTest",
            RouteName::TakeTest => "TakeTest",
            RouteName::TestResult => "TestResult",
            RouteName::Statistics => "Statistics",
            RouteName::Profile => "Profile",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest_only: bool,
}

impl RouteMeta {
    const PUBLIC: Self = Self {
        requires_auth: false,
        guest_only: false,
    };
    const GUEST: Self = Self {
        requires_auth: false,
        guest_only: true,
    };
    const PRIVATE: Self = Self {
        requires_auth: true,
        guest_only: false,
    };
}

/// Static route descriptor. `view` names the page loaded when the route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: RouteName,
    pub view: &'static str,
    pub meta: RouteMeta,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: "/",
        name: RouteName::Home,
        view: "HomePage",
        meta: RouteMeta::PUBLIC,
    },
    RouteDef {
        path: "/login",
        name: RouteName::Login,
        view: "LoginPage",
        meta: RouteMeta::GUEST,
    },
    RouteDef {
        path: "/register",
        name: RouteName::Register,
        view: "RegisterPage",
        meta: RouteMeta::GUEST,
    },
    RouteDef {
        path: "/dashboard",
        name: RouteName::Dashboard,
        view: "DashboardPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/textbooks",
        name: RouteName::Textbooks,
        view: "TextbooksPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/textbooks/:id",
        name: RouteName::TextbookDetail,
        view: "TextbookDetailPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/chat",
        name: RouteName::Chat,
        view: "ChatPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/test/generate",
        name: RouteName::GenerateTest,
        view: "GenerateTestPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/test/:id",
        name: RouteName::TakeTest,
        view: "TakeTestPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/test/:id/result",
        name: RouteName::TestResult,
        view: "TestResultPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/statistics",
        name: RouteName::Statistics,
        view: "StatisticsPage",
        meta: RouteMeta::PRIVATE,
    },
    RouteDef {
        path: "/profile",
        name: RouteName::Profile,
        view: "ProfilePage",
        meta: RouteMeta::PRIVATE,
    },
];

/// A parsed in-app location: path, ordered query pairs, and fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
}

impl Location {
    /// Parses an in-app path such as `/textbooks/7?tab=units#top`.
    ///
    /// # Errors
    /// Returns `RouterError::InvalidPath` for absolute URLs or unparsable input.
    pub fn parse(full_path: &str) -> Result<Self, RouterError> {
        let trimmed = full_path.trim();
        if !trimmed.starts_with('/') || trimmed.starts_with("//") {
            return Err(RouterError::InvalidPath(full_path.to_string()));
        }

        let base = Url::parse("http://app.invalid/")
            .map_err(|_| RouterError::InvalidPath(full_path.to_string()))?;
        let url = base
            .join(trimmed)
            .map_err(|_| RouterError::InvalidPath(full_path.to_string()))?;

        let mut path = url.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }

        Ok(Self {
            path,
            query: url.query_pairs().into_owned().collect(),
            hash: url.fragment().map(ToString::to_string),
        })
    }

    /// Value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Path plus encoded query and fragment, as navigated to.
    #[must_use]
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            full.push('?');
            full.push_str(&query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

/// A location matched against the route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub location: Location,
    pub params: Vec<(String, String)>,
}

impl RouteMatch {
    #[must_use]
    pub fn name(&self) -> RouteName {
        self.route.name
    }

    #[must_use]
    pub fn meta(&self) -> RouteMeta {
        self.route.meta
    }

    #[must_use]
    pub fn full_path(&self) -> String {
        self.location.full_path()
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Looks up a route definition by name.
#[must_use]
pub fn find_route(routes: &'static [RouteDef], name: RouteName) -> Option<&'static RouteDef> {
    routes.iter().find(|route| route.name == name)
}

/// Matches `path` against `pattern`, returning captured parameters.
fn match_path(pattern: &str, path: &str) -> Option<Vec<(String, String)>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = Vec::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = expected.strip_prefix(':') {
            params.push((name.to_string(), (*actual).to_string()));
        } else if expected != actual {
            return None;
        }
    }
    Some(params)
}

/// Builds a concrete path from `pattern`, substituting `:name` segments.
fn fill_path(pattern: &str, params: &[(String, String)]) -> Result<String, RouterError> {
    let mut segments = Vec::new();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        if let Some(name) = segment.strip_prefix(':') {
            let value = params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| RouterError::MissingParam(name.to_string()))?;
            segments.push(value.to_string());
        } else {
            segments.push(segment.to_string());
        }
    }
    Ok(format!("/{}", segments.join("/")))
}
