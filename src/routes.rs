// src/routes.rs
//! Route table and the guard that runs before every page

use crate::types::JobId;

pub const HOME_PATH: &str = "/";

/// Paths that need a logged-in user
const AUTHENTICATED_ONLY: [&str; 3] = ["/companies", "/jobs", "/profile"];
/// Paths that make no sense once logged in
const ANONYMOUS_ONLY: [&str; 2] = ["/signup", "/login"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Profile,
    Companies,
    Company(String),
    Jobs,
    Job(JobId),
    NotFound(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(&'static str),
}

/// Canonical form of a path: query and fragment dropped, empty segments
/// collapsed, always one leading slash
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Decide whether `path` may be shown. Prefix match on the normalized path,
/// case-insensitive.
pub fn guard(path: &str, logged_in: bool) -> GuardDecision {
    let path = normalize_path(path).to_lowercase();
    let to_avoid: &[&str] = if logged_in {
        &ANONYMOUS_ONLY
    } else {
        &AUTHENTICATED_ONLY
    };

    if to_avoid.iter().any(|prefix| path.starts_with(prefix)) {
        GuardDecision::Redirect(HOME_PATH)
    } else {
        GuardDecision::Pass
    }
}

impl Route {
    /// Match a path against the route table. `None` means no route, which
    /// the app treats as a redirect home.
    pub fn parse(path: &str) -> Option<Route> {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let head = segments.first().map(|s| s.to_lowercase());

        match (head.as_deref(), &segments[..]) {
            (None, _) => Some(Route::Home),
            (Some("login"), [_]) => Some(Route::Login),
            (Some("signup"), [_]) => Some(Route::Signup),
            (Some("profile"), [_]) => Some(Route::Profile),
            (Some("companies"), [_]) => Some(Route::Companies),
            (Some("companies"), [_, handle]) => Some(Route::Company(handle.to_string())),
            (Some("companies"), _) => Some(Route::NotFound("Company ")),
            (Some("jobs"), [_]) => Some(Route::Jobs),
            (Some("jobs"), [_, id]) => Some(
                id.parse::<JobId>()
                    .map(Route::Job)
                    .unwrap_or(Route::NotFound("Job ")),
            ),
            (Some("jobs"), _) => Some(Route::NotFound("Job ")),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home | Route::NotFound(_) => HOME_PATH.to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Companies => "/companies".to_string(),
            Route::Company(handle) => format!("/companies/{}", handle),
            Route::Jobs => "/jobs".to_string(),
            Route::Job(id) => format!("/jobs/{}", id),
        }
    }
}

/// Guard first, then the route table, both on the same normalized path.
/// Anything unknown lands on home.
pub fn resolve(path: &str, logged_in: bool) -> Route {
    let path = normalize_path(path);
    match guard(&path, logged_in) {
        GuardDecision::Redirect(_) => Route::Home,
        GuardDecision::Pass => Route::parse(&path).unwrap_or(Route::Home),
    }
}
