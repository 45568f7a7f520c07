//! Client-side navigation contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two top-level screens: the auth card at `/` and the dashboard at
//! `/dashboard/<view>`. Any path that does not parse lands on the auth card.
//! Services never talk to a router directly; they get a `Navigator`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Child views of the dashboard, in sidebar order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DashboardView {
    #[default]
    ProjectSetup,
    Settings,
    Documentation,
}

/// Heading and body of an unfinished dashboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub message: &'static str,
    pub detail: &'static str,
}

impl DashboardView {
    pub const ALL: [Self; 3] = [Self::ProjectSetup, Self::Settings, Self::Documentation];

    pub fn slug(self) -> &'static str {
        match self {
            Self::ProjectSetup => "project-setup",
            Self::Settings => "settings",
            Self::Documentation => "documentation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ProjectSetup => "Project Setup",
            Self::Settings => "Settings",
            Self::Documentation => "Documentation",
        }
    }

    /// Material icon name shown in the sidebar.
    pub fn icon(self) -> &'static str {
        match self {
            Self::ProjectSetup => "settings",
            Self::Settings => "tune",
            Self::Documentation => "description",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.slug() == slug)
    }

    /// Static content for sections that are not built yet.
    pub fn placeholder(self) -> Option<Placeholder> {
        match self {
            Self::ProjectSetup => None,
            Self::Settings => Some(Placeholder {
                title: "Settings",
                message: "This section is under construction.",
                detail: "Settings functionality will be available in future updates.",
            }),
            Self::Documentation => Some(Placeholder {
                title: "Documentation",
                message: "This section is under construction.",
                detail: "Documentation will be available in future updates.",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login/register card at `/`.
    #[default]
    Auth,
    Dashboard(DashboardView),
}

impl Route {
    /// The dashboard's landing view.
    pub fn dashboard() -> Self {
        Self::Dashboard(DashboardView::default())
    }

    /// Resolve a path. Query strings and fragments are ignored; anything
    /// unknown resolves to `Auth`.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["dashboard"] => Self::dashboard(),
            ["dashboard", slug] => DashboardView::from_slug(slug).map_or(Self::Auth, Self::Dashboard),
            _ => Self::Auth,
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Auth => "/".to_owned(),
            Self::Dashboard(view) => format!("/dashboard/{}", view.slug()),
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard(_))
    }
}

/// Where `requested` should actually land given the session: unauthenticated
/// users are held on the auth card once loading settles.
pub fn guard(requested: Route, session: &SessionState) -> Route {
    if requested.requires_auth() && !session.is_loading() && !session.is_authenticated() {
        return Route::Auth;
    }
    requested
}

/// Something that can move the user to a route.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Signal-backed current route, used natively and by the browser shell.
#[derive(Clone, Copy, Debug)]
pub struct CurrentRoute {
    route: RwSignal<Route>,
}

impl Default for CurrentRoute {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl CurrentRoute {
    pub fn new(initial: Route) -> Self {
        Self { route: RwSignal::new(initial) }
    }

    pub fn get(&self) -> Route {
        self.route.get_untracked()
    }

    pub fn signal(&self) -> ReadSignal<Route> {
        self.route.read_only()
    }
}

impl Navigator for CurrentRoute {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route.path(), "navigate");
        self.route.set(route);
    }
}

/// Navigates by assigning `window.location`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, route: Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&route.path()) {
            tracing::warn!(error = ?e, "navigation failed");
        }
    }
}
