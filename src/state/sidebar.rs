//! Dashboard sidebar chrome.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use crate::routes::{DashboardView, Navigator, Route};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub collapsed: bool,
    pub active: DashboardView,
}

impl SidebarState {
    /// Flip the collapsed flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    /// Make `view` active and navigate to it.
    pub fn select(&mut self, view: DashboardView, navigator: &dyn Navigator) {
        self.active = view;
        navigator.navigate(Route::Dashboard(view));
    }

    pub fn is_active(&self, view: DashboardView) -> bool {
        self.active == view
    }

    /// Space-separated CSS classes for a menu entry.
    pub fn item_class(&self, view: DashboardView) -> &'static str {
        if self.is_active(view) { "menu-item active" } else { "menu-item" }
    }

    pub fn sidebar_class(&self) -> &'static str {
        if self.collapsed { "sidebar collapsed" } else { "sidebar" }
    }
}
