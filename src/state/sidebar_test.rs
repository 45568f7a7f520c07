use super::*;
use crate::test_support::RecordingNavigator;

#[test]
fn default_is_expanded_on_project_setup() {
    let sidebar = SidebarState::default();
    assert!(!sidebar.collapsed);
    assert!(sidebar.is_active(DashboardView::ProjectSetup));
    assert_eq!(sidebar.sidebar_class(), "sidebar");
}

#[test]
fn toggle_flips_collapsed() {
    let mut sidebar = SidebarState::default();
    assert!(sidebar.toggle());
    assert_eq!(sidebar.sidebar_class(), "sidebar collapsed");
    assert!(!sidebar.toggle());
}

#[test]
fn select_activates_and_navigates() {
    let navigator = RecordingNavigator::new();
    let mut sidebar = SidebarState::default();
    sidebar.select(DashboardView::Documentation, navigator.as_ref());

    assert!(sidebar.is_active(DashboardView::Documentation));
    assert_eq!(sidebar.item_class(DashboardView::Documentation), "menu-item active");
    assert_eq!(sidebar.item_class(DashboardView::Settings), "menu-item");
    assert_eq!(navigator.last(), Some(Route::Dashboard(DashboardView::Documentation)));
}
