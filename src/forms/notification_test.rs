use super::*;

#[test]
fn errors_linger_longer() {
    assert_eq!(Notification::success("ok").duration(), Duration::from_millis(3000));
    assert_eq!(Notification::info("fyi").duration(), Duration::from_millis(3000));
    assert_eq!(Notification::error("bad").duration(), Duration::from_millis(5000));
}

#[test]
fn panel_classes() {
    assert_eq!(NotificationKind::Success.panel_class(), "success-snackbar");
    assert_eq!(NotificationKind::Error.panel_class(), "error-snackbar");
    assert!(Notification::error("x").is_error());
    assert!(!Notification::info("x").is_error());
}
