use std::time::Duration;

use veil::prelude::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_default_values() {
    let config = VeilConfig::default();
    assert!(config.dialog.close_on_escape);
    assert_eq!(config.panel.default_scrim, Scrim::Modal);
    assert_eq!(config.notification.delay_ms, 0);
    assert_eq!(config.notification.duration_ms, 3000);
    assert_eq!(config.notification.transition_ms, 300);
    assert!(config.notification.auto_hide);
    assert_eq!(config.notification.default_placement, Placement::Top);
}

#[test]
fn test_class_defaults() {
    let config = VeilConfig::default();

    let panel = config.class_defaults(OverlayClass::Panel);
    assert_eq!(panel.get_str("scrim"), Some("modal"));

    let notification = config.class_defaults(OverlayClass::Notification);
    assert_eq!(notification.get_str("placement"), Some("top"));
    assert_eq!(notification.get_u64("duration"), Some(3000));
    assert_eq!(notification.get_bool("auto_hide"), Some(true));
}

#[test]
fn test_builders() {
    let config = VeilConfig::new()
        .notification_duration(Duration::from_secs(5))
        .notification_delay(Duration::from_millis(120))
        .transition(Duration::from_millis(80))
        .default_placement(Placement::Bottom)
        .default_scrim(Scrim::None);

    assert_eq!(config.notification.duration_ms, 5000);
    assert_eq!(config.notification.delay_ms, 120);
    assert_eq!(config.transition_duration(), Duration::from_millis(80));
    assert_eq!(config.notification.default_placement, Placement::Bottom);
    assert_eq!(config.panel.default_scrim, Scrim::None);
}

// ============================================================================
// JSON loading
// ============================================================================

#[test]
fn test_from_json_partial() {
    let config = VeilConfig::from_json(
        r#"{ "notification": { "duration_ms": 1500, "default_placement": "bottom" } }"#,
    )
    .unwrap();

    assert_eq!(config.notification.duration_ms, 1500);
    assert_eq!(config.notification.default_placement, Placement::Bottom);
    assert_eq!(config.notification.transition_ms, 300);
    assert_eq!(config.panel.default_scrim, Scrim::Modal);
}

#[test]
fn test_from_json_empty_object() {
    let config = VeilConfig::from_json("{}").unwrap();
    assert_eq!(config.notification.duration_ms, 3000);
}

#[test]
fn test_from_json_invalid() {
    let err = VeilConfig::from_json(r#"{ "panel": { "default_scrim": "fog" } }"#).unwrap_err();
    assert!(matches!(err, OverlayError::Config(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_config_flows_into_props() {
    let config = VeilConfig::from_json(r#"{ "notification": { "auto_hide": false } }"#).unwrap();
    let registry = Registry::with_config(config);
    registry
        .notifications()
        .toast("Draft saved", NotificationProps::top())
        .unwrap();

    let snapshot = registry.snapshot();
    let instance = &snapshot.get(OverlayClass::Notification)[0];
    assert!(!instance.props.auto_hide());
}
