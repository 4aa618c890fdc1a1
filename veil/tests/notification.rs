use std::time::Duration;

use tokio::time::Instant;
use veil::layers::{notification_order, NotificationRenderer, Phase, SPACER_ORDER};
use veil::prelude::*;

struct Banner;

impl OverlayContent for Banner {
    fn element(&self, props: &OverlayProps) -> Element {
        Element::text(props.props.get_str("text").unwrap_or("banner").to_string())
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn id(key: &str) -> OverlayId {
    OverlayId::of::<Banner>(key)
}

fn toast_id(key: &str) -> OverlayId {
    OverlayId::of::<Toast>(key)
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_order_formula() {
    assert_eq!(notification_order(Placement::Top, 0), 0);
    assert_eq!(notification_order(Placement::Top, 3), 3);
    assert_eq!(notification_order(Placement::Bottom, 0), 100);
    assert_eq!(notification_order(Placement::Bottom, 2), 98);
    assert_eq!(SPACER_ORDER, 50);
}

#[test]
fn test_mixed_placements_layout() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    notifications.open(Banner, "n1", NotificationProps::top()).unwrap();
    notifications.open(Banner, "n2", NotificationProps::bottom()).unwrap();
    notifications.open(Banner, "n3", NotificationProps::top()).unwrap();

    let layout = NotificationRenderer::layout(&registry.snapshot());

    assert_eq!(layout, vec![(id("n1"), 0), (id("n2"), 100), (id("n3"), 1)]);
}

#[test]
fn test_bottom_group_newest_nearest_edge() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    notifications.open(Banner, "old", NotificationProps::bottom()).unwrap();
    notifications.open(Banner, "new", NotificationProps::bottom()).unwrap();

    let now = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    let snapshot = registry.snapshot();
    renderer.reconcile(&snapshot, now);
    let container = renderer.render(&snapshot);

    let ids: Vec<&str> = container
        .ordered_children()
        .into_iter()
        .map(|child| child.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "notifications:spacer",
            "notification:Banner:new",
            "notification:Banner:old",
        ]
    );
}

#[test]
fn test_default_placement_is_top() {
    let registry = Registry::new();
    registry.notifications().open(Banner, "n", Props::new()).unwrap();
    let snapshot = registry.snapshot();
    let instance = &snapshot.get(OverlayClass::Notification)[0];
    assert_eq!(instance.props.placement(), Placement::Top);
}

#[test]
fn test_configured_default_placement() {
    let registry =
        Registry::with_config(VeilConfig::new().default_placement(Placement::Bottom));
    registry.notifications().open(Banner, "n", Props::new()).unwrap();
    let layout = NotificationRenderer::layout(&registry.snapshot());
    assert_eq!(layout, vec![(id("n"), 100)]);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_auto_hide_runs_full_lifecycle() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "saved", NotificationProps::top().duration(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    assert_eq!(renderer.phase(&id("saved")), Some(Phase::Visible));
    assert_eq!(renderer.next_deadline(), Some(t0 + ms(1000)));

    assert!(!renderer.tick(t0 + ms(999)));
    assert!(renderer.tick(t0 + ms(1000)));
    assert_eq!(renderer.phase(&id("saved")), Some(Phase::Exiting));
    assert_eq!(registry.len(OverlayClass::Notification), 1);

    assert!(renderer.tick(t0 + ms(1300)));
    assert_eq!(renderer.phase(&id("saved")), None);
    assert_eq!(registry.len(OverlayClass::Notification), 0);
    assert_eq!(renderer.next_deadline(), None);
}

#[test]
fn test_delay_keeps_notification_hidden() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "later", NotificationProps::top().delay(ms(500)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    let snapshot = registry.snapshot();
    renderer.reconcile(&snapshot, t0);

    assert_eq!(renderer.phase(&id("later")), Some(Phase::Entering));
    assert_eq!(renderer.render(&snapshot).content.children().len(), 1);

    renderer.tick(t0 + ms(500));
    assert_eq!(renderer.phase(&id("later")), Some(Phase::Visible));
    assert_eq!(renderer.render(&snapshot).content.children().len(), 2);
}

#[test]
fn test_late_tick_catches_up() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(
            Banner,
            "n",
            NotificationProps::top().delay(ms(100)).duration(ms(1000)),
        )
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);

    // delay + duration + transition all elapsed before the first tick
    assert!(renderer.tick(t0 + ms(5000)));
    assert!(renderer.is_empty());
    assert!(!registry.is_open(OverlayClass::Notification, &id("n")));
}

#[test]
fn test_without_auto_hide_stays_visible() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "sticky", NotificationProps::top().auto_hide(false))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);

    renderer.tick(t0 + ms(60_000));
    assert_eq!(renderer.phase(&id("sticky")), Some(Phase::Visible));
    assert_eq!(renderer.next_deadline(), None);
}

#[test]
fn test_dismiss_visible_starts_exit() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "n", NotificationProps::top().auto_hide(false))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);

    assert!(renderer.dismiss(&id("n"), t0 + ms(10)));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Exiting));
    assert!(!renderer.dismiss(&id("n"), t0 + ms(20)));

    renderer.tick(t0 + ms(310));
    assert!(renderer.is_empty());
    assert_eq!(registry.len(OverlayClass::Notification), 0);
}

#[test]
fn test_dismiss_while_entering_closes_without_showing() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "n", NotificationProps::top().delay(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);

    assert!(renderer.dismiss(&id("n"), t0));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Closed));
    renderer.tick(t0);
    assert_eq!(registry.len(OverlayClass::Notification), 0);
}

#[test]
fn test_dismiss_unknown_is_noop() {
    let registry = Registry::new();
    let mut renderer = NotificationRenderer::new(&registry);
    assert!(!renderer.dismiss(&id("ghost"), Instant::now()));
}

#[test]
fn test_external_close_cancels_timer() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    notifications
        .open(Banner, "n", NotificationProps::top().duration(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    assert!(renderer.next_deadline().is_some());

    notifications.close::<Banner>("n");
    renderer.reconcile(&registry.snapshot(), t0 + ms(10));

    assert!(renderer.is_empty());
    assert_eq!(renderer.next_deadline(), None);
    assert!(!renderer.tick(t0 + ms(2000)));
}

#[test]
fn test_reopen_after_close_starts_fresh() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    let props = NotificationProps::top().duration(ms(1000));
    notifications.open(Banner, "n", props.clone()).unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    renderer.tick(t0 + ms(1300));
    assert!(renderer.is_empty());

    notifications.open(Banner, "n", props).unwrap();
    renderer.reconcile(&registry.snapshot(), t0 + ms(2000));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Visible));
    assert_eq!(renderer.next_deadline(), Some(t0 + ms(3000)));
}

#[test]
fn test_reopen_while_visible_restarts_with_new_props() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    notifications
        .open(Banner, "n", NotificationProps::top().duration(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    assert_eq!(renderer.next_deadline(), Some(t0 + ms(1000)));

    notifications
        .open(Banner, "n", NotificationProps::top().duration(ms(5000)))
        .unwrap();
    renderer.reconcile(&registry.snapshot(), t0 + ms(500));

    assert_eq!(renderer.len(), 1);
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Visible));
    assert_eq!(renderer.next_deadline(), Some(t0 + ms(5500)));
    assert!(!renderer.tick(t0 + ms(1000)));
}

#[test]
fn test_reopen_while_exiting_comes_back() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    let props = NotificationProps::top().duration(ms(1000));
    notifications.open(Banner, "n", props.clone()).unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    renderer.tick(t0 + ms(1000));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Exiting));

    notifications.open(Banner, "n", props).unwrap();
    renderer.reconcile(&registry.snapshot(), t0 + ms(1100));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Visible));

    // The old exit deadline no longer removes it.
    renderer.tick(t0 + ms(1300));
    assert_eq!(renderer.phase(&id("n")), Some(Phase::Visible));
    assert_eq!(registry.len(OverlayClass::Notification), 1);
}

#[test]
fn test_reconcile_without_changes_keeps_lifecycle() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "n", NotificationProps::top().duration(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    renderer.reconcile(&registry.snapshot(), t0 + ms(600));
    assert_eq!(renderer.next_deadline(), Some(t0 + ms(1000)));
}

// ============================================================================
// Rendering and keys
// ============================================================================

#[test]
fn test_render_marks_phase_and_placement() {
    let registry = Registry::new();
    registry
        .notifications()
        .open(Banner, "n", NotificationProps::bottom().duration(ms(1000)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    renderer.tick(t0 + ms(1000));

    let container = renderer.render(&registry.snapshot());
    let child = container
        .content
        .children()
        .iter()
        .find(|child| child.id == "notification:Banner:n")
        .unwrap();
    assert_eq!(child.data.get("phase").map(String::as_str), Some("exiting"));
    assert_eq!(child.data.get("placement").map(String::as_str), Some("bottom"));
    assert_eq!(child.order, 100);
}

#[test]
fn test_toast_closes_on_x() {
    let registry = Registry::new();
    let key = registry
        .notifications()
        .toast(Toast::success("Listing posted"), NotificationProps::top())
        .unwrap();
    assert!(key.starts_with("toast-"));

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);

    let snapshot = registry.snapshot();
    assert!(renderer.handle_key(&snapshot, Key::Char('x'), Modifiers::new()));
    assert_eq!(renderer.phase(&toast_id(&key)), Some(Phase::Visible));

    renderer.tick(t0);
    assert_eq!(renderer.phase(&toast_id(&key)), Some(Phase::Exiting));
    renderer.tick(t0 + ms(300));
    assert_eq!(registry.len(OverlayClass::Notification), 0);
}

#[test]
fn test_toast_keys_are_unique() {
    let registry = Registry::new();
    let notifications = registry.notifications();
    let a = notifications.toast("Saved", NotificationProps::top()).unwrap();
    let b = notifications.toast("Saved", NotificationProps::top()).unwrap();
    assert_ne!(a, b);
    assert_eq!(registry.len(OverlayClass::Notification), 2);
}

#[test]
fn test_toast_renders_icon_and_message() {
    let registry = Registry::new();
    registry
        .notifications()
        .toast(Toast::error("Upload failed"), NotificationProps::top())
        .unwrap();

    let mut renderer = NotificationRenderer::new(&registry);
    let snapshot = registry.snapshot();
    renderer.reconcile(&snapshot, Instant::now());
    let lines = veil_dom::render_lines(&renderer.render(&snapshot), 80, None);
    assert_eq!(lines, vec!["✗ Upload failed"]);
}

#[test]
fn test_keys_skip_exiting_notifications() {
    let registry = Registry::new();
    registry
        .notifications()
        .toast("Saved", NotificationProps::top().duration(ms(100)))
        .unwrap();

    let t0 = Instant::now();
    let mut renderer = NotificationRenderer::new(&registry);
    renderer.reconcile(&registry.snapshot(), t0);
    renderer.tick(t0 + ms(100));

    let snapshot = registry.snapshot();
    assert!(!renderer.handle_key(&snapshot, Key::Char('x'), Modifiers::new()));
}
