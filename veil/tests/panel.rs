use std::sync::{Arc, Mutex};

use veil::layers::{PanelRenderer, DIALOG_Z, PANEL_Z};
use veil::prelude::*;
use veil_dom::{Anchor, Backdrop};

struct ShareSheet;

impl OverlayContent for ShareSheet {
    fn element(&self, props: &OverlayProps) -> Element {
        Element::col()
            .child(Element::text("Share listing"))
            .child(Element::button("Copy link").id(format!("{}-copy", props.key)))
            .child(Element::button("Cancel").id(format!("{}-cancel", props.key)))
    }
}

struct Filters;

impl OverlayContent for Filters {
    fn element(&self, _props: &OverlayProps) -> Element {
        Element::button("Apply").id("filters-apply")
    }
}

struct Fixture {
    registry: Registry,
    focus: Mutex<FocusState>,
    lock: Arc<ScrollLockFlag>,
    panels: PanelRenderer,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(VeilConfig::default())
    }

    fn with_config(config: VeilConfig) -> Self {
        let registry = Registry::with_config(config);
        let lock = Arc::new(ScrollLockFlag::new());
        let focus = Mutex::new(FocusState::new());
        focus.focus("page-search");
        Self {
            panels: PanelRenderer::new(&registry, lock.clone()),
            registry,
            focus,
            lock,
        }
    }

    fn sync(&mut self) -> Vec<Element> {
        let snapshot = self.registry.snapshot();
        self.panels.sync(&snapshot, &self.focus)
    }
}

// ============================================================================
// Scroll lock derivation
// ============================================================================

#[test]
fn test_no_panels_no_lock() {
    let mut fx = Fixture::new();
    fx.sync();
    assert!(!fx.lock.is_locked());
    assert!(!fx.panels.is_scroll_locked());
    assert_eq!(fx.lock.toggles(), 0);
}

#[test]
fn test_default_scrim_locks() {
    let mut fx = Fixture::new();
    fx.registry.panels().open(ShareSheet, "share", Props::new()).unwrap();
    let layers = fx.sync();

    assert!(fx.lock.is_locked());
    assert_eq!(layers[0].backdrop, Backdrop::Dim);
    assert_eq!(layers[0].data.get("scrim").map(String::as_str), Some("modal"));
}

#[test]
fn test_scrim_none_does_not_lock() {
    let mut fx = Fixture::new();
    fx.registry
        .panels()
        .open(ShareSheet, "share", PanelProps::new().scrim(Scrim::None))
        .unwrap();
    let layers = fx.sync();

    assert!(!fx.lock.is_locked());
    assert_eq!(layers[0].backdrop, Backdrop::None);
}

#[test]
fn test_lock_held_while_any_modal_panel_open() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    panels.open(ShareSheet, "share", Props::new()).unwrap();
    panels
        .open(Filters, "filters", PanelProps::new().scrim(Scrim::None))
        .unwrap();
    fx.sync();
    assert!(fx.lock.is_locked());

    panels.close::<Filters>("filters");
    fx.sync();
    assert!(fx.lock.is_locked());

    panels.close::<ShareSheet>("share");
    fx.sync();
    assert!(!fx.lock.is_locked());
}

#[test]
fn test_lock_released_when_modal_closes_under_plain_panel() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    panels.open(ShareSheet, "share", Props::new()).unwrap();
    panels
        .open(Filters, "filters", PanelProps::new().scrim(Scrim::None))
        .unwrap();
    fx.sync();

    panels.close::<ShareSheet>("share");
    fx.sync();
    assert!(!fx.lock.is_locked());
    assert_eq!(fx.panels.len(), 1);
}

#[test]
fn test_lock_toggles_only_on_edges() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    panels.open(ShareSheet, "a", Props::new()).unwrap();
    fx.sync();
    panels.open(ShareSheet, "b", Props::new()).unwrap();
    fx.sync();
    fx.sync();
    assert_eq!(fx.lock.toggles(), 1);

    panels.close::<ShareSheet>("a");
    fx.sync();
    assert_eq!(fx.lock.toggles(), 1);

    panels.close::<ShareSheet>("b");
    fx.sync();
    assert_eq!(fx.lock.toggles(), 2);
    assert!(!fx.lock.is_locked());
}

#[test]
fn test_rapid_open_close_between_syncs_leaves_no_lock() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    for _ in 0..5 {
        panels.open(ShareSheet, "share", Props::new()).unwrap();
        panels.close::<ShareSheet>("share");
    }
    fx.sync();
    assert!(!fx.lock.is_locked());
    assert_eq!(fx.lock.toggles(), 0);
}

#[test]
fn test_replacing_scrim_updates_lock() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    panels.open(ShareSheet, "share", Props::new()).unwrap();
    fx.sync();
    assert!(fx.lock.is_locked());

    panels
        .open(ShareSheet, "share", PanelProps::new().scrim(Scrim::None))
        .unwrap();
    fx.sync();
    assert!(!fx.lock.is_locked());
}

#[test]
fn test_configured_default_scrim() {
    let mut fx = Fixture::with_config(VeilConfig::new().default_scrim(Scrim::None));
    fx.registry.panels().open(ShareSheet, "share", Props::new()).unwrap();
    fx.sync();
    assert!(!fx.lock.is_locked());
}

// ============================================================================
// Layers and focus
// ============================================================================

#[test]
fn test_panel_layer_is_bottom_anchored() {
    let mut fx = Fixture::new();
    fx.registry.panels().open(ShareSheet, "share", Props::new()).unwrap();
    let layers = fx.sync();

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].anchor, Anchor::Bottom);
    assert_eq!(layers[0].z_index, PANEL_Z);
    assert!(layers[0].interaction_scope);
}

#[test]
fn test_panel_traps_and_restores_focus() {
    let mut fx = Fixture::new();
    fx.registry.panels().open(ShareSheet, "share", Props::new()).unwrap();
    fx.sync();
    assert_eq!(fx.focus.active().as_deref(), Some("share-copy"));

    assert!(fx.panels.handle_key(&fx.focus, Key::Tab, Modifiers::new()));
    assert_eq!(fx.focus.active().as_deref(), Some("share-cancel"));

    assert!(fx.panels.handle_key(&fx.focus, Key::Escape, Modifiers::new()));
    fx.sync();
    assert!(fx.panels.is_empty());
    assert_eq!(fx.focus.active().as_deref(), Some("page-search"));
}

#[test]
fn test_escape_respects_panel_prop() {
    let mut fx = Fixture::new();
    fx.registry
        .panels()
        .open(ShareSheet, "share", PanelProps::new().close_on_escape(false))
        .unwrap();
    fx.sync();
    assert!(!fx.panels.handle_key(&fx.focus, Key::Escape, Modifiers::new()));
    assert_eq!(fx.registry.len(OverlayClass::Panel), 1);
}

#[test]
fn test_mounted_follows_arrival_order() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    panels.open(ShareSheet, "share", Props::new()).unwrap();
    panels.open(Filters, "filters", Props::new()).unwrap();
    fx.sync();

    let keys: Vec<String> = fx.panels.mounted().into_iter().map(|id| id.key).collect();
    assert_eq!(keys, vec!["share", "filters"]);
}

#[test]
fn test_deep_panel_stack_stays_below_dialogs() {
    let mut fx = Fixture::new();
    let panels = fx.registry.panels();
    for i in 0..150 {
        panels.open(Filters, format!("filters-{i}"), Props::new()).unwrap();
    }

    let layers = fx.sync();

    assert_eq!(layers.len(), 150);
    assert!(layers.iter().all(|layer| layer.z_index < DIALOG_Z));
    assert!(layers.windows(2).all(|pair| pair[0].z_index <= pair[1].z_index));
    assert_eq!(layers[99].z_index, DIALOG_Z - 1);
}
