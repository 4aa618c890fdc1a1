//! Panel layers: bottom sheets with a focus trap and a derived scroll lock.

use std::sync::Arc;

use veil_dom::{Anchor, Backdrop, Element, Key, Modifiers};

use super::stack::LayerStack;
use super::{stacked_z, DialogRenderer, DIALOG_Z, PANEL_Z};
use crate::document::{FocusHost, ScrollLock};
use crate::overlay::{OverlayClass, OverlayId};
use crate::props::Scrim;
use crate::registry::{Registry, Snapshot};

/// Mounts every open panel as a bottom-anchored layer.
///
/// The page scroll lock is engaged while any open panel has a modal scrim.
/// It is recomputed from the panel sequence on every sync and only the
/// edges are forwarded to the [`ScrollLock`], so it cannot drift however
/// quickly panels come and go.
pub struct PanelRenderer {
    stack: LayerStack,
    scroll_lock: Arc<dyn ScrollLock>,
    locked: bool,
}

impl PanelRenderer {
    pub fn new(registry: &Registry, scroll_lock: Arc<dyn ScrollLock>) -> Self {
        Self {
            stack: LayerStack::new(OverlayClass::Panel, registry),
            scroll_lock,
            locked: false,
        }
    }

    /// Reconcile against `snapshot` and return the panel layers, bottom first.
    pub fn sync(&mut self, snapshot: &Snapshot, focus: &dyn FocusHost) -> Vec<Element> {
        self.sync_with_cover(snapshot, focus, None)
    }

    /// Like [`sync`](Self::sync), for panels painted under `dialogs`. While a
    /// dialog is open the panels leave focus to it: a panel opened meanwhile
    /// does not take focus, and a panel closed meanwhile passes its restore
    /// target on to the dialog that captured focus from it. Call after
    /// syncing `dialogs` against the same snapshot.
    pub fn sync_beneath(
        &mut self,
        snapshot: &Snapshot,
        focus: &dyn FocusHost,
        dialogs: &mut DialogRenderer,
    ) -> Vec<Element> {
        self.sync_with_cover(snapshot, focus, Some(dialogs.stack_mut()))
    }

    fn sync_with_cover(
        &mut self,
        snapshot: &Snapshot,
        focus: &dyn FocusHost,
        cover: Option<&mut LayerStack>,
    ) -> Vec<Element> {
        let elements = self.stack.sync(snapshot, focus, cover, |index, instance, content| {
            let backdrop = match instance.props.scrim() {
                Scrim::Modal => Backdrop::Dim,
                Scrim::None => Backdrop::None,
            };
            Element::box_()
                .id(instance.id.element_id(OverlayClass::Panel))
                .anchor(Anchor::Bottom)
                .backdrop(backdrop)
                .z_index(stacked_z(PANEL_Z, index, DIALOG_Z - 1))
                .interaction_scope(true)
                .data("overlay", instance.id.key.clone())
                .data("scrim", instance.props.scrim().as_str())
                .child(content)
        });

        let wants_lock = snapshot
            .get(OverlayClass::Panel)
            .iter()
            .any(|instance| instance.props.scrim().has_backdrop());
        self.apply_lock(wants_lock);

        elements
    }

    fn apply_lock(&mut self, wants_lock: bool) {
        if wants_lock == self.locked {
            return;
        }
        self.locked = wants_lock;
        if wants_lock {
            log::debug!("[panel] lock scroll");
            self.scroll_lock.lock_scroll();
        } else {
            log::debug!("[panel] unlock scroll");
            self.scroll_lock.unlock_scroll();
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.locked
    }

    pub fn handle_key(&self, focus: &dyn FocusHost, key: Key, modifiers: Modifiers) -> bool {
        self.stack.handle_key(focus, key, modifiers)
    }

    /// Mounted panels, bottom first.
    pub fn mounted(&self) -> Vec<OverlayId> {
        self.stack.ids()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
