//! Dialog layers: full-viewport, focus-trapped, stacked in arrival order.

use veil_dom::{Anchor, Backdrop, Element, Key, Modifiers};

use super::stack::LayerStack;
use super::{stacked_z, DIALOG_Z, NOTIFICATION_Z};
use crate::document::FocusHost;
use crate::overlay::{OverlayClass, OverlayId};
use crate::registry::{Registry, Snapshot};

/// Mounts every open dialog as a full-screen layer.
///
/// Each layer captures focus when it mounts, keeps Tab cycling inside itself
/// and gives focus back when it unmounts. The last dialog opened is topmost
/// and is the only one that receives keys.
pub struct DialogRenderer {
    stack: LayerStack,
}

impl DialogRenderer {
    pub fn new(registry: &Registry) -> Self {
        Self {
            stack: LayerStack::new(OverlayClass::Dialog, registry),
        }
    }

    /// Reconcile against `snapshot` and return the dialog layers, bottom first.
    pub fn sync(&mut self, snapshot: &Snapshot, focus: &dyn FocusHost) -> Vec<Element> {
        self.stack.sync(snapshot, focus, None, |index, instance, content| {
            Element::box_()
                .id(instance.id.element_id(OverlayClass::Dialog))
                .anchor(Anchor::Fill)
                .backdrop(Backdrop::Dim)
                .z_index(stacked_z(DIALOG_Z, index, NOTIFICATION_Z - 1))
                .interaction_scope(true)
                .data("overlay", instance.id.key.clone())
                .child(content)
        })
    }

    pub fn handle_key(&self, focus: &dyn FocusHost, key: Key, modifiers: Modifiers) -> bool {
        self.stack.handle_key(focus, key, modifiers)
    }

    pub(crate) fn stack_mut(&mut self) -> &mut LayerStack {
        &mut self.stack
    }

    /// Mounted dialogs, bottom first.
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
