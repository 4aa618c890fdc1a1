//! A stack of focus-trapped layers, shared by the dialog and panel renderers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use veil_dom::element::contains;
use veil_dom::{stabilize_ids, Element, Key, Modifiers};

use crate::document::FocusHost;
use crate::focus_trap::{FocusTrap, TrapAction};
use crate::overlay::{OverlayClass, OverlayContent, OverlayId, OverlayProps};
use crate::registry::{OverlayInstance, Registry, Snapshot};

struct MountedLayer {
    id: OverlayId,
    trap: FocusTrap,
    element: Element,
    props: OverlayProps,
    content: Arc<dyn OverlayContent>,
}

pub(crate) struct LayerStack {
    class: OverlayClass,
    registry: Registry,
    layers: Vec<MountedLayer>,
    synced_version: Option<u64>,
}

impl LayerStack {
    pub fn new(class: OverlayClass, registry: &Registry) -> Self {
        Self {
            class,
            registry: registry.clone(),
            layers: Vec::new(),
            synced_version: None,
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn ids(&self) -> Vec<OverlayId> {
        self.layers.iter().map(|layer| layer.id.clone()).collect()
    }

    fn overlay_props(&self, instance: &OverlayInstance) -> OverlayProps {
        let on_open = {
            let registry = self.registry.clone();
            let class = self.class;
            let id = instance.id.clone();
            let content = instance.content.clone();
            let props = instance.props.clone();
            Arc::new(move || {
                if let Err(e) = registry.register_dyn(class, id.clone(), content.clone(), props.clone()) {
                    log::warn!("[{}] re-open {} failed: {}", class, id, e);
                }
            })
        };
        let on_close = {
            let registry = self.registry.clone();
            let class = self.class;
            let id = instance.id.clone();
            Arc::new(move || {
                registry.unregister_id(class, &id);
            })
        };
        OverlayProps::new(instance.id.key.clone(), instance.props.clone(), on_open, on_close)
    }

    /// Bring the mounted layers in line with `snapshot` and return one
    /// element per layer, bottom first.
    ///
    /// `cover` is the stack painted above this one. While it has layers,
    /// this stack leaves focus alone: new layers mount without taking focus
    /// and removed layers hand their restore target to the cover instead of
    /// focusing it.
    ///
    /// `wrap` turns the content element of the overlay at a given stack index
    /// into its layer container.
    pub fn sync(
        &mut self,
        snapshot: &Snapshot,
        focus: &dyn FocusHost,
        cover: Option<&mut LayerStack>,
        wrap: impl Fn(usize, &OverlayInstance, Element) -> Element,
    ) -> Vec<Element> {
        let instances = snapshot.get(self.class);
        let version = snapshot.version(self.class);

        let mut cover = cover.filter(|cover| !cover.is_empty());
        let covered = cover.is_some();
        let inherited = cover
            .as_deref()
            .and_then(|cover| cover.layers.first())
            .and_then(|bottom| bottom.trap.restore_to())
            .map(str::to_string);

        if self.synced_version != Some(version) {
            self.unmount_removed(instances, focus, cover.as_deref_mut());
        }

        let mut existing: HashMap<OverlayId, MountedLayer> = self
            .layers
            .drain(..)
            .map(|layer| (layer.id.clone(), layer))
            .collect();

        for (index, instance) in instances.iter().enumerate() {
            let props = self.overlay_props(instance);
            let mut content = instance.content.element(&props);
            stabilize_ids(&mut content, &instance.id.element_id(self.class));
            let element = wrap(index, instance.as_ref(), content);

            let layer = match existing.remove(&instance.id) {
                Some(mut layer) => {
                    layer.element = element;
                    layer.props = props;
                    layer.content = instance.content.clone();
                    layer
                }
                None => {
                    log::debug!("[{}] mount {} (covered: {})", self.class, instance.id, covered);
                    let trap = if covered {
                        FocusTrap::dormant(inherited.clone())
                    } else {
                        FocusTrap::activate(focus, &element)
                    };
                    MountedLayer {
                        id: instance.id.clone(),
                        trap,
                        element,
                        props,
                        content: instance.content.clone(),
                    }
                }
            };
            self.layers.push(layer);
        }

        if let Some(top) = self.layers.last().filter(|_| !covered) {
            top.trap.contain(focus, &top.element);
        }

        self.synced_version = Some(version);
        self.layers.iter().map(|layer| layer.element.clone()).collect()
    }

    /// Unmount layers no longer in the registry, topmost first, handing
    /// focus back as each one goes.
    fn unmount_removed(
        &mut self,
        instances: &[Arc<OverlayInstance>],
        focus: &dyn FocusHost,
        mut cover: Option<&mut LayerStack>,
    ) {
        let live: HashSet<&OverlayId> = instances.iter().map(|i| &i.id).collect();

        let mut index = self.layers.len();
        while index > 0 {
            index -= 1;
            if live.contains(&self.layers[index].id) {
                continue;
            }

            let layer = self.layers.remove(index);
            log::debug!("[{}] unmount {}", self.class, layer.id);

            inherit_restore(&mut self.layers[index..], &layer);
            match cover.as_deref_mut() {
                Some(cover) => inherit_restore(&mut cover.layers, &layer),
                None if index == self.layers.len() => layer.trap.release(focus),
                None => {}
            }
        }
    }

    /// Offer a key to the topmost layer: its content first, then its trap.
    pub fn handle_key(&self, focus: &dyn FocusHost, key: Key, modifiers: Modifiers) -> bool {
        let Some(top) = self.layers.last() else {
            return false;
        };

        let focused = focus.active();
        if top
            .content
            .on_key(key, modifiers, focused.as_deref(), &top.props)
        {
            return true;
        }

        match top.trap.handle_key(focus, &top.element, key) {
            TrapAction::Moved(_) | TrapAction::Stayed => true,
            TrapAction::Escape => {
                if top.props.props.close_on_escape() {
                    log::debug!("[{}] escape closes {}", self.class, top.id);
                    top.props.on_close();
                    true
                } else {
                    false
                }
            }
            TrapAction::Pass => false,
        }
    }
}

/// Layers that captured focus from inside `removed` now restore to wherever
/// `removed` would have.
fn inherit_restore(layers: &mut [MountedLayer], removed: &MountedLayer) {
    for layer in layers {
        let captured_here = layer
            .trap
            .restore_to()
            .is_some_and(|id| contains(&removed.element, id));
        if captured_here {
            log::trace!("[trap] {} inherits restore target from {}", layer.id, removed.id);
            layer
                .trap
                .set_restore_to(removed.trap.restore_to().map(str::to_string));
        }
    }
}
