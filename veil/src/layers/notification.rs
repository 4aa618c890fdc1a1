//! Notification layout and lifecycles.
//!
//! All notifications share one column container. Top-anchored ones read
//! top-to-bottom in arrival order; bottom-anchored ones read bottom-to-top,
//! newest nearest the bottom edge. A spacer separates the two groups.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use veil_dom::{stabilize_ids, Anchor, Element, Key, Modifiers};

use super::lifecycle::{Lifecycle, Phase, Timing};
use super::NOTIFICATION_Z;
use crate::overlay::{OverlayClass, OverlayId, OverlayProps};
use crate::props::Placement;
use crate::registry::{OverlayInstance, Registry, Snapshot};
use crate::wakeup::{Wakeup, WakeupSlot};

/// Flex order of the spacer between the top and bottom groups.
pub const SPACER_ORDER: i16 = 50;

/// Offset that bottom-anchored orders count down from.
const BOTTOM_BASE: i16 = 100;

/// Flex order of the `arrival`-th notification (counted within its
/// placement group).
///
/// Top: `arrival`, so earlier arrivals stay nearest the top edge.
/// Bottom: `100 - arrival`, so later arrivals sort lower and end up nearest
/// the bottom edge. Both groups stay on their side of the spacer for fewer
/// than 50 simultaneous notifications.
pub fn notification_order(placement: Placement, arrival: usize) -> i16 {
    let arrival = i16::try_from(arrival).unwrap_or(i16::MAX);
    match placement {
        Placement::Top => arrival,
        Placement::Bottom => BOTTOM_BASE.saturating_sub(arrival),
    }
}

/// A mounted notification and the registry entry its lifecycle started from.
struct Mounted {
    instance: Arc<OverlayInstance>,
    lifecycle: Lifecycle,
}

/// Mounts notifications, runs their lifecycles and lays them out.
pub struct NotificationRenderer {
    registry: Registry,
    mounted: HashMap<OverlayId, Mounted>,
    dismissals: Arc<Mutex<Vec<OverlayId>>>,
    wakeup: WakeupSlot,
}

impl NotificationRenderer {
    pub fn new(registry: &Registry) -> Self {
        Self {
            registry: registry.clone(),
            mounted: HashMap::new(),
            dismissals: Arc::new(Mutex::new(Vec::new())),
            wakeup: WakeupSlot::default(),
        }
    }

    /// Wake the host loop when a notification asks to be closed.
    pub fn install_wakeup(&self, wakeup: Wakeup) {
        self.wakeup.set(wakeup);
    }

    /// Flex order for every notification in `snapshot`, in arrival order.
    pub fn layout(snapshot: &Snapshot) -> Vec<(OverlayId, i16)> {
        let mut top = 0;
        let mut bottom = 0;
        snapshot
            .get(OverlayClass::Notification)
            .iter()
            .map(|instance| {
                let placement = instance.props.placement();
                let counter = match placement {
                    Placement::Top => &mut top,
                    Placement::Bottom => &mut bottom,
                };
                let order = notification_order(placement, *counter);
                *counter += 1;
                (instance.id.clone(), order)
            })
            .collect()
    }

    fn overlay_props(&self, instance: &OverlayInstance) -> OverlayProps {
        let on_open = {
            let registry = self.registry.clone();
            let id = instance.id.clone();
            let content = instance.content.clone();
            let props = instance.props.clone();
            Arc::new(move || {
                if let Err(e) = registry.register_dyn(
                    OverlayClass::Notification,
                    id.clone(),
                    content.clone(),
                    props.clone(),
                ) {
                    log::warn!("[notification] re-open {} failed: {}", id, e);
                }
            })
        };
        let on_close = {
            let dismissals = self.dismissals.clone();
            let wakeup = self.wakeup.clone();
            let id = instance.id.clone();
            Arc::new(move || {
                dismissals
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(id.clone());
                wakeup.wake();
            })
        };
        OverlayProps::new(instance.id.key.clone(), instance.props.clone(), on_open, on_close)
    }

    /// Mount new notifications and drop lifecycles of removed ones.
    ///
    /// A notification re-opened under the same key starts its lifecycle over
    /// with the new props, whatever phase the old one was in.
    pub fn reconcile(&mut self, snapshot: &Snapshot, now: Instant) {
        let instances = snapshot.get(OverlayClass::Notification);
        let live: HashSet<&OverlayId> = instances.iter().map(|i| &i.id).collect();

        self.mounted.retain(|id, mounted| {
            let keep = live.contains(id);
            if !keep {
                mounted.lifecycle.cancel();
                log::debug!("[notification] unmount {}", id);
            }
            keep
        });

        let transition = self.registry.config().transition_duration();
        for instance in instances {
            let replaced = match self.mounted.get_mut(&instance.id) {
                Some(mounted) if Arc::ptr_eq(&mounted.instance, instance) => continue,
                Some(mounted) => {
                    mounted.lifecycle.cancel();
                    true
                }
                None => false,
            };
            let timing = Timing::from_props(&instance.props, transition);
            let mut lifecycle = Lifecycle::start(now, timing);
            lifecycle.advance(now);
            log::debug!(
                "[notification] {} {} ({:?}, {:?})",
                if replaced { "restart" } else { "mount" },
                instance.id,
                lifecycle.phase(),
                timing
            );
            self.mounted.insert(
                instance.id.clone(),
                Mounted {
                    instance: instance.clone(),
                    lifecycle,
                },
            );
        }
    }

    /// Apply queued dismissals and due timers. Notifications that reach
    /// `Closed` are removed from the registry. Returns true if anything
    /// changed on screen.
    pub fn tick(&mut self, now: Instant) -> bool {
        let queued: Vec<OverlayId> = std::mem::take(
            &mut *self.dismissals.lock().unwrap_or_else(|e| e.into_inner()),
        );

        let mut changed = false;
        for id in queued {
            changed |= self.dismiss(&id, now);
        }

        for mounted in self.mounted.values_mut() {
            changed |= mounted.lifecycle.advance(now);
        }

        let closed: Vec<OverlayId> = self
            .mounted
            .iter()
            .filter(|(_, mounted)| mounted.lifecycle.is_closed())
            .map(|(id, _)| id.clone())
            .collect();
        for id in closed {
            self.mounted.remove(&id);
            self.registry.unregister_id(OverlayClass::Notification, &id);
            changed = true;
        }

        changed
    }

    /// Start the exit transition of a mounted notification.
    ///
    /// Returns false if it is not mounted or already leaving.
    pub fn dismiss(&mut self, id: &OverlayId, now: Instant) -> bool {
        match self.mounted.get_mut(id).map(|mounted| &mut mounted.lifecycle) {
            Some(lifecycle) => {
                let changed = lifecycle.request_close(now);
                if changed {
                    log::debug!("[notification] dismiss {} -> {:?}", id, lifecycle.phase());
                }
                changed
            }
            None => {
                log::trace!("[notification] dismiss {}: not mounted", id);
                false
            }
        }
    }

    pub fn phase(&self, id: &OverlayId) -> Option<Phase> {
        self.mounted.get(id).map(|mounted| mounted.lifecycle.phase())
    }

    /// Earliest pending timer across all mounted notifications.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.mounted
            .values()
            .filter_map(|mounted| mounted.lifecycle.deadline())
            .min()
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Build the shared container with every notification currently shown.
    pub fn render(&self, snapshot: &Snapshot) -> Element {
        let mut container = Element::col()
            .id("notifications")
            .anchor(Anchor::Corner)
            .z_index(NOTIFICATION_Z)
            .child(
                Element::box_()
                    .id("notifications:spacer")
                    .order(SPACER_ORDER),
            );

        for (id, order) in Self::layout(snapshot) {
            let Some(lifecycle) = self.mounted.get(&id).map(|mounted| &mounted.lifecycle) else {
                continue;
            };
            if !lifecycle.is_shown() {
                continue;
            }
            let Some(instance) = snapshot.find(OverlayClass::Notification, &id) else {
                continue;
            };
            let props = self.overlay_props(instance);
            let element_id = id.element_id(OverlayClass::Notification);
            let mut content = instance.content.element(&props);
            stabilize_ids(&mut content, &element_id);
            let phase = match lifecycle.phase() {
                Phase::Exiting => "exiting",
                _ => "visible",
            };
            container = container.child(
                Element::box_()
                    .id(element_id)
                    .order(order)
                    .data("overlay", id.key.clone())
                    .data("placement", instance.props.placement().as_str())
                    .data("phase", phase)
                    .child(content),
            );
        }

        container
    }

    /// Offer a key to shown notifications, newest first.
    pub fn handle_key(&self, snapshot: &Snapshot, key: Key, modifiers: Modifiers) -> bool {
        snapshot
            .get(OverlayClass::Notification)
            .iter()
            .rev()
            .filter(|instance| {
                self.mounted
                    .get(&instance.id)
                    .is_some_and(|mounted| mounted.lifecycle.phase() == Phase::Visible)
            })
            .any(|instance| {
                let props = self.overlay_props(instance);
                instance.content.on_key(key, modifiers, None, &props)
            })
    }
}
