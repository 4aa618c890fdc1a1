//! The overlay registry: shared store of every active overlay, grouped by
//! class, with a two-operation mutation API.
//!
//! `Registry` is a cheap handle. Clone it into whatever needs to open or
//! close overlays; all clones see the same store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::config::VeilConfig;
use crate::error::OverlayError;
use crate::hooks::{Dialogs, Notifications, Panels};
use crate::overlay::{OverlayClass, OverlayContent, OverlayId, OverlayKind};
use crate::props::Props;

/// One open overlay.
#[derive(Clone)]
pub struct OverlayInstance {
    pub class: OverlayClass,
    pub id: OverlayId,
    pub content: Arc<dyn OverlayContent>,
    pub props: Props,
}

impl OverlayInstance {
    pub fn kind(&self) -> OverlayKind {
        self.id.kind
    }

    pub fn key(&self) -> &str {
        &self.id.key
    }
}

impl fmt::Debug for OverlayInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayInstance")
            .field("class", &self.class)
            .field("id", &self.id)
            .field("content", &self.content.name())
            .field("props", &self.props)
            .finish()
    }
}

/// Outcome of [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Appended at the tail of the class sequence.
    Inserted,
    /// An overlay with the same `(kind, key)` was open; its content and props
    /// were replaced in place and it kept its position.
    Replaced,
}

/// A consistent copy of the registry at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    classes: HashMap<OverlayClass, Vec<Arc<OverlayInstance>>>,
    versions: HashMap<OverlayClass, u64>,
}

impl Snapshot {
    /// Overlays of `class` in arrival order.
    pub fn get(&self, class: OverlayClass) -> &[Arc<OverlayInstance>] {
        self.classes.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn version(&self, class: OverlayClass) -> u64 {
        self.versions.get(&class).copied().unwrap_or(0)
    }

    pub fn find(&self, class: OverlayClass, id: &OverlayId) -> Option<&Arc<OverlayInstance>> {
        self.get(class).iter().find(|instance| &instance.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.values().all(Vec::is_empty)
    }
}

type Observer = Arc<dyn Fn(OverlayClass) + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

/// Keeps an observer registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    observers: Weak<Mutex<Observers>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            let mut observers = observers.lock().unwrap_or_else(|e| e.into_inner());
            observers.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

struct RegistryInner {
    classes: HashMap<OverlayClass, Vec<Arc<OverlayInstance>>>,
    versions: HashMap<OverlayClass, u64>,
}

impl RegistryInner {
    fn new() -> Self {
        Self {
            classes: OverlayClass::ALL.iter().map(|c| (*c, Vec::new())).collect(),
            versions: OverlayClass::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    fn sequence_mut(&mut self, class: OverlayClass) -> &mut Vec<Arc<OverlayInstance>> {
        self.classes.entry(class).or_default()
    }

    fn bump(&mut self, class: OverlayClass) {
        *self.versions.entry(class).or_insert(0) += 1;
    }
}

/// Shared overlay store.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
    observers: Arc<Mutex<Observers>>,
    config: Arc<VeilConfig>,
}

impl Registry {
    /// Create a registry with the default config. All classes start empty.
    pub fn new() -> Self {
        Self::with_config(VeilConfig::default())
    }

    pub fn with_config(config: VeilConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::new())),
            observers: Arc::new(Mutex::new(Observers::default())),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &VeilConfig {
        &self.config
    }

    /// Open an overlay of `class`.
    ///
    /// Class defaults from the config are merged into `props` and the result
    /// is validated before the store is touched. If `(kind, key)` is already
    /// open in `class`, its content and props are replaced in place.
    pub fn register<C: OverlayContent>(
        &self,
        class: OverlayClass,
        content: C,
        key: impl Into<String>,
        props: impl Into<Props>,
    ) -> Result<Registration, OverlayError> {
        let id = OverlayId::of::<C>(key);
        self.register_dyn(class, id, Arc::new(content), props.into())
    }

    pub(crate) fn register_dyn(
        &self,
        class: OverlayClass,
        id: OverlayId,
        content: Arc<dyn OverlayContent>,
        mut props: Props,
    ) -> Result<Registration, OverlayError> {
        props.merge_defaults(&self.config.class_defaults(class));
        props.validate_for(class)?;

        let instance = Arc::new(OverlayInstance {
            class,
            id,
            content,
            props,
        });

        let registration = {
            let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
            let sequence = inner.sequence_mut(class);
            let registration = match sequence.iter().position(|e| e.id == instance.id) {
                Some(index) => {
                    sequence[index] = instance.clone();
                    Registration::Replaced
                }
                None => {
                    sequence.push(instance.clone());
                    Registration::Inserted
                }
            };
            inner.bump(class);
            registration
        };

        log::debug!(
            "[registry] register {} {} -> {:?}",
            class,
            instance.id,
            registration
        );
        self.notify(class);
        Ok(registration)
    }

    /// Close an overlay. Returns false (and does nothing) if it was not open.
    pub fn unregister(&self, class: OverlayClass, kind: OverlayKind, key: &str) -> bool {
        let removed = {
            let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
            let sequence = inner.sequence_mut(class);
            let before = sequence.len();
            sequence.retain(|e| !(e.id.kind == kind && e.id.key == key));
            let removed = sequence.len() != before;
            if removed {
                inner.bump(class);
            }
            removed
        };

        if removed {
            log::debug!("[registry] unregister {} {}/{}", class, kind.short_name(), key);
            self.notify(class);
        } else {
            log::trace!(
                "[registry] unregister {} {}/{}: not open",
                class,
                kind.short_name(),
                key
            );
        }
        removed
    }

    pub fn unregister_id(&self, class: OverlayClass, id: &OverlayId) -> bool {
        self.unregister(class, id.kind, &id.key)
    }

    /// Copy of the whole store, taken under one lock.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Snapshot {
            classes: inner.classes.clone(),
            versions: inner.versions.clone(),
        }
    }

    /// Overlays of `class` in arrival order.
    pub fn get(&self, class: OverlayClass) -> Vec<Arc<OverlayInstance>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.classes.get(&class).cloned().unwrap_or_default()
    }

    pub fn len(&self, class: OverlayClass) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.classes.get(&class).map_or(0, Vec::len)
    }

    pub fn is_open(&self, class: OverlayClass, id: &OverlayId) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .classes
            .get(&class)
            .is_some_and(|sequence| sequence.iter().any(|e| &e.id == id))
    }

    /// Change counter for `class`. Bumped on every effective mutation.
    pub fn version(&self, class: OverlayClass) -> u64 {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.versions.get(&class).copied().unwrap_or(0)
    }

    /// Close everything.
    pub fn reset(&self) {
        let changed: Vec<OverlayClass> = {
            let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
            let mut changed = Vec::new();
            for class in OverlayClass::ALL {
                let sequence = inner.sequence_mut(class);
                if !sequence.is_empty() {
                    sequence.clear();
                    inner.bump(class);
                    changed.push(class);
                }
            }
            changed
        };

        log::debug!("[registry] reset ({} classes changed)", changed.len());
        for class in changed {
            self.notify(class);
        }
    }

    /// Call `observer` with the changed class after every effective mutation.
    ///
    /// Observers run after the store lock is released, so they may read or
    /// mutate the registry.
    pub fn subscribe(&self, observer: impl Fn(OverlayClass) + Send + Sync + 'static) -> Subscription {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        let id = observers.next_id;
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));
        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    fn notify(&self, class: OverlayClass) {
        let observers: Vec<Observer> = {
            let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
            observers.entries.iter().map(|(_, o)| o.clone()).collect()
        };
        for observer in observers {
            observer(class);
        }
    }

    /// True if both handles point at the same store.
    pub fn same_store(&self, other: &Registry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn dialogs(&self) -> Dialogs {
        Dialogs::new(self)
    }

    pub fn panels(&self) -> Panels {
        Panels::new(self)
    }

    pub fn notifications(&self) -> Notifications {
        Notifications::new(self)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut s = f.debug_struct("Registry");
        for class in OverlayClass::ALL {
            s.field(class.as_str(), &inner.classes.get(&class).map_or(0, Vec::len));
        }
        s.finish()
    }
}
