//! Host runtime: owns the renderers, routes keys and drives timers.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::time::Instant;
use veil_dom::{Element, Key, Modifiers};

use crate::document::{FocusHost, ScrollLock};
use crate::layers::{DialogRenderer, NotificationRenderer, PanelRenderer};
use crate::overlay::{OverlayClass, OverlayId};
use crate::registry::{Registry, Subscription};
use crate::wakeup::{self, Wakeups};

/// Everything the overlay layers want on screen, bottom layer first within
/// each class. Panels sit below dialogs; notifications sit above both.
#[derive(Debug, Clone)]
pub struct Frame {
    pub panels: Vec<Element>,
    pub dialogs: Vec<Element>,
    pub notifications: Element,
    pub scroll_locked: bool,
}

impl Frame {
    /// All layers in paint order.
    pub fn layers(&self) -> impl Iterator<Item = &Element> {
        self.panels
            .iter()
            .chain(self.dialogs.iter())
            .chain(std::iter::once(&self.notifications))
    }

    /// True if a dialog or panel is up and the page should not take input.
    pub fn has_trapped_layer(&self) -> bool {
        !self.dialogs.is_empty() || !self.panels.is_empty()
    }
}

/// Input delivered to [`Host::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Key(Key, Modifiers),
    /// Redraw without other changes (e.g. terminal resize).
    Redraw,
}

/// The page behind the overlays, as seen by [`Host::run`].
pub trait Page {
    type Error;

    /// A key no overlay consumed. `trapped` is true when a dialog or panel
    /// is open, in which case pages normally ignore the key.
    fn on_key(&mut self, key: Key, modifiers: Modifiers, trapped: bool, registry: &Registry);

    /// Paint the page and the overlay frame.
    fn draw(&mut self, frame: &Frame, focused: Option<&str>) -> Result<(), Self::Error>;

    /// Checked once per loop iteration.
    fn should_exit(&self) -> bool {
        false
    }
}

pub struct Host {
    registry: Registry,
    focus: Arc<dyn FocusHost>,
    dialogs: DialogRenderer,
    panels: PanelRenderer,
    notifications: NotificationRenderer,
}

impl Host {
    pub fn new(registry: Registry, focus: Arc<dyn FocusHost>, scroll_lock: Arc<dyn ScrollLock>) -> Self {
        Self {
            dialogs: DialogRenderer::new(&registry),
            panels: PanelRenderer::new(&registry, scroll_lock),
            notifications: NotificationRenderer::new(&registry),
            registry,
            focus,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn focused(&self) -> Option<String> {
        self.focus.active()
    }

    pub fn dialogs(&self) -> &DialogRenderer {
        &self.dialogs
    }

    pub fn panels(&self) -> &PanelRenderer {
        &self.panels
    }

    pub fn notifications(&self) -> &NotificationRenderer {
        &self.notifications
    }

    /// Reconcile every renderer against one snapshot and build the frame.
    ///
    /// Dialogs sync before the panels beneath them so that only the topmost
    /// trapped layer ever moves focus.
    pub fn render(&mut self, now: Instant) -> Frame {
        let snapshot = self.registry.snapshot();
        self.notifications.reconcile(&snapshot, now);
        let dialogs = self.dialogs.sync(&snapshot, self.focus.as_ref());
        let panels = self
            .panels
            .sync_beneath(&snapshot, self.focus.as_ref(), &mut self.dialogs);
        Frame {
            panels,
            dialogs,
            notifications: self.notifications.render(&snapshot),
            scroll_locked: self.panels.is_scroll_locked(),
        }
    }

    /// Route a key to the topmost trapped layer (last dialog, else last
    /// panel). With no trapped layer, shown notifications get a chance.
    /// Returns true if an overlay consumed it.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if !self.dialogs.is_empty() {
            return self.dialogs.handle_key(self.focus.as_ref(), key, modifiers);
        }
        if !self.panels.is_empty() {
            return self.panels.handle_key(self.focus.as_ref(), key, modifiers);
        }
        let snapshot = self.registry.snapshot();
        self.notifications.handle_key(&snapshot, key, modifiers)
    }

    /// Advance notification timers. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let snapshot = self.registry.snapshot();
        self.notifications.reconcile(&snapshot, now);
        self.notifications.tick(now)
    }

    /// Start a notification's exit transition.
    pub fn dismiss_notification(&mut self, id: &OverlayId, now: Instant) -> bool {
        self.notifications.dismiss(id, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.notifications.next_deadline()
    }

    fn wire_wakeups(&self) -> (Subscription, Wakeups) {
        let (waker, wakeups) = wakeup::channel();
        self.notifications.install_wakeup(waker.clone());
        let subscription = self.registry.subscribe(move |class: OverlayClass| {
            log::trace!("[host] wakeup ({})", class);
            waker.wake();
        });
        (subscription, wakeups)
    }

    /// Run until `events` ends or the page asks to exit.
    ///
    /// Each iteration ticks timers, renders, draws, then waits for the next
    /// input event, registry change or timer deadline.
    pub async fn run<S, P>(&mut self, mut events: S, page: &mut P) -> Result<(), P::Error>
    where
        S: Stream<Item = HostEvent> + Unpin,
        P: Page,
    {
        let (_subscription, mut wakeups) = self.wire_wakeups();

        loop {
            let now = Instant::now();
            self.tick(now);
            let frame = self.render(now);
            let focused = self.focus.active();
            page.draw(&frame, focused.as_deref())?;

            if page.should_exit() {
                log::debug!("[host] page requested exit");
                return Ok(());
            }

            let deadline = self.next_deadline();
            tokio::select! {
                event = events.next() => match event {
                    Some(HostEvent::Key(key, modifiers)) => {
                        if !self.handle_key(key, modifiers) {
                            page.on_key(key, modifiers, frame.has_trapped_layer(), &self.registry);
                        }
                    }
                    Some(HostEvent::Redraw) => {}
                    None => {
                        log::debug!("[host] input closed");
                        return Ok(());
                    }
                },
                true = wakeups.wait() => {}
                _ = sleep_until(deadline) => {}
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
