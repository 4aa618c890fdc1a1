//! Focus trap for dialog and panel layers.

use veil_dom::element::contains;
use veil_dom::{collect_focusable, cycle_focus, Element, Key};

use crate::document::FocusHost;

/// What the trap did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapAction {
    /// Tab/Shift+Tab moved focus to this element.
    Moved(String),
    /// Tab/Shift+Tab had nowhere else to go; focus stays put.
    Stayed,
    /// Escape was pressed inside the trap.
    Escape,
    /// Not a trap key.
    Pass,
}

/// Confines Tab cycling to one container and remembers where focus was
/// before the container took it.
#[derive(Debug)]
pub struct FocusTrap {
    restore_to: Option<String>,
}

impl FocusTrap {
    /// Capture the current focus and move it into `container`: to the first
    /// focusable descendant, or the container itself if there is none.
    pub fn activate(focus: &dyn FocusHost, container: &Element) -> Self {
        let restore_to = focus.active();
        let target = collect_focusable(container)
            .into_iter()
            .next()
            .unwrap_or_else(|| container.id.clone());
        log::debug!("[trap] activate {} (restore to {:?})", target, restore_to);
        focus.focus(&target);
        Self { restore_to }
    }

    /// A trap for a container mounted under another trapped layer. Focus is
    /// not moved; `restore_to` is where it goes when the container closes.
    pub fn dormant(restore_to: Option<String>) -> Self {
        log::debug!("[trap] dormant (restore to {:?})", restore_to);
        Self { restore_to }
    }

    pub fn restore_to(&self) -> Option<&str> {
        self.restore_to.as_deref()
    }

    pub fn set_restore_to(&mut self, restore_to: Option<String>) {
        self.restore_to = restore_to;
    }

    pub fn handle_key(&self, focus: &dyn FocusHost, container: &Element, key: Key) -> TrapAction {
        let forward = match key {
            Key::Tab => true,
            Key::BackTab => false,
            Key::Escape => return TrapAction::Escape,
            _ => return TrapAction::Pass,
        };

        let focusable = collect_focusable(container);
        let current = focus.active();
        match cycle_focus(&focusable, current.as_deref(), forward) {
            Some(next) if current.as_deref() != Some(next.as_str()) => {
                focus.focus(&next);
                TrapAction::Moved(next)
            }
            _ => TrapAction::Stayed,
        }
    }

    /// Re-capture focus if it escaped the container (e.g. the element that
    /// held it disappeared on re-render).
    pub fn contain(&self, focus: &dyn FocusHost, container: &Element) {
        let inside = focus
            .active()
            .is_some_and(|id| contains(container, &id));
        if !inside {
            let target = collect_focusable(container)
                .into_iter()
                .next()
                .unwrap_or_else(|| container.id.clone());
            focus.focus(&target);
        }
    }

    /// Give focus back to whatever held it before activation.
    pub fn release(self, focus: &dyn FocusHost) {
        log::debug!("[trap] release (restore to {:?})", self.restore_to);
        match self.restore_to {
            Some(id) => focus.focus(&id),
            None => focus.blur(),
        }
    }
}
