//! Capabilities the overlay layers need from the surrounding screen.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use veil_dom::FocusState;

/// Access to the screen-wide focused element.
pub trait FocusHost: Send + Sync {
    /// ID of the currently focused element.
    fn active(&self) -> Option<String>;

    fn focus(&self, id: &str);

    fn blur(&self);
}

impl FocusHost for Mutex<FocusState> {
    fn active(&self) -> Option<String> {
        let state = self.lock().unwrap_or_else(|e| e.into_inner());
        state.focused().map(str::to_string)
    }

    fn focus(&self, id: &str) {
        let mut state = self.lock().unwrap_or_else(|e| e.into_inner());
        state.focus(id);
    }

    fn blur(&self) {
        let mut state = self.lock().unwrap_or_else(|e| e.into_inner());
        state.blur();
    }
}

/// Page-level scroll lock toggled while a backdrop-bearing panel is open.
///
/// In a terminal this usually means "stop routing input to the page behind".
pub trait ScrollLock: Send + Sync {
    fn lock_scroll(&self);

    fn unlock_scroll(&self);
}

/// A scroll lock that just records its state.
#[derive(Debug, Default)]
pub struct ScrollLockFlag {
    locked: AtomicBool,
    toggles: AtomicUsize,
}

impl ScrollLockFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    /// Number of lock/unlock calls seen so far.
    pub fn toggles(&self) -> usize {
        self.toggles.load(Ordering::SeqCst)
    }
}

impl ScrollLock for ScrollLockFlag {
    fn lock_scroll(&self) {
        self.locked.store(true, Ordering::SeqCst);
        self.toggles.fetch_add(1, Ordering::SeqCst);
    }

    fn unlock_scroll(&self) {
        self.locked.store(false, Ordering::SeqCst);
        self.toggles.fetch_add(1, Ordering::SeqCst);
    }
}
