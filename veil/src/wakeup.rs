//! Coalescing wakeups for the host loop.
//!
//! The loop sleeps while nothing is due. Registry observers and notification
//! dismissals poke it through a [`Wakeup`]; any number of pokes between two
//! waits collapse into one render.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

#[derive(Clone, Debug)]
pub struct Wakeup {
    tx: mpsc::Sender<()>,
}

impl Wakeup {
    /// Never blocks. A full buffer already holds a pending wakeup and a
    /// closed one means the loop has stopped, so both are ignored.
    pub fn wake(&self) {
        let _ = self.tx.try_send(());
    }
}

pub struct Wakeups {
    rx: mpsc::Receiver<()>,
}

impl Wakeups {
    /// Wait for a wakeup and swallow any others already queued.
    ///
    /// Returns false once every [`Wakeup`] has been dropped.
    pub async fn wait(&mut self) -> bool {
        if self.rx.recv().await.is_none() {
            return false;
        }
        while self.rx.try_recv().is_ok() {}
        true
    }
}

pub fn channel() -> (Wakeup, Wakeups) {
    let (tx, rx) = mpsc::channel(4);
    (Wakeup { tx }, Wakeups { rx })
}

/// A [`Wakeup`] that is plugged in after construction, once a loop runs.
#[derive(Debug, Default, Clone)]
pub(crate) struct WakeupSlot(Arc<Mutex<Option<Wakeup>>>);

impl WakeupSlot {
    pub fn set(&self, wakeup: Wakeup) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(wakeup);
    }

    pub fn wake(&self) {
        if let Some(wakeup) = self.0.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            wakeup.wake();
        }
    }
}
