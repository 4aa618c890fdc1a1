//! Overlay registry for terminal UIs.
//!
//! Any code holding a [`Registry`] can open a dialog, a bottom panel or a
//! notification; the [`Host`] mounts what is open, traps focus, derives the
//! page scroll lock and runs notification timers.

pub mod config;
pub mod document;
pub mod error;
pub mod focus_trap;
pub mod hooks;
pub mod layers;
pub mod overlay;
pub mod props;
pub mod registry;
pub mod runtime;
pub mod timer;
pub mod toast;
pub mod wakeup;

pub use config::VeilConfig;
pub use error::OverlayError;
pub use overlay::{OverlayClass, OverlayContent, OverlayId, OverlayKind, OverlayProps};
pub use props::{DialogProps, NotificationProps, PanelProps, Placement, Props, Scrim};
pub use registry::{OverlayInstance, Registration, Registry, Snapshot, Subscription};
pub use runtime::{Frame, Host, HostEvent, Page};

pub mod prelude {
    pub use crate::config::VeilConfig;
    pub use crate::document::{FocusHost, ScrollLock, ScrollLockFlag};
    pub use crate::error::OverlayError;
    pub use crate::hooks::{Dialogs, Notifications, Panels};
    pub use crate::overlay::{OverlayClass, OverlayContent, OverlayId, OverlayKind, OverlayProps};
    pub use crate::props::{DialogProps, NotificationProps, PanelProps, Placement, Props, Scrim};
    pub use crate::registry::{Registration, Registry};
    pub use crate::runtime::{Frame, Host, HostEvent, Page};
    pub use crate::toast::{Toast, ToastLevel};

    pub use veil_dom::{Element, FocusState, Key, Modifiers};
}
