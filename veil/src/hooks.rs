//! Class-scoped facades over [`Registry::register`] and
//! [`Registry::unregister`], so call sites never name the class.
//!
//! ```ignore
//! let dialogs = registry.dialogs();
//! dialogs.open(Welcome, "welcome", Props::new().with("message", "hi"))?;
//! dialogs.close::<Welcome>("welcome");
//! ```

use crate::error::OverlayError;
use crate::overlay::{OverlayClass, OverlayContent, OverlayKind};
use crate::props::{NotificationProps, Props};
use crate::registry::{Registration, Registry};
use crate::toast::Toast;

macro_rules! overlay_facade {
    ($(#[$meta:meta])* $name:ident, $class:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            registry: Registry,
        }

        impl $name {
            pub fn new(registry: &Registry) -> Self {
                Self {
                    registry: registry.clone(),
                }
            }

            pub const CLASS: OverlayClass = $class;

            pub fn open<C: OverlayContent>(
                &self,
                content: C,
                key: impl Into<String>,
                props: impl Into<Props>,
            ) -> Result<Registration, OverlayError> {
                self.registry.register(Self::CLASS, content, key, props)
            }

            pub fn close<C: OverlayContent>(&self, key: &str) -> bool {
                self.registry
                    .unregister(Self::CLASS, OverlayKind::of::<C>(), key)
            }
        }
    };
}

overlay_facade!(
    /// Opens and closes dialogs.
    Dialogs,
    OverlayClass::Dialog
);

overlay_facade!(
    /// Opens and closes bottom panels.
    Panels,
    OverlayClass::Panel
);

overlay_facade!(
    /// Opens and closes notifications.
    Notifications,
    OverlayClass::Notification
);

impl Notifications {
    /// Show a stock toast under a fresh key. Returns the key.
    pub fn toast(
        &self,
        toast: impl Into<Toast>,
        props: NotificationProps,
    ) -> Result<String, OverlayError> {
        let key = format!("toast-{}", uuid::Uuid::new_v4());
        self.open(toast.into(), key.clone(), props)?;
        Ok(key)
    }
}
