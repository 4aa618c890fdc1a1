//! Registry configuration.
//!
//! The config supplies the class-level defaults merged into every overlay's
//! props, plus the notification exit transition which is fixed per registry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;
use crate::overlay::OverlayClass;
use crate::props::{keys, millis, Placement, Props, Scrim};

/// Default visible duration for auto-hiding notifications.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Default exit transition for notifications.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    pub dialog: DialogConfig,
    pub panel: PanelConfig,
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Escape closes the topmost dialog unless its props say otherwise.
    pub close_on_escape: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub default_scrim: Scrim,
    pub close_on_escape: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_scrim: Scrim::Modal,
            close_on_escape: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub transition_ms: u64,
    pub auto_hide: bool,
    pub default_placement: Placement,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: millis(DEFAULT_NOTIFICATION_DURATION),
            transition_ms: millis(DEFAULT_TRANSITION),
            auto_hide: true,
            default_placement: Placement::Top,
        }
    }
}

impl VeilConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, OverlayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the default visible duration for notifications.
    pub fn notification_duration(mut self, duration: Duration) -> Self {
        self.notification.duration_ms = millis(duration);
        self
    }

    /// Set the default enter delay for notifications.
    pub fn notification_delay(mut self, delay: Duration) -> Self {
        self.notification.delay_ms = millis(delay);
        self
    }

    /// Set the notification exit transition.
    pub fn transition(mut self, transition: Duration) -> Self {
        self.notification.transition_ms = millis(transition);
        self
    }

    pub fn default_placement(mut self, placement: Placement) -> Self {
        self.notification.default_placement = placement;
        self
    }

    pub fn default_scrim(mut self, scrim: Scrim) -> Self {
        self.panel.default_scrim = scrim;
        self
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.notification.transition_ms)
    }

    /// Props every overlay of `class` starts from.
    pub fn class_defaults(&self, class: OverlayClass) -> Props {
        match class {
            OverlayClass::Dialog => {
                Props::new().with(keys::CLOSE_ON_ESCAPE, self.dialog.close_on_escape)
            }
            OverlayClass::Panel => Props::new()
                .with(keys::SCRIM, self.panel.default_scrim.as_str())
                .with(keys::CLOSE_ON_ESCAPE, self.panel.close_on_escape),
            OverlayClass::Notification => Props::new()
                .with(keys::PLACEMENT, self.notification.default_placement.as_str())
                .with(keys::DELAY, self.notification.delay_ms)
                .with(keys::DURATION, self.notification.duration_ms)
                .with(keys::AUTO_HIDE, self.notification.auto_hide),
        }
    }
}
