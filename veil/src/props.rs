//! Overlay props: a string-keyed bag of JSON values plus typed views of the
//! class-level fields.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OverlayError;
use crate::overlay::OverlayClass;

/// Well-known prop names read by the renderers.
pub mod keys {
    pub const CLOSE_ON_ESCAPE: &str = "close_on_escape";
    pub const SCRIM: &str = "scrim";
    pub const PLACEMENT: &str = "placement";
    pub const DELAY: &str = "delay";
    pub const DURATION: &str = "duration";
    pub const AUTO_HIDE: &str = "auto_hide";
}

/// Arbitrary data an overlay's content needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, Value>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fill in every key from `defaults` that is not already set.
    pub fn merge_defaults(&mut self, defaults: &Props) {
        for (key, value) in &defaults.0 {
            self.0
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Check that the class-level fields hold values of the right shape.
    pub fn validate_for(&self, class: OverlayClass) -> Result<(), OverlayError> {
        match class {
            OverlayClass::Dialog => {
                self.expect(class, keys::CLOSE_ON_ESCAPE, "a boolean", Value::is_boolean)?;
            }
            OverlayClass::Panel => {
                self.expect(class, keys::CLOSE_ON_ESCAPE, "a boolean", Value::is_boolean)?;
                if let Some(value) = self.get(keys::SCRIM) {
                    parse_str::<Scrim>(class, keys::SCRIM, "\"modal\" or \"none\"", value)?;
                }
            }
            OverlayClass::Notification => {
                if let Some(value) = self.get(keys::PLACEMENT) {
                    parse_str::<Placement>(class, keys::PLACEMENT, "\"top\" or \"bottom\"", value)?;
                }
                self.expect(class, keys::DELAY, "milliseconds", Value::is_u64)?;
                self.expect(class, keys::DURATION, "milliseconds", Value::is_u64)?;
                self.expect(class, keys::AUTO_HIDE, "a boolean", Value::is_boolean)?;
            }
        }
        Ok(())
    }

    fn expect(
        &self,
        class: OverlayClass,
        key: &'static str,
        expected: &'static str,
        check: fn(&Value) -> bool,
    ) -> Result<(), OverlayError> {
        match self.get(key) {
            Some(value) if !check(value) => Err(OverlayError::InvalidProp {
                class,
                key,
                expected,
                found: value.to_string(),
            }),
            _ => Ok(()),
        }
    }

    // Typed views. Props are validated on registration, so these only fall
    // back for keys that were never set.

    pub fn close_on_escape(&self) -> bool {
        self.get_bool(keys::CLOSE_ON_ESCAPE).unwrap_or(true)
    }

    pub fn scrim(&self) -> Scrim {
        self.get_str(keys::SCRIM)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn placement(&self) -> Placement {
        self.get_str(keys::PLACEMENT)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.get_u64(keys::DELAY).unwrap_or(0))
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.get_u64(keys::DURATION).unwrap_or(0))
    }

    pub fn auto_hide(&self) -> bool {
        self.get_bool(keys::AUTO_HIDE).unwrap_or(true)
    }
}

fn parse_str<T: FromStr>(
    class: OverlayClass,
    key: &'static str,
    expected: &'static str,
    value: &Value,
) -> Result<T, OverlayError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| OverlayError::InvalidProp {
            class,
            key,
            expected,
            found: value.to_string(),
        })
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Which screen edge a notification is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            other => Err(OverlayError::InvalidProp {
                class: OverlayClass::Notification,
                key: keys::PLACEMENT,
                expected: "\"top\" or \"bottom\"",
                found: other.to_string(),
            }),
        }
    }
}

/// Backdrop mode of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scrim {
    /// Dimmed backdrop that blocks the page and locks background scrolling.
    #[default]
    Modal,
    /// No backdrop; the page stays interactive.
    None,
}

impl Scrim {
    pub fn as_str(self) -> &'static str {
        match self {
            Scrim::Modal => "modal",
            Scrim::None => "none",
        }
    }

    /// True if this mode puts a backdrop behind the panel.
    pub fn has_backdrop(self) -> bool {
        matches!(self, Scrim::Modal)
    }
}

impl fmt::Display for Scrim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scrim {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modal" => Ok(Scrim::Modal),
            "none" => Ok(Scrim::None),
            other => Err(OverlayError::InvalidProp {
                class: OverlayClass::Panel,
                key: keys::SCRIM,
                expected: "\"modal\" or \"none\"",
                found: other.to_string(),
            }),
        }
    }
}

/// Typed props for dialogs.
#[derive(Debug, Clone, Default)]
pub struct DialogProps {
    close_on_escape: Option<bool>,
    extra: Props,
}

impl DialogProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = Some(close);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }
}

impl From<DialogProps> for Props {
    fn from(dialog: DialogProps) -> Self {
        let mut props = dialog.extra;
        if let Some(close) = dialog.close_on_escape {
            props.insert(keys::CLOSE_ON_ESCAPE, close);
        }
        props
    }
}

/// Typed props for panels.
#[derive(Debug, Clone, Default)]
pub struct PanelProps {
    scrim: Option<Scrim>,
    close_on_escape: Option<bool>,
    extra: Props,
}

impl PanelProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrim(mut self, scrim: Scrim) -> Self {
        self.scrim = Some(scrim);
        self
    }

    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = Some(close);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }
}

impl From<PanelProps> for Props {
    fn from(panel: PanelProps) -> Self {
        let mut props = panel.extra;
        if let Some(scrim) = panel.scrim {
            props.insert(keys::SCRIM, scrim.as_str());
        }
        if let Some(close) = panel.close_on_escape {
            props.insert(keys::CLOSE_ON_ESCAPE, close);
        }
        props
    }
}

/// Typed props for notifications. Unset fields come from the config.
#[derive(Debug, Clone, Default)]
pub struct NotificationProps {
    placement: Option<Placement>,
    delay: Option<Duration>,
    duration: Option<Duration>,
    auto_hide: Option<bool>,
    extra: Props,
}

impl NotificationProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top() -> Self {
        Self::new().placement(Placement::Top)
    }

    pub fn bottom() -> Self {
        Self::new().placement(Placement::Bottom)
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Wait this long before showing the notification.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How long the notification stays visible when auto-hiding.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = Some(auto_hide);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }
}

impl From<NotificationProps> for Props {
    fn from(notification: NotificationProps) -> Self {
        let mut props = notification.extra;
        if let Some(placement) = notification.placement {
            props.insert(keys::PLACEMENT, placement.as_str());
        }
        if let Some(delay) = notification.delay {
            props.insert(keys::DELAY, millis(delay));
        }
        if let Some(duration) = notification.duration {
            props.insert(keys::DURATION, millis(duration));
        }
        if let Some(auto_hide) = notification.auto_hide {
            props.insert(keys::AUTO_HIDE, auto_hide);
        }
        props
    }
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
