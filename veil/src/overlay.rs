//! Core overlay types: classes, identities and the content trait.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use veil_dom::{Element, Key, Modifiers};

use crate::error::OverlayError;
use crate::props::Props;

/// The category of an overlay. Decides which renderer owns it and which
/// defaults are merged into its props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayClass {
    /// Full-viewport layer with a focus trap.
    Dialog,
    /// Bottom-anchored sheet with a focus trap and optional scrim.
    Panel,
    /// Corner-stacked, self-dismissing message.
    Notification,
}

impl OverlayClass {
    pub const ALL: [OverlayClass; 3] = [
        OverlayClass::Dialog,
        OverlayClass::Panel,
        OverlayClass::Notification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OverlayClass::Dialog => "dialog",
            OverlayClass::Panel => "panel",
            OverlayClass::Notification => "notification",
        }
    }
}

impl fmt::Display for OverlayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayClass {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dialog" => Ok(OverlayClass::Dialog),
            "panel" => Ok(OverlayClass::Panel),
            "notification" => Ok(OverlayClass::Notification),
            other => Err(OverlayError::UnknownClass(other.to_string())),
        }
    }
}

/// Identifies what kind of content an overlay renders.
///
/// Derived from the content's Rust type, so two overlays opened with the same
/// content type share a kind and are told apart by their key.
#[derive(Clone, Copy)]
pub struct OverlayKind {
    type_id: TypeId,
    name: &'static str,
}

impl OverlayKind {
    pub fn of<C: OverlayContent>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Full type name of the content.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, for element IDs and logs.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for OverlayKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for OverlayKind {}

impl Hash for OverlayKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayKind({})", self.short_name())
    }
}

/// The identity of an overlay within its class: `(kind, key)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayId {
    pub kind: OverlayKind,
    pub key: String,
}

impl OverlayId {
    pub fn new(kind: OverlayKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    pub fn of<C: OverlayContent>(key: impl Into<String>) -> Self {
        Self::new(OverlayKind::of::<C>(), key)
    }

    /// Stable element ID for the layer hosting this overlay.
    pub fn element_id(&self, class: OverlayClass) -> String {
        format!("{}:{}:{}", class, self.kind.short_name(), self.key)
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.short_name(), self.key)
    }
}

/// Content rendered inside an overlay.
///
/// Implementors are responsible for eventually calling
/// [`OverlayProps::on_close`]; the registry never closes anything by itself.
pub trait OverlayContent: Send + Sync + 'static {
    /// Get the content's name (for debugging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Render the overlay body.
    ///
    /// Called on every render. Elements built without `.id()` get IDs from
    /// their position in the returned tree, so focus on them survives the
    /// rebuild as long as the shape stays the same.
    fn element(&self, props: &OverlayProps) -> Element;

    /// Handle a key that reached this overlay. Return true if consumed.
    ///
    /// Called before the focus trap sees the key, with the ID of the
    /// element that currently holds focus.
    fn on_key(
        &self,
        key: Key,
        modifiers: Modifiers,
        focused: Option<&str>,
        props: &OverlayProps,
    ) -> bool {
        let _ = (key, modifiers, focused, props);
        false
    }
}

pub(crate) type Callback = Arc<dyn Fn() + Send + Sync>;

/// What an overlay's content receives when rendered or handling input.
#[derive(Clone)]
pub struct OverlayProps {
    /// The key the overlay was opened with.
    pub key: String,
    /// Caller props merged with the class defaults.
    pub props: Props,
    on_open: Callback,
    on_close: Callback,
}

impl OverlayProps {
    pub(crate) fn new(key: String, props: Props, on_open: Callback, on_close: Callback) -> Self {
        Self {
            key,
            props,
            on_open,
            on_close,
        }
    }

    /// Register this overlay again with its current props.
    pub fn on_open(&self) {
        (self.on_open)()
    }

    /// Ask for this overlay to be closed.
    ///
    /// Dialogs and panels are removed from the registry immediately.
    /// Notifications first play their exit transition.
    pub fn on_close(&self) {
        (self.on_close)()
    }
}

impl fmt::Debug for OverlayProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayProps")
            .field("key", &self.key)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
