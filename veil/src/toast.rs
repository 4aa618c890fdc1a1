use veil_dom::{Element, Key, Modifiers};

use crate::overlay::{OverlayContent, OverlayProps};

/// Severity of a [`Toast`], shown as its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(self) -> &'static str {
        match self {
            ToastLevel::Info => "●",
            ToastLevel::Success => "✓",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }
}

/// A stock notification body: an icon and a one-line message.
///
/// # Example
///
/// ```ignore
/// registry.notifications().toast(Toast::success("Listing posted"), NotificationProps::top())?;
/// registry.notifications().toast("Chat reconnected", NotificationProps::bottom())?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }
}

impl OverlayContent for Toast {
    fn element(&self, props: &OverlayProps) -> Element {
        Element::row()
            .child(Element::text(self.level.icon()))
            .child(Element::text(self.message.clone()))
            .data("toast", props.key.clone())
    }

    fn on_key(
        &self,
        key: Key,
        _modifiers: Modifiers,
        _focused: Option<&str>,
        props: &OverlayProps,
    ) -> bool {
        if key == Key::Char('x') {
            props.on_close();
            return true;
        }
        false
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Self::new(ToastLevel::default(), message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Self::new(ToastLevel::default(), message)
    }
}
