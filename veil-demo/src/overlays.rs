//! Overlay contents used by the demo.

use veil::prelude::*;

pub struct WelcomeDialog;

impl OverlayContent for WelcomeDialog {
    fn element(&self, props: &OverlayProps) -> Element {
        Element::col()
            .child(Element::text("Welcome to the market"))
            .child(Element::text(
                props.props.get_str("message").unwrap_or("").to_string(),
            ))
            .child(
                Element::row()
                    .child(Element::button("[ Got it ]").id("welcome-ok"))
                    .child(Element::button("[ Show again ]").id("welcome-again")),
            )
    }

    fn on_key(&self, key: Key, _: Modifiers, focused: Option<&str>, props: &OverlayProps) -> bool {
        match (key, focused) {
            (Key::Enter, Some("welcome-ok")) => props.on_close(),
            (Key::Enter, Some("welcome-again")) => props.on_open(),
            _ => return false,
        }
        true
    }
}

/// Share sheet. Copying the link closes the sheet and raises a toast.
pub struct ShareSheet {
    pub registry: Registry,
    pub listing: String,
}

impl OverlayContent for ShareSheet {
    fn element(&self, _props: &OverlayProps) -> Element {
        Element::col()
            .child(Element::text(format!("Share \"{}\"", self.listing)))
            .child(Element::button("Copy link").id("share-copy"))
            .child(Element::button("Cancel").id("share-cancel"))
    }

    fn on_key(&self, key: Key, _: Modifiers, focused: Option<&str>, props: &OverlayProps) -> bool {
        if key != Key::Enter {
            return false;
        }
        match focused {
            Some("share-copy") => {
                props.on_close();
                if let Err(e) = self
                    .registry
                    .notifications()
                    .toast(Toast::success("Link copied"), NotificationProps::bottom())
                {
                    log::warn!("toast failed: {}", e);
                }
            }
            Some("share-cancel") => props.on_close(),
            _ => return false,
        }
        true
    }
}

/// Filter sheet without a scrim: the page keeps scrolling behind it.
pub struct FilterSheet;

impl OverlayContent for FilterSheet {
    fn element(&self, _props: &OverlayProps) -> Element {
        Element::col()
            .child(Element::text("Filters"))
            .child(Element::button("Free items only").id("filter-free"))
            .child(Element::button("Within 1 km").id("filter-near"))
    }
}
