use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Where a layer is pinned on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Normal flow inside the parent.
    #[default]
    Flow,
    /// Covers the whole viewport.
    Fill,
    /// Pinned to the bottom edge (bottom sheet).
    Bottom,
    /// Stacked in a screen corner.
    Corner,
}

/// Treatment of the content behind a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    #[default]
    None,
    /// Dimmed scrim.
    Dim,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,

    // Content
    pub content: Content,

    // Layout
    pub direction: Direction,
    pub anchor: Anchor,
    /// Flex `order` among siblings. Lower values are laid out first.
    pub order: i16,
    pub z_index: i16,

    // Visual
    pub backdrop: Backdrop,

    // Interaction
    pub focusable: bool,
    pub disabled: bool,

    /// When true, focus navigation is constrained to descendants.
    pub interaction_scope: bool,

    // Custom data storage (overlay keys, handler IDs, etc.)
    pub data: HashMap<String, String>,

    /// Set until `.id()` is called.
    generated_id: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            content: Content::None,
            direction: Direction::Column,
            anchor: Anchor::Flow,
            order: 0,
            z_index: 0,
            backdrop: Backdrop::None,
            focusable: false,
            disabled: false,
            interaction_scope: false,
            data: HashMap::new(),
            generated_id: true,
        }
    }
}

impl Element {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            id: generate_id(prefix),
            ..Default::default()
        }
    }

    pub fn box_() -> Self {
        Self::with_prefix("box")
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut el = Self::with_prefix("text");
        el.content = Content::Text(content.into());
        el
    }

    pub fn col() -> Self {
        Self::with_prefix("col")
    }

    pub fn row() -> Self {
        let mut el = Self::with_prefix("row");
        el.direction = Direction::Row;
        el
    }

    /// A focusable text element, the terminal equivalent of a button.
    pub fn button(label: impl Into<String>) -> Self {
        let mut el = Self::with_prefix("button");
        el.content = Content::Text(label.into());
        el.focusable = true;
        el
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.generated_id = false;
        self
    }

    /// True if the ID came from the global counter rather than `.id()`.
    /// Such IDs change every time the element is rebuilt.
    pub fn has_generated_id(&self) -> bool {
        self.generated_id
    }

    // Layout
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn order(mut self, order: i16) -> Self {
        self.order = order;
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = z_index;
        self
    }

    // Visual
    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    // Interaction
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn interaction_scope(mut self, scope: bool) -> Self {
        self.interaction_scope = scope;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    /// Children sorted by `order`, ties kept in tree order.
    pub fn ordered_children(&self) -> Vec<&Element> {
        let mut children: Vec<&Element> = self.content.children().iter().collect();
        children.sort_by_key(|child| child.order);
        children
    }
}
