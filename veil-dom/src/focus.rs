use crate::element::Element;

/// The element that currently receives keys.
///
/// This is the terminal stand-in for a document's active element: overlays
/// capture it before trapping focus and hand it back when they unmount.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Returns false if `id` already had focus.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused() == Some(id) {
            return false;
        }
        log::trace!("[focus] {:?} -> {}", self.focused, id);
        self.focused = Some(id.to_string());
        true
    }

    /// Returns false if nothing was focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }
}

/// Pick the element that Tab (`forward`) or Shift+Tab would move to.
///
/// When `current` is not in `focusable` (focus is outside the scope), Tab
/// lands on the first element and Shift+Tab on the last.
pub fn cycle_focus(focusable: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    let len = focusable.len();
    if len == 0 {
        return None;
    }
    let position = current.and_then(|current| focusable.iter().position(|id| id == current));
    let next = match position {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    };
    Some(focusable[next].clone())
}

/// Focusable element IDs in tree order. Disabled subtrees are skipped.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    fn walk(element: &Element, out: &mut Vec<String>) {
        if element.disabled {
            return;
        }
        if element.focusable {
            out.push(element.id.clone());
        }
        for child in element.content.children() {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    walk(element, &mut out);
    out
}
