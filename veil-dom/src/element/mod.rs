mod content;
mod node;

pub use content::Content;
pub use node::{Anchor, Backdrop, Direction, Element};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Returns true if `id` is `root` itself or one of its descendants.
pub fn contains(root: &Element, id: &str) -> bool {
    find_element(root, id).is_some()
}

/// Replace generated IDs under `root` with IDs derived from `base` and the
/// element's position in the tree, so a tree rebuilt with the same shape
/// gets the same IDs. IDs set with `.id()` are left alone.
pub fn stabilize_ids(root: &mut Element, base: &str) {
    fn walk(element: &mut Element, path: String) {
        if element.has_generated_id() {
            element.id = path.clone();
        }
        for (index, child) in element.content.children_mut().iter_mut().enumerate() {
            walk(child, format!("{path}.{index}"));
        }
    }

    walk(root, format!("{base}/0"));
}
