pub mod element;
pub mod event;
pub mod focus;
pub mod text;

pub use element::{find_element, stabilize_ids, Anchor, Backdrop, Content, Direction, Element};
pub use event::{key_press, Key, Modifiers};
pub use focus::{collect_focusable, cycle_focus, FocusState};
pub use text::{display_width, render_lines, truncate_to_width};
