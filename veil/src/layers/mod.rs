//! Renderers for the three overlay classes.

pub mod dialog;
pub mod lifecycle;
pub mod notification;
pub mod panel;
mod stack;

pub use dialog::DialogRenderer;
pub use lifecycle::{Lifecycle, Phase, Timing};
pub use notification::{notification_order, NotificationRenderer, SPACER_ORDER};
pub use panel::PanelRenderer;

/// Base z-index of panel layers.
pub const PANEL_Z: i16 = 100;
/// Base z-index of dialog layers.
pub const DIALOG_Z: i16 = 200;
/// z-index of the shared notification container.
pub const NOTIFICATION_Z: i16 = 300;

/// z-index of the `index`-th layer of a stack starting at `base`, held at
/// `ceiling` so a deep stack never reaches the band above it.
pub(crate) fn stacked_z(base: i16, index: usize, ceiling: i16) -> i16 {
    i16::try_from(index)
        .map_or(ceiling, |index| base.saturating_add(index))
        .min(ceiling)
}
