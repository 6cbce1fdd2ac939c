//! Keyboard tracking
//!
//! A mirror view inside a window follows the on-screen keyboard so relations
//! can anchor to it (`maker.bottom(tracking.view().top())`). Tracking is an
//! explicit value: set it up once with [`KeyboardTracking::initialize`], feed
//! it keyboard frames, and tear it down when done. Frame resolution never
//! depends on it.

use tracing::debug;

use super::error::LayoutError;
use super::types::Rect;
use super::view::{ViewHierarchy, ViewId, ViewTree};

/// Name given to the mirror view
pub const KEYBOARD_VIEW_NAME: &str = "keyboard";

/// Handle to an installed keyboard mirror view
#[derive(Debug)]
pub struct KeyboardTracking {
    window: ViewId,
    view: ViewId,
}

impl KeyboardTracking {
    /// Attach a hidden keyboard mirror to `window`, or to the first window of
    /// the tree when none is given.
    pub fn initialize(tree: &mut ViewTree, window: Option<ViewId>) -> Result<Self, LayoutError> {
        let window = match window {
            Some(window) if tree.contains(window) => window,
            Some(window) => return Err(LayoutError::UnknownView(window)),
            None => *tree.roots().first().ok_or(LayoutError::NoWindow)?,
        };
        let view = tree.add_subview(window, KEYBOARD_VIEW_NAME, hidden_frame(tree, window));
        debug!(?window, ?view, "keyboard tracking installed");
        Ok(Self { window, view })
    }

    /// The mirror view, usable as an anchor
    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn window(&self) -> ViewId {
        self.window
    }

    /// Keyboard moved; `frame` is in window coordinates
    pub fn update(&self, tree: &mut ViewTree, frame: Rect) {
        tree.set_frame(self.view, frame);
    }

    /// Keyboard dismissed: zero height at the window's bottom edge
    pub fn hide(&self, tree: &mut ViewTree) {
        let frame = hidden_frame(tree, self.window);
        tree.set_frame(self.view, frame);
    }

    /// Detach the mirror view from its window
    pub fn teardown(self, tree: &mut ViewTree) {
        tree.remove_from_superview(self.view);
        debug!(window = ?self.window, "keyboard tracking removed");
    }
}

fn hidden_frame(tree: &ViewTree, window: ViewId) -> Rect {
    let bounds = tree.frame(window);
    Rect::new(0.0, bounds.height, bounds.width, 0.0)
}
