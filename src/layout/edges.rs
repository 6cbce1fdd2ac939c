//! Shorthand for declaring several superview insets at once

use super::maker::Maker;
use super::types::{EdgeInsets, Sides};
use super::view::ViewHierarchy;

impl<V: ViewHierarchy + ?Sized> Maker<'_, V> {
    /// Insets from the superview for any of the four edges.
    ///
    /// ```
    /// use framemaker::{Maker, Rect, ViewTree};
    ///
    /// let mut tree = ViewTree::new();
    /// let root = tree.add_root("root", Rect::new(0.0, 0.0, 100.0, 100.0));
    /// let view = tree.add_subview(root, "view", Rect::zero());
    ///
    /// let mut maker = Maker::new(&mut tree, view);
    /// maker.edges(10.0, 10.0, 10.0, None).width(20.0);
    /// assert_eq!(maker.apply().unwrap(), Rect::new(10.0, 10.0, 20.0, 80.0));
    /// ```
    pub fn edges(
        &mut self,
        top: impl Into<Option<f64>>,
        left: impl Into<Option<f64>>,
        bottom: impl Into<Option<f64>>,
        right: impl Into<Option<f64>>,
    ) -> &mut Self {
        if let Some(top) = top.into() {
            self.top(top);
        }
        if let Some(left) = left.into() {
            self.left(left);
        }
        if let Some(bottom) = bottom.into() {
            self.bottom(bottom);
        }
        if let Some(right) = right.into() {
            self.right(right);
        }
        self
    }

    /// Insets from the superview for the edges selected by `sides`
    pub fn edges_with(&mut self, insets: EdgeInsets, sides: Sides) -> &mut Self {
        if sides.contains(Sides::TOP) {
            self.top(insets.top);
        }
        if sides.contains(Sides::BOTTOM) {
            self.bottom(insets.bottom);
        }
        if sides.contains(Sides::LEFT) {
            self.left(insets.left);
        }
        if sides.contains(Sides::RIGHT) {
            self.right(insets.right);
        }
        self
    }
}
