//! Container sizing: derive a view's size from its direct subviews
//!
//! Subviews must already be committed. When the builder resolves, their
//! frames are normalized in place (negative origins pinned to zero, then
//! shifted by the smallest origin) and the container's width and height
//! become the size of their union. Sizing runs at high priority so it wins
//! over ordinary relations. A builder that fails or is never applied leaves
//! the subviews alone.

use super::handler::{Action, Priority};
use super::maker::Maker;
use super::parameter::Parameter;
use super::types::{Attribute, Rect};
use super::view::{ViewHierarchy, ViewId};

impl<V: ViewHierarchy + ?Sized> Maker<'_, V> {
    /// Size this view to wrap all of its direct subviews.
    ///
    /// Configure every subview first. The container's origin is left alone;
    /// do not combine with both edges of one axis.
    pub fn container(&mut self) -> &mut Self {
        self.record_size(Attribute::Width, Parameter::Subviews);
        self.record_size(Attribute::Height, Parameter::Subviews);
        self.push_handler(Priority::High, Action::FitSubviews);
        self
    }
}

/// Pin and shift the subviews of `parent`, returning the union of their frames.
///
/// Origins are clamped to zero before the minimum origin is taken, so the
/// shift only moves subviews when one already sits at the origin. The union
/// starts from the zero rectangle, which keeps the origin inside the result.
pub fn normalize_subviews<V: ViewHierarchy + ?Sized>(views: &mut V, parent: ViewId) -> Rect {
    let subviews = views.subviews(parent);

    let mut min_x = 0.0_f64;
    let mut min_y = 0.0_f64;
    for subview in &subviews {
        let mut frame = views.frame(*subview);
        if frame.x < 0.0 {
            frame.x = 0.0;
        }
        if frame.y < 0.0 {
            frame.y = 0.0;
        }
        views.set_frame(*subview, frame);

        min_x = min_x.min(frame.x);
        min_y = min_y.min(frame.y);
    }

    let mut union = Rect::zero();
    for subview in &subviews {
        let frame = views.frame(*subview).offset_by(-min_x, -min_y);
        views.set_frame(*subview, frame);
        union = union.union(&frame);
    }
    union
}
