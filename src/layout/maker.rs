//! The frame builder
//!
//! A [`Maker`] is bound to one view. Relation methods only record parameters
//! and queue handlers; [`Maker::apply`] runs the queue against a working copy
//! of the view's frame and commits the result exactly once.
//!
//! # Ordering contract
//!
//! Relations that read another view read its *committed* frame. Configure
//! dependencies before dependents; a forward or cyclic reference silently
//! reads stale geometry.

use tracing::{debug, trace, warn};

use super::config::LayoutConfig;
use super::container::normalize_subviews;
use super::error::LayoutError;
use super::handler::{Action, Evaluation, HandlerQueue, Priority, Snapshots};
use super::parameter::{Anchor, GeometryValue, Parameter, SideParameter, ValueParameter};
use super::types::{Attribute, Dimension, Rect};
use super::view::{ViewHierarchy, ViewId};

/// Builder that resolves the frame of a single view
pub struct Maker<'a, V: ViewHierarchy + ?Sized> {
    pub(crate) views: &'a mut V,
    view: ViewId,
    new_rect: Rect,
    handlers: HandlerQueue,
    snapshots: Snapshots,
    config: LayoutConfig,
    error: Option<LayoutError>,
}

impl<'a, V: ViewHierarchy + ?Sized> Maker<'a, V> {
    pub fn new(views: &'a mut V, view: ViewId) -> Self {
        Self::with_config(views, view, LayoutConfig::default())
    }

    pub fn with_config(views: &'a mut V, view: ViewId, config: LayoutConfig) -> Self {
        let (new_rect, error) = if views.contains(view) {
            (views.frame(view), None)
        } else {
            (Rect::zero(), Some(LayoutError::UnknownView(view)))
        };
        Self {
            views,
            view,
            new_rect,
            handlers: HandlerQueue::new(),
            snapshots: Snapshots::default(),
            config,
            error,
        }
    }

    /// The view this builder configures
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Handlers queued so far, in declaration order
    pub fn handlers(&self) -> &HandlerQueue {
        &self.handlers
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Top edge. Numbers are insets from the superview's top.
    pub fn top(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.edge(Attribute::Top, value.into())
    }

    /// Left edge. Numbers are insets from the superview's left.
    pub fn left(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.edge(Attribute::Left, value.into())
    }

    /// Bottom edge. Numbers are insets from the superview's bottom.
    pub fn bottom(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.edge(Attribute::Bottom, value.into())
    }

    /// Right edge. Numbers are insets from the superview's right.
    pub fn right(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.edge(Attribute::Right, value.into())
    }

    fn edge(&mut self, edge: Attribute, value: GeometryValue) -> &mut Self {
        let Some(source) = self.side_parameter(edge, value) else {
            return self;
        };
        match edge {
            Attribute::Top => self.snapshots.top = Some(source),
            Attribute::Left => self.snapshots.left = Some(source),
            Attribute::Bottom => self.snapshots.bottom = Some(source),
            Attribute::Right => self.snapshots.right = Some(source),
            _ => {}
        }
        self.handlers
            .push(Priority::Middle, Action::Edge { edge, source });
        self
    }

    // ========================================================================
    // Sizes
    // ========================================================================

    /// Width, either a literal or read from a size attribute
    pub fn width(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.dimension(Attribute::Width, value.into())
    }

    /// Height, either a literal or read from a size attribute
    pub fn height(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.dimension(Attribute::Height, value.into())
    }

    /// Width and height at once
    pub fn size(
        &mut self,
        width: impl Into<GeometryValue>,
        height: impl Into<GeometryValue>,
    ) -> &mut Self {
        self.width(width).height(height)
    }

    fn dimension(&mut self, attribute: Attribute, value: GeometryValue) -> &mut Self {
        match value {
            GeometryValue::Absolute(value) => {
                if !value.is_finite() {
                    return self.fail(LayoutError::NonFiniteValue { attribute });
                }
                self.record_size(attribute, Parameter::Value(ValueParameter { value }));
                self.handlers
                    .push(Priority::Middle, Action::SetValue { attribute, value });
            }
            relative => {
                let Some(source) = self.side_parameter(attribute, relative) else {
                    return self;
                };
                self.record_size(attribute, Parameter::Side(source));
                self.handlers
                    .push(Priority::Middle, Action::SizeTo { attribute, source });
            }
        }
        self
    }

    pub(crate) fn push_handler(&mut self, priority: Priority, action: Action) {
        self.handlers.push(priority, action);
    }

    pub(crate) fn record_size(&mut self, attribute: Attribute, parameter: Parameter) {
        match attribute {
            Attribute::Width => self.snapshots.width = Some(parameter),
            Attribute::Height => self.snapshots.height = Some(parameter),
            _ => {}
        }
    }

    // ========================================================================
    // Centers
    // ========================================================================

    /// Horizontal center. Numbers are offsets from the superview's center.
    pub fn center_x(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.center_on(Attribute::CenterX, value.into())
    }

    /// Vertical center. Numbers are offsets from the superview's center.
    pub fn center_y(&mut self, value: impl Into<GeometryValue>) -> &mut Self {
        self.center_on(Attribute::CenterY, value.into())
    }

    /// Center in the superview
    pub fn center(&mut self) -> &mut Self {
        self.center_x(0.0).center_y(0.0)
    }

    /// Share the center of another view
    pub fn center_to(&mut self, other: ViewId) -> &mut Self {
        self.center_x(other.center_x()).center_y(other.center_y())
    }

    fn center_on(&mut self, attribute: Attribute, value: GeometryValue) -> &mut Self {
        if let Some(source) = self.side_parameter(attribute, value) {
            self.handlers
                .push(Priority::Middle, Action::Center { attribute, source });
        }
        self
    }

    /// Same origin and size as another view
    pub fn equal_to(&mut self, other: ViewId) -> &mut Self {
        self.left(other.left())
            .top(other.top())
            .width(other.width())
            .height(other.height())
    }

    // ========================================================================
    // Low priority
    // ========================================================================

    /// Corner radius applied once the frame is committed
    pub fn corner_radius(&mut self, radius: f64) -> &mut Self {
        if !radius.is_finite() {
            warn!(view = ?self.view, "ignoring non-finite corner radius");
            return self;
        }
        self.handlers
            .push(Priority::Low, Action::CornerRadius(radius));
        self
    }

    /// Corner radius of half the final width or height
    pub fn corner_radius_by_half(&mut self, dimension: Dimension) -> &mut Self {
        self.handlers
            .push(Priority::Low, Action::CornerRadiusByHalf(dimension));
        self
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Turn a declared value into a side parameter for `attribute`.
    ///
    /// Numbers become insets or offsets against the same attribute of the
    /// superview. Records an error and returns `None` on misuse.
    fn side_parameter(
        &mut self,
        attribute: Attribute,
        value: GeometryValue,
    ) -> Option<SideParameter> {
        if !value.is_finite() {
            self.fail(LayoutError::NonFiniteValue { attribute });
            return None;
        }
        match value {
            GeometryValue::Absolute(inset) => {
                let Some(superview) = self.superview() else {
                    self.fail(LayoutError::NoSuperview {
                        view: self.view,
                        attribute,
                    });
                    return None;
                };
                let offset = match attribute {
                    Attribute::Right | Attribute::Bottom => -inset,
                    _ => inset,
                };
                Some(SideParameter::new(
                    Anchor::new(superview, attribute),
                    1.0,
                    offset,
                ))
            }
            GeometryValue::Relative {
                anchor,
                multiplier,
                offset,
            } => {
                if !self.views.contains(anchor.view) {
                    self.fail(LayoutError::UnknownView(anchor.view));
                    return None;
                }
                if !attribute.accepts(anchor.attribute) {
                    self.fail(LayoutError::incompatible(attribute, anchor.attribute));
                    return None;
                }
                Some(SideParameter::new(anchor, multiplier, offset))
            }
        }
    }

    fn superview(&self) -> Option<ViewId> {
        if !self.views.contains(self.view) {
            return None;
        }
        self.views.superview(self.view)
    }

    fn fail(&mut self, error: LayoutError) -> &mut Self {
        warn!(view = ?self.view, %error, "invalid relation");
        self.error.get_or_insert(error);
        self
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Run every queued handler and commit the resulting frame.
    ///
    /// Returns the committed frame. On a recorded declaration error nothing
    /// is committed.
    #[tracing::instrument(skip(self), fields(view = ?self.view, handlers = self.handlers.len()))]
    pub fn apply(self) -> Result<Rect, LayoutError> {
        let Maker {
            views,
            view,
            mut new_rect,
            handlers,
            snapshots,
            config,
            error,
        } = self;
        if let Some(error) = error {
            return Err(error);
        }

        let fits_subviews = handlers
            .iter()
            .any(|handler| handler.action == Action::FitSubviews);
        let subviews = fits_subviews.then(|| {
            let union = normalize_subviews(&mut *views, view);
            debug!(width = union.width, height = union.height, "container size");
            union
        });

        let mut ctx = Evaluation {
            views: &*views,
            target: view,
            snapshots: &snapshots,
            rect: &mut new_rect,
            config: &config,
            subviews,
            corner_radius: None,
        };
        for handler in handlers.into_ordered() {
            handler.action.evaluate(&mut ctx);
            trace!(priority = ?handler.priority, action = ?handler.action, rect = ?ctx.rect, "handler");
        }
        let corner_radius = ctx.corner_radius;

        let frame = config.finalize(new_rect);
        views.set_frame(view, frame);
        if let Some(radius) = corner_radius {
            views.set_corner_radius(view, radius);
        }
        debug!(?frame, "frame committed");
        Ok(frame)
    }
}
