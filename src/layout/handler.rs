//! Deferred handlers and their priority-ordered execution
//!
//! Every relation turns into one [`Handler`]: a priority plus an [`Action`]
//! holding only the data it needs. Nothing runs at declaration time. When a
//! builder resolves, the queue is stable-sorted by priority (high, middle,
//! low) and, inside one priority, by stage (sizes, then positions, then
//! cosmetics). Declaration order is kept inside each group, so the last
//! relation written for an attribute wins.

use super::config::LayoutConfig;
use super::parameter::{Parameter, SideParameter};
use super::types::{Attribute, Axis, Dimension, Rect};
use super::view::{ViewHierarchy, ViewId};

/// Execution class of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Overrides that must win regardless of declaration order
    High,
    /// Ordinary edge, size and center relations
    Middle,
    /// Cosmetics derived from the final rectangle
    Low,
}

/// Ordering group inside one priority class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Size,
    Position,
    Cosmetic,
}

/// The computation a handler performs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Literal width or height
    SetValue { attribute: Attribute, value: f64 },
    /// Width or height read from a size attribute
    SizeTo {
        attribute: Attribute,
        source: SideParameter,
    },
    /// Top, left, bottom or right edge
    Edge {
        edge: Attribute,
        source: SideParameter,
    },
    /// Horizontal or vertical center
    Center {
        attribute: Attribute,
        source: SideParameter,
    },
    /// Width and height of the union of the direct subviews
    FitSubviews,
    CornerRadius(f64),
    CornerRadiusByHalf(Dimension),
}

impl Action {
    pub fn stage(&self) -> Stage {
        match self {
            Self::SetValue { .. } | Self::SizeTo { .. } | Self::FitSubviews => Stage::Size,
            Self::Edge { .. } | Self::Center { .. } => Stage::Position,
            Self::CornerRadius(_) | Self::CornerRadiusByHalf(_) => Stage::Cosmetic,
        }
    }

    /// Run this action against the working rectangle
    pub(crate) fn evaluate<V: ViewHierarchy + ?Sized>(&self, ctx: &mut Evaluation<'_, V>) {
        match *self {
            Self::SetValue { attribute, value } => ctx.rect.set_value(value, attribute),
            Self::SizeTo { attribute, source } => {
                let value = ctx.read_size(attribute, &source);
                ctx.rect.set_value(value, attribute);
            }
            Self::FitSubviews => {
                if let Some(union) = ctx.subviews {
                    ctx.rect.set_value(union.width, Attribute::Width);
                    ctx.rect.set_value(union.height, Attribute::Height);
                }
            }
            Self::Edge { edge, source } => {
                let value = ctx.read(&source);
                match ctx.snapshots.edge(opposite(edge)) {
                    // Both edges on this axis are known: span them
                    Some(other) => {
                        let other = ctx.read(&other);
                        let (near, far) = match edge {
                            Attribute::Left | Attribute::Top => (value, other),
                            _ => (other, value),
                        };
                        let near_edge = match edge.axis() {
                            Axis::Horizontal => Attribute::Left,
                            Axis::Vertical => Attribute::Top,
                        };
                        ctx.rect.set_value(near, near_edge);
                        ctx.rect.set_value(far - near, size_of(edge.axis()));
                    }
                    None => ctx.rect.set_value(value, edge),
                }
            }
            Self::Center { attribute, source } => {
                let value = ctx.read(&source);
                ctx.rect.set_value(value, attribute);
            }
            Self::CornerRadius(radius) => ctx.corner_radius = Some(radius),
            Self::CornerRadiusByHalf(dimension) => {
                // half of what gets committed, after snapping
                let committed = ctx.config.finalize(*ctx.rect);
                ctx.corner_radius = Some(committed.value(dimension.attribute()) / 2.0);
            }
        }
    }
}

fn opposite(edge: Attribute) -> Attribute {
    match edge {
        Attribute::Top => Attribute::Bottom,
        Attribute::Bottom => Attribute::Top,
        Attribute::Left => Attribute::Right,
        Attribute::Right => Attribute::Left,
        other => other,
    }
}

fn size_of(axis: Axis) -> Attribute {
    match axis {
        Axis::Horizontal => Attribute::Width,
        Axis::Vertical => Attribute::Height,
    }
}

/// A deferred unit of computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handler {
    pub priority: Priority,
    pub action: Action,
}

/// Handlers in declaration order
#[derive(Debug, Clone, Default)]
pub struct HandlerQueue {
    handlers: Vec<Handler>,
}

impl HandlerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: Priority, action: Action) {
        self.handlers.push(Handler { priority, action });
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handlers in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter()
    }

    /// Handlers in execution order
    pub fn into_ordered(self) -> Vec<Handler> {
        let mut handlers = self.handlers;
        handlers.sort_by_key(|handler| (handler.priority, handler.action.stage()));
        handlers
    }
}

/// Per-attribute snapshots of what a builder declared
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub width: Option<Parameter>,
    pub height: Option<Parameter>,
    pub top: Option<SideParameter>,
    pub left: Option<SideParameter>,
    pub bottom: Option<SideParameter>,
    pub right: Option<SideParameter>,
}

impl Snapshots {
    pub fn edge(&self, edge: Attribute) -> Option<SideParameter> {
        match edge {
            Attribute::Top => self.top,
            Attribute::Left => self.left,
            Attribute::Bottom => self.bottom,
            Attribute::Right => self.right,
            _ => None,
        }
    }

    pub fn size(&self, attribute: Attribute) -> Option<Parameter> {
        match attribute {
            Attribute::Width => self.width,
            Attribute::Height => self.height,
            _ => None,
        }
    }
}

/// State a handler reads and writes while the queue runs
pub(crate) struct Evaluation<'a, V: ViewHierarchy + ?Sized> {
    pub views: &'a V,
    pub target: ViewId,
    pub snapshots: &'a Snapshots,
    pub rect: &'a mut Rect,
    pub config: &'a LayoutConfig,
    /// Union of the normalized subviews when the target sizes to fit them
    pub subviews: Option<Rect>,
    pub corner_radius: Option<f64>,
}

impl<V: ViewHierarchy + ?Sized> Evaluation<'_, V> {
    /// Read an anchored value in the target's superview space
    fn read(&self, param: &SideParameter) -> f64 {
        let space = self.views.superview(self.target);
        let frame = self.views.convert_frame(param.anchor.view, space);
        param.apply(frame.value(param.anchor.attribute))
    }

    /// Read a size source for `attribute`.
    ///
    /// Sizes on the target itself come from this builder's declarations, not
    /// from the old frame, so declaration order does not matter.
    fn read_size(&self, attribute: Attribute, param: &SideParameter) -> f64 {
        if param.anchor.view != self.target {
            return self.read(param);
        }
        let source = param.anchor.attribute;
        if source == attribute {
            return param.apply(self.rect.value(source));
        }
        param.apply(self.own_size(source, attribute))
    }

    /// The size this builder gives the target on `attribute`.
    ///
    /// `outer` is the size being resolved; a width and height that read each
    /// other stop at the working rectangle.
    fn own_size(&self, attribute: Attribute, outer: Attribute) -> f64 {
        if let Some(span) = self.edge_span(attribute.axis()) {
            return span;
        }
        match self.snapshots.size(attribute) {
            Some(Parameter::Value(p)) => p.value,
            Some(Parameter::Side(side)) if side.anchor.view != self.target => self.read(&side),
            Some(Parameter::Side(side)) => {
                let next = side.anchor.attribute;
                let value = if next == attribute || next == outer {
                    self.rect.value(next)
                } else {
                    self.own_size(next, attribute)
                };
                side.apply(value)
            }
            Some(Parameter::Subviews) => self.subviews.unwrap_or(*self.rect).value(attribute),
            None => self.rect.value(attribute),
        }
    }

    /// Distance between both declared edges on `axis`
    fn edge_span(&self, axis: Axis) -> Option<f64> {
        let (near, far) = match axis {
            Axis::Horizontal => (self.snapshots.left?, self.snapshots.right?),
            Axis::Vertical => (self.snapshots.top?, self.snapshots.bottom?),
        };
        Some(self.read(&far) - self.read(&near))
    }
}
