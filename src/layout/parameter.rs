//! Geometry values and the relation parameters built from them

use super::types::Attribute;
use super::view::ViewId;

/// An attribute of a specific view, read when a relation resolves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub view: ViewId,
    pub attribute: Attribute,
}

impl Anchor {
    pub fn new(view: ViewId, attribute: Attribute) -> Self {
        Self { view, attribute }
    }

    /// Scale the anchored value
    pub fn multiplied(self, multiplier: f64) -> GeometryValue {
        GeometryValue::from(self).multiplied(multiplier)
    }

    /// Add a constant to the anchored value
    pub fn offset(self, offset: f64) -> GeometryValue {
        GeometryValue::from(self).offset(offset)
    }
}

impl ViewId {
    pub fn top(self) -> Anchor {
        Anchor::new(self, Attribute::Top)
    }

    pub fn left(self) -> Anchor {
        Anchor::new(self, Attribute::Left)
    }

    pub fn bottom(self) -> Anchor {
        Anchor::new(self, Attribute::Bottom)
    }

    pub fn right(self) -> Anchor {
        Anchor::new(self, Attribute::Right)
    }

    pub fn width(self) -> Anchor {
        Anchor::new(self, Attribute::Width)
    }

    pub fn height(self) -> Anchor {
        Anchor::new(self, Attribute::Height)
    }

    pub fn center_x(self) -> Anchor {
        Anchor::new(self, Attribute::CenterX)
    }

    pub fn center_y(self) -> Anchor {
        Anchor::new(self, Attribute::CenterY)
    }
}

/// A value a relation is declared with.
///
/// Plain numbers convert to [`GeometryValue::Absolute`]; anchors convert to a
/// relative value with multiplier 1 and offset 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryValue {
    Absolute(f64),
    /// `anchor * multiplier + offset`, read from another view's committed frame
    Relative {
        anchor: Anchor,
        multiplier: f64,
        offset: f64,
    },
}

impl GeometryValue {
    pub fn multiplied(self, factor: f64) -> Self {
        match self {
            Self::Absolute(value) => Self::Absolute(value * factor),
            Self::Relative {
                anchor,
                multiplier,
                offset,
            } => Self::Relative {
                anchor,
                multiplier: multiplier * factor,
                offset: offset * factor,
            },
        }
    }

    pub fn offset(self, delta: f64) -> Self {
        match self {
            Self::Absolute(value) => Self::Absolute(value + delta),
            Self::Relative {
                anchor,
                multiplier,
                offset,
            } => Self::Relative {
                anchor,
                multiplier,
                offset: offset + delta,
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Absolute(value) => value.is_finite(),
            Self::Relative {
                multiplier, offset, ..
            } => multiplier.is_finite() && offset.is_finite(),
        }
    }
}

impl From<f64> for GeometryValue {
    fn from(value: f64) -> Self {
        Self::Absolute(value)
    }
}

impl From<f32> for GeometryValue {
    fn from(value: f32) -> Self {
        Self::Absolute(f64::from(value))
    }
}

impl From<i32> for GeometryValue {
    fn from(value: i32) -> Self {
        Self::Absolute(f64::from(value))
    }
}

impl From<Anchor> for GeometryValue {
    fn from(anchor: Anchor) -> Self {
        Self::Relative {
            anchor,
            multiplier: 1.0,
            offset: 0.0,
        }
    }
}

/// A literal, already resolved number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueParameter {
    pub value: f64,
}

/// A value read from another view's attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideParameter {
    pub anchor: Anchor,
    pub multiplier: f64,
    pub offset: f64,
}

impl SideParameter {
    pub fn new(anchor: Anchor, multiplier: f64, offset: f64) -> Self {
        Self {
            anchor,
            multiplier,
            offset,
        }
    }

    /// Apply multiplier and offset to the anchored attribute's value
    pub fn apply(&self, source: f64) -> f64 {
        source * self.multiplier + self.offset
    }
}

/// Snapshot of how a builder declared one attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Value(ValueParameter),
    Side(SideParameter),
    /// Size of the union of the direct subviews, known once the builder resolves
    Subviews,
}
