//! Core geometry types for frame resolution

use std::fmt;
use std::str::FromStr;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A view frame: origin plus size, in the superview's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Same size, origin moved to (0, 0)
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Check if `other` lies completely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Translate the origin by the given deltas
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Read an attribute of this rectangle
    pub fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Top => self.y,
            Attribute::Left => self.x,
            Attribute::Bottom => self.bottom(),
            Attribute::Right => self.right(),
            Attribute::Width => self.width,
            Attribute::Height => self.height,
            Attribute::CenterX => self.x + self.width / 2.0,
            Attribute::CenterY => self.y + self.height / 2.0,
        }
    }

    /// Attribute-indexed assignment.
    ///
    /// Position attributes move the origin and keep the current size, so an
    /// edge or center relation needs the size on its axis to be settled first.
    pub fn set_value(&mut self, value: f64, attribute: Attribute) {
        match attribute {
            Attribute::Top => self.y = value,
            Attribute::Left => self.x = value,
            Attribute::Bottom => self.y = value - self.height,
            Attribute::Right => self.x = value - self.width,
            Attribute::Width => self.width = value,
            Attribute::Height => self.height = value,
            Attribute::CenterX => self.x = value - self.width / 2.0,
            Attribute::CenterY => self.y = value - self.height / 2.0,
        }
    }

    /// Round origin and size to the nearest device pixel
    pub fn snapped(&self, scale: f64) -> Rect {
        let snap = |v: f64| (v * scale).round() / scale;
        Rect::new(
            snap(self.x),
            snap(self.y),
            snap(self.width),
            snap(self.height),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A size dimension, used by half-size corner rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn attribute(self) -> Attribute {
        match self {
            Dimension::Width => Attribute::Width,
            Dimension::Height => Attribute::Height,
        }
    }
}

/// A rectangle attribute a relation can set or read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Top,
    Left,
    Bottom,
    Right,
    Width,
    Height,
    CenterX,
    CenterY,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Self::Top,
        Self::Left,
        Self::Bottom,
        Self::Right,
        Self::Width,
        Self::Height,
        Self::CenterX,
        Self::CenterY,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right | Self::Width | Self::CenterX => Axis::Horizontal,
            Self::Top | Self::Bottom | Self::Height | Self::CenterY => Axis::Vertical,
        }
    }

    pub fn is_size(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    /// Whether a relation setting `self` may read `source`.
    ///
    /// Positions read positions on the same axis. Sizes read any size, which
    /// keeps aspect-ratio relations (width from height) expressible.
    pub fn accepts(self, source: Attribute) -> bool {
        if self.is_size() {
            source.is_size()
        } else {
            !source.is_size() && source.axis() == self.axis()
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
            Self::Width => "width",
            Self::Height => "height",
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Insets for the four edges of a superview
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge
    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}

bitflags::bitflags! {
    /// Which edges of an [`EdgeInsets`] turn into relations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;

        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const ALL = Self::VERTICAL.bits() | Self::HORIZONTAL.bits();
    }
}

impl Default for Sides {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let center = rect.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_rect_union_with_zero_keeps_origin() {
        let union = Rect::zero().union(&Rect::new(5.0, 20.0, 5.0, 5.0));
        assert_eq!(union, Rect::new(0.0, 0.0, 10.0, 25.0));
    }

    #[test]
    fn test_set_value_lands_in_same_field() {
        let mut rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        rect.set_value(100.0, Attribute::Right);
        assert_eq!(rect.x, 80.0);
        rect.set_value(50.0, Attribute::CenterY);
        assert_eq!(rect.y, 45.0);
        rect.set_value(30.0, Attribute::Width);
        assert_eq!(rect.width, 30.0);
        assert_eq!(rect.value(Attribute::Right), 110.0);
    }

    #[test]
    fn test_attribute_compatibility() {
        assert!(Attribute::Left.accepts(Attribute::Right));
        assert!(Attribute::Left.accepts(Attribute::CenterX));
        assert!(!Attribute::Top.accepts(Attribute::Left));
        assert!(!Attribute::Top.accepts(Attribute::Height));
        assert!(Attribute::Width.accepts(Attribute::Height));
        assert!(!Attribute::Width.accepts(Attribute::Left));
    }

    #[test]
    fn test_attribute_from_str() {
        assert_eq!("center_x".parse::<Attribute>(), Ok(Attribute::CenterX));
        assert!("middle".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_sides_unions() {
        assert_eq!(Sides::VERTICAL, Sides::TOP | Sides::BOTTOM);
        assert_eq!(Sides::HORIZONTAL, Sides::LEFT | Sides::RIGHT);
        assert_eq!(Sides::ALL, Sides::VERTICAL | Sides::HORIZONTAL);
        assert!(!Sides::VERTICAL.contains(Sides::LEFT));
    }

    #[test]
    fn test_snapped() {
        let rect = Rect::new(0.26, 0.74, 10.1, 9.9);
        assert_eq!(rect.snapped(2.0), Rect::new(0.5, 0.5, 10.0, 10.0));
    }
}
