//! Configuration for frame resolution

use super::types::Rect;

/// Configuration options applied when a builder commits its frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    /// Device pixels per point. When set, committed frames are rounded to
    /// whole device pixels.
    pub pixel_scale: Option<f64>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap committed frames to the given pixel scale
    pub fn with_pixel_scale(mut self, scale: f64) -> Self {
        self.pixel_scale = Some(scale);
        self
    }

    /// The frame that actually gets committed for a resolved rectangle
    pub fn finalize(&self, rect: Rect) -> Rect {
        match self.pixel_scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => rect.snapped(scale),
            _ => rect,
        }
    }
}
