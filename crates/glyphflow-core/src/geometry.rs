//! Geometric primitives.
//!
//! Layout works in abstract pixel units supplied by the host's measurement
//! oracle, so everything here is `f32`-based with the origin at the top-left.

/// A two-dimensional extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Zero extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded extent, used when measuring text free of any box.
    pub const MAX: Self = Self {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square size with equal extents.
    #[inline]
    pub const fn splat(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Check for zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise addition.
    #[inline]
    pub fn grow(self, other: Self) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }
}

/// A position in pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
