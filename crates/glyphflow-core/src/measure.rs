//! The external text-measurement oracle.
//!
//! Glyphflow never rasterizes text. Every pixel metric comes from a host
//! capability implementing [`MeasureOracle`]; the library treats its answers
//! as synchronous, side-effect-free ground truth. Injecting the oracle (as
//! opposed to a process-wide hidden label) keeps layout deterministic and
//! testable with a mock.

use crate::font::Font;
use crate::geometry::Size;

/// Host capability that reports text dimensions under font constraints.
pub trait MeasureOracle {
    /// Measure `text` at `font_size` in `font`, constrained to `bounds`.
    ///
    /// `bounds` may be [`Size::MAX`] to measure without any wrapping box.
    fn measure(&self, text: &str, font_size: u32, font: Font, bounds: Size) -> Size;

    /// Whether `text` at `font_size` in `font` fits `bounds` horizontally.
    fn fits(&self, text: &str, font_size: u32, font: Font, bounds: Size) -> bool;
}

/// Deterministic monospace oracle for tests and demos.
///
/// Every display cell advances by `font_size * advance` pixels and every
/// line is exactly `font_size` pixels tall. Width is computed with Unicode
/// display width, so CJK and emoji occupy two cells like a real terminal
/// grid would.
#[cfg(feature = "test-helpers")]
#[derive(Debug, Clone, Copy)]
pub struct FixedMetricsOracle {
    /// Horizontal advance per display cell, as a fraction of the font size.
    pub advance: f32,
}

#[cfg(feature = "test-helpers")]
impl FixedMetricsOracle {
    /// Oracle with the default half-em advance.
    #[must_use]
    pub const fn new() -> Self {
        Self { advance: 0.5 }
    }

    fn line_width(&self, line: &str, font_size: u32) -> f32 {
        use unicode_width::UnicodeWidthStr;
        line.width() as f32 * font_size as f32 * self.advance
    }
}

#[cfg(feature = "test-helpers")]
impl Default for FixedMetricsOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "test-helpers")]
impl MeasureOracle for FixedMetricsOracle {
    fn measure(&self, text: &str, font_size: u32, font: Font, _bounds: Size) -> Size {
        let _ = font;
        let mut width: f32 = 0.0;
        let mut lines: u32 = 0;
        for line in text.split('\n') {
            width = width.max(self.line_width(line, font_size));
            lines += 1;
        }
        Size::new(width, lines.max(1) as f32 * font_size as f32)
    }

    fn fits(&self, text: &str, font_size: u32, font: Font, bounds: Size) -> bool {
        self.measure(text, font_size, font, bounds).width <= bounds.width
    }
}
