//! Opaque font handles.
//!
//! Glyphflow never touches font files. A [`Font`] is an identifier the host
//! and its measurement oracle agree on; the library only threads it through
//! measurement calls and element metadata.

/// An opaque handle to a host-registered font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Font(u32);

impl Font {
    /// Create a font handle from a host-assigned identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The host-assigned identifier.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Legal lower bound for font sizes, inclusive.
pub const FONT_SIZE_MIN: u32 = 0;

/// Legal upper bound for font sizes, inclusive.
pub const FONT_SIZE_MAX: u32 = 100;
