//! Errors surfaced by segmentation and layout.
//!
//! Fatal conditions abort the current call with no partial output.
//! Non-fatal conditions (undefined handler keys, malformed hyperlink
//! syntax, layout on a detached container) never reach this type; they
//! degrade gracefully and are reported through `tracing` instead.

/// Errors that can occur during registration, generation, or layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A handler was already defined under this key.
    DuplicateHandler {
        /// The rejected key.
        key: String,
    },
    /// A replacement was already registered for this keyword.
    DuplicateReplacement {
        /// The rejected keyword.
        keyword: String,
    },
    /// A render group was already registered under this key.
    DuplicateGroup {
        /// The rejected key.
        key: String,
    },
    /// The configured minimum font size exceeds the maximum.
    FontSizeRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
    /// A font size falls outside the legal range.
    FontSizeOutOfRange {
        /// The offending size.
        size: u32,
    },
    /// A replacement factory failed to yield a usable visual node.
    ReplacementContract {
        /// The keyword whose factory violated the contract.
        keyword: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandler { key } => {
                write!(f, "handler already defined for key '{}'", key)
            }
            Self::DuplicateReplacement { keyword } => {
                write!(f, "replacement already registered for keyword '{}'", keyword)
            }
            Self::DuplicateGroup { key } => {
                write!(f, "render group already registered under key '{}'", key)
            }
            Self::FontSizeRange { min, max } => {
                write!(f, "minimum font size {} exceeds maximum {}", min, max)
            }
            Self::FontSizeOutOfRange { size } => {
                write!(
                    f,
                    "font size {} outside the legal range {}..={}",
                    size,
                    glyphflow_core::FONT_SIZE_MIN,
                    glyphflow_core::FONT_SIZE_MAX
                )
            }
            Self::ReplacementContract { keyword } => {
                write!(
                    f,
                    "replacement factory for keyword '{}' did not yield a visual node",
                    keyword
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
