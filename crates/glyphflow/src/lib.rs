#![forbid(unsafe_code)]

//! Markup-annotated string objects and responsive flow layout.
//!
//! Glyphflow turns lightweight markup strings into ordered sequences of
//! per-grapheme visual elements and flows those elements into a host
//! container with automatic font-size fitting. The host supplies the
//! pixel ground truth: text measurement comes from an injected
//! [`MeasureOracle`], scene-graph nodes hide behind the capability traits
//! in [`glyphflow_core`], and layout never touches a renderer directly.
//!
//! # Markup
//!
//! Two syntaxes apply to every generated string:
//! - `(label)[key]` marks `label` as a hyperlink activating the handler
//!   registered under `key`;
//! - delimiter pairs like `**bold**` (with the default `annotate`
//!   feature) tag covered graphemes with wrapping format templates.
//!
//! Registered keyword replacements substitute whole words with fixed text
//! or factory-produced host nodes.
//!
//! # Example
//!
//! ```
//! use glyphflow::{StringObject, StringConfig};
//! use glyphflow_core::Font;
//!
//! let mut strings = StringObject::new(StringConfig::default());
//! strings.define("open", |content, key| {
//!     println!("{content} activated via {key}");
//! })?;
//!
//! let elements = strings.generate("See (docs)[open] for **more**", Font::new(1))?;
//! assert!(elements.iter().any(|e| e.is_interactive()));
//! # Ok::<(), glyphflow::Error>(())
//! ```
//!
//! Layout lives in [`flow`]: register element groups on a
//! [`LayoutContext`] over a [`Container`](glyphflow_core::Container) and
//! call [`update`](flow::LayoutContext::update) (or bind it to a
//! [`ResizeSource`](glyphflow_core::ResizeSource) with
//! [`flow::bind_resize`]).

#[cfg(feature = "annotate")]
pub mod annotate;
pub mod element;
pub mod error;
pub mod fit;
pub mod flow;
pub mod measure_cache;
pub mod span;
pub mod string_object;
pub mod word;

pub use element::{
    ElementId, HyperHandler, LiteralElement, Replacement, SubstitutedElement, VisualElement,
};
pub use error::{Error, Result};
pub use flow::{LayoutConfig, LayoutContext, LayoutResult, Placement, RenderGroup, bind_resize};
pub use measure_cache::{CacheStats, MeasureCache};
pub use span::{HyperlinkScope, MarkdownAnnotator, MarkdownScope, NoMarkdown, SpanIndex};
pub use string_object::{GenerateOptions, StringConfig, StringObject};
pub use word::WordResolver;

pub use glyphflow_core::MeasureOracle;

#[cfg(feature = "annotate")]
pub use annotate::DelimiterAnnotator;
